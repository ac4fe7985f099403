use super::*;

fn ramp() -> ColorRamp {
    ColorRamp::new(Period::lasting(10.0, 2.0), Color::BLACK, Color::WHITE)
}

#[test]
fn one_way_ramp_reaches_target_at_end() {
    let r = ramp();
    assert_eq!(r.advance(9.0), None);
    assert_eq!(r.advance(10.0), Some(Color::BLACK));
    assert_eq!(r.advance(11.0), Some(Color::rgb(0.5, 0.5, 0.5)));
    assert_eq!(r.advance(12.0), Some(Color::WHITE));
    assert_eq!(r.advance(20.0), Some(Color::WHITE));
    assert!(!r.is_finished(12.0));
    assert!(r.is_finished(12.5));
}

#[test]
fn there_and_back_midpoint_is_the_target_color() {
    let r = ramp().there_and_back();
    assert_eq!(r.advance(10.0), Some(Color::BLACK));
    assert_eq!(r.advance(11.0), Some(Color::WHITE));
    assert_eq!(r.advance(12.0), Some(Color::BLACK));
    assert_eq!(r.factor(10.5), 0.5);
    assert_eq!(r.factor(11.5), 0.5);
}

#[test]
fn degenerate_window_jumps_to_target() {
    let r = ColorRamp::new(Period::new(1.0, 1.0), Color::BLACK, Color::RED);
    assert_eq!(r.advance(1.0), Some(Color::RED));
}
