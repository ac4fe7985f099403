use super::*;
use crate::{
    content::controller::{ConstantVelocity, PidController},
    render::canvas::{DrawCall, RecordingCanvas},
};

fn view() -> Rect {
    Rect::new(Point::new(-15.0, -3.0), Point::new(15.0, 17.0))
}

fn step(v: &mut Vehicle, t: f64) -> ReelResult<()> {
    (v as &mut dyn Actor).step(t, view())
}

#[test]
fn integrates_velocity_over_elapsed_time() {
    let mut v = Vehicle::new(Point::ZERO, ConstantVelocity(Point::new(10.0, 0.0)));
    step(&mut v, 0.0).unwrap();
    assert_eq!(v.pos(), Point::ZERO);
    step(&mut v, 0.5).unwrap();
    assert_eq!(v.pos(), Point::new(5.0, 0.0));
    assert_eq!(v.feed().latest(), Some(Point::new(5.0, 0.0)));
    assert_eq!(v.position(), Some(Point::new(5.0, 0.0)));
}

#[test]
fn speed_is_clamped_per_axis() {
    let mut v = Vehicle::new(Point::ZERO, ConstantVelocity(Point::new(100.0, -100.0)));
    step(&mut v, 0.0).unwrap();
    step(&mut v, 1.0).unwrap();
    assert_eq!(v.pos(), Point::new(30.0, -5.0));
}

#[test]
fn heading_follows_velocity() {
    let mut v = Vehicle::new(Point::ZERO, ConstantVelocity(Point::new(0.0, 3.0)));
    step(&mut v, 0.0).unwrap();
    assert!((v.heading_deg() - 90.0).abs() < 1e-9);
}

#[test]
fn missing_measurement_propagates() {
    let mut v = Vehicle::new(Point::ZERO, PidController::new(Point::new(15.0, 0.0), 0.0));
    let err = step(&mut v, 0.0).unwrap_err();
    assert!(matches!(err, ReelError::Uninitialized(_)));
}

#[test]
fn controller_can_be_reached_by_type() {
    let mut v = Vehicle::new(Point::ZERO, PidController::new(Point::new(15.0, 0.0), 0.0));
    let feed = Feed::new();
    v.controller_as::<PidController>()
        .unwrap()
        .set_measurement(feed);
    assert!(v.controller_as::<ConstantVelocity>().is_none());
    step(&mut v, 0.0).unwrap();
}

#[test]
fn paints_a_box_centred_on_the_position() {
    let v = Vehicle::new(Point::new(1.0, 2.0), ConstantVelocity(Point::ZERO));
    let mut canvas = RecordingCanvas::new(view());
    v.paint(&mut canvas).unwrap();
    match &canvas.calls()[0] {
        DrawCall::FillRect { rect, .. } => {
            assert_eq!(*rect, Rect::new(Point::new(-1.0, 0.5), Point::new(3.0, 3.5)));
        }
        other => panic!("unexpected {other:?}"),
    }
}
