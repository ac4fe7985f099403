use super::*;

#[test]
fn progress_is_linear_inside_the_window() {
    let p = Period::new(2.0, 6.0);
    assert_eq!(p.progress(2.0), 0.0);
    assert_eq!(p.progress(4.0), 0.5);
    assert_eq!(p.progress(6.0), 1.0);
    assert_eq!(p.progress(8.0), 1.5);
    assert_eq!(p.clamped_progress(8.0), 1.0);
    assert_eq!(p.clamped_progress(0.0), 0.0);
}

#[test]
fn degenerate_window_reports_full_progress() {
    let p = Period::new(3.0, 3.0);
    assert!(p.is_degenerate());
    for t in [3.0, 3.5, 100.0] {
        let v = p.progress(t);
        assert!(v.is_finite());
        assert_eq!(v, 1.0);
    }
    assert!(!p.is_over(2.9));
    assert!(p.is_over(3.0));
    assert!(p.is_over(3.1));
}

#[test]
fn open_ended_window_never_finishes() {
    let p = Period::starting(1.0);
    assert_eq!(p.progress(1e6), 0.0);
    assert!(p.contains(1e6));
    assert!(!p.is_over(1e9));
}

#[test]
fn window_bounds_are_inclusive() {
    let p = Period::lasting(2.0, 3.0);
    assert!(!p.contains(1.999));
    assert!(p.contains(2.0));
    assert!(p.contains(5.0));
    assert!(!p.contains(5.001));
    assert!(!p.is_over(5.0));
    assert!(p.is_over(5.001));
}
