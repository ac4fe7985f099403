use super::*;

#[test]
fn constant_velocity_ignores_time() {
    let mut c = ConstantVelocity(Point::new(10.0, 0.0));
    assert_eq!(c.velocity(0.0).unwrap(), Point::new(10.0, 0.0));
    assert_eq!(c.velocity(99.0).unwrap(), Point::new(10.0, 0.0));
}

#[test]
fn pid_without_feed_is_uninitialized() {
    let mut pid = PidController::new(Point::new(15.0, 0.0), 0.0);
    let err = pid.velocity(0.0).unwrap_err();
    assert!(matches!(err, ReelError::Uninitialized(_)));
}

#[test]
fn pid_keeps_speed_until_a_measurement_arrives() {
    let feed = Feed::new();
    let mut pid = PidController::new(Point::new(15.0, 0.0), 0.0).with_measurement(feed.clone());
    assert_eq!(pid.velocity(0.0).unwrap(), Point::new(15.0, 0.0));

    feed.publish(Point::new(3.0, 2.0));
    let v = pid.velocity(0.1).unwrap();
    assert_eq!(v.x, 15.0);
    assert!((v.y - -1.0).abs() < 1e-12);
}

#[test]
fn pid_integral_decays() {
    let feed = Feed::new();
    let mut pid = PidController::new(Point::new(15.0, 0.0), 0.0)
        .with_gains(1.0, 0.2, 0.0)
        .with_measurement(feed.clone());

    feed.publish(Point::new(0.0, -1.0));
    let v1 = pid.velocity(0.0).unwrap();
    assert!((pid.integral() - 1.0).abs() < 1e-12);
    assert!((v1.y - 1.2).abs() < 1e-12);

    let v2 = pid.velocity(0.1).unwrap();
    assert!((pid.integral() - 1.7).abs() < 1e-12);
    assert!((v2.y - (1.0 + 0.2 * 1.7)).abs() < 1e-12);
}

#[test]
fn measurement_can_be_repointed() {
    let a = Feed::new();
    let b = Feed::new();
    a.publish(Point::new(0.0, 10.0));
    b.publish(Point::new(0.0, -10.0));

    let mut pid = PidController::new(Point::new(1.0, 0.0), 0.0).with_measurement(a);
    assert!(pid.velocity(0.0).unwrap().y < 0.0);
    pid.set_measurement(b.clone());
    assert!(pid.measurement().unwrap().same_as(&b));
    assert!(pid.velocity(0.1).unwrap().y > 0.0);
}
