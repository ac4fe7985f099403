use super::*;
use crate::{
    actor::ActorList,
    content::{controller::ConstantVelocity, vehicle::Vehicle},
    foundation::error::ReelError,
};

#[test]
fn lock_x_captures_y_on_first_use() {
    let mut cam = Camera::default();
    let v = cam.view_at(Point::new(0.0, 1.5)).unwrap();
    assert_eq!(v.leftbottom, Point::new(-15.0, -1.5));
    assert_eq!(v.righttop, Point::new(15.0, 18.5));
    assert_eq!(cam.locked_y(), Some(1.5));

    let v = cam.view_at(Point::new(10.0, 4.0)).unwrap();
    assert_eq!(v.leftbottom, Point::new(-5.0, -1.5));
}

#[test]
fn reset_recaptures_the_lock() {
    let mut cam = Camera::default();
    cam.view_at(Point::new(0.0, 1.0)).unwrap();
    cam.reset();
    let v = cam.view_at(Point::new(0.0, 5.0)).unwrap();
    assert_eq!(v.leftbottom.y, 2.0);
}

#[test]
fn rigid_follows_both_axes() {
    let mut cam = Camera::new(CameraPolicy::Rigid);
    cam.view_at(Point::new(0.0, 1.0)).unwrap();
    let v = cam.view_at(Point::new(3.0, 4.0)).unwrap();
    assert_eq!(v.leftbottom, Point::new(-12.0, 1.0));
    assert_eq!(cam.locked_y(), None);
}

#[test]
fn view_from_a_vehicle() {
    let mut cam = Camera::default();
    let car = Vehicle::new(Point::new(0.0, 0.0), ConstantVelocity(Point::new(15.0, 0.0)));
    let v = cam.view(&car).unwrap();
    assert_eq!(v.size(), DEFAULT_VIEW_SIZE);
}

#[test]
fn ego_without_position_is_uninitialized() {
    let mut cam = Camera::default();
    let err = cam.view(&ActorList::new()).unwrap_err();
    assert!(matches!(err, ReelError::Uninitialized(_)));
}

#[test]
fn non_finite_positions_are_rejected() {
    let mut cam = Camera::default();
    assert!(cam.view_at(Point::new(f64::NAN, 0.0)).is_err());
    assert_eq!(cam.locked_y(), None);
}
