use super::*;

#[test]
fn screen_placement_follows_the_view() {
    let view = Rect::new(Point::new(100.0, -3.0), Point::new(130.0, 17.0));
    let at = Point::new(2.0, 13.0);
    assert_eq!(Placement::Screen.resolve(at, view), Point::new(102.0, 10.0));
    assert_eq!(Placement::World.resolve(at, view), at);
    assert_eq!(Placement::default(), Placement::Screen);
}
