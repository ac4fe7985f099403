use super::*;
use crate::{
    animation::{callback::Callback, period::Period},
    render::canvas::{DrawCall, RecordingCanvas},
};

fn texture() -> Texture {
    Texture::from_premul(2, 2, vec![255; 16]).unwrap()
}

fn view() -> Rect {
    Rect::new(Point::new(50.0, 0.0), Point::new(80.0, 20.0))
}

#[test]
fn centred_on_the_screen_anchor() {
    let sprite =
        Sprite::new(texture(), Point::new(4.8, 7.2), Point::new(4.0, 4.0)).with_rotation(230.0);
    let mut canvas = RecordingCanvas::new(view());
    sprite.paint(&mut canvas).unwrap();
    match &canvas.calls()[0] {
        DrawCall::Image {
            rect,
            size,
            rotation_deg,
            ..
        } => {
            assert!(rect.center().distance(Point::new(54.8, 7.2)) < 1e-9);
            assert!((rect.width() - 4.0).abs() < 1e-12);
            assert_eq!(*size, (2, 2));
            assert_eq!(*rotation_deg, 230.0);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn grows_from_nothing() {
    let mut sprite = Sprite::new(texture(), Point::new(2.5, 9.0), Point::new(3.0, 3.0))
        .with_callback(Callback::grow(Period::new(1.0, 2.0)));
    let actor: &mut dyn Actor = &mut sprite;

    actor.step(0.5, view()).unwrap();
    let mut canvas = RecordingCanvas::new(view());
    actor.plot(&mut canvas).unwrap();
    assert!(canvas.calls().is_empty());

    actor.step(1.5, view()).unwrap();
    let sprite = actor.downcast_ref::<Sprite>().unwrap();
    let rect = sprite.rect(view()).unwrap();
    assert!((rect.width() - 1.5).abs() < 1e-12);
}

#[test]
fn world_placement_ignores_the_view() {
    let sprite = Sprite::new(texture(), Point::new(17.0, 6.5), Point::new(4.0, 4.0))
        .with_placement(Placement::World);
    let rect = sprite.rect(view()).unwrap();
    assert!(rect.center().distance(Point::new(17.0, 6.5)) < 1e-9);
}
