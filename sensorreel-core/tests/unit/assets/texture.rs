use super::*;

fn strip() -> Texture {
    // 2x1: red, green
    Texture::from_premul(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 255]).unwrap()
}

#[test]
fn from_premul_checks_length() {
    assert!(Texture::from_premul(2, 2, vec![0; 8]).is_err());
    assert!(Texture::from_premul(0, 1, vec![]).is_err());
}

#[test]
fn quarter_turns_rotate_counter_clockwise() {
    let t = strip();

    let ccw = t.rotate90(1);
    assert_eq!((ccw.width, ccw.height), (1, 2));
    // Right-hand pixel ends up on top.
    assert_eq!(&ccw.rgba8_premul[0..4], &[0, 255, 0, 255]);
    assert_eq!(&ccw.rgba8_premul[4..8], &[255, 0, 0, 255]);

    let cw = t.rotate90(-1);
    assert_eq!(&cw.rgba8_premul[0..4], &[255, 0, 0, 255]);

    assert_eq!(t.rotate90(4), t);
    assert_eq!(t.rotate90(2).rotate90(2), t);
}

#[test]
fn load_dispatches_on_extension() {
    let dir = tempfile::tempdir().unwrap();

    let svg = dir.path().join("box.svg");
    std::fs::write(
        &svg,
        br#"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="1"><rect width="2" height="1"/></svg>"#,
    )
    .unwrap();
    let tex = Texture::load(&svg).unwrap();
    assert_eq!(tex.width, 2 * SVG_RASTER_SCALE as u32);

    let png = dir.path().join("dot.png");
    image::save_buffer_with_format(
        &png,
        &[1, 2, 3, 255],
        1,
        1,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .unwrap();
    assert_eq!(Texture::load(&png).unwrap().width, 1);

    let other = dir.path().join("notes.txt");
    std::fs::write(&other, b"hi").unwrap();
    assert!(Texture::load(&other).is_err());
    assert!(Texture::load(dir.path().join("missing.png")).is_err());
}
