use super::*;

#[test]
fn defaults_are_valid() {
    let cfg = SceneConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.max_in_flight, 30);
    assert_eq!(cfg.background, Color::WHITE);
    assert_eq!(cfg.total_ticks(), 600);
}

#[test]
fn derived_paths_and_timing() {
    let cfg = SceneConfig {
        out_root: PathBuf::from("/tmp/reels"),
        fps: 30,
        speed_factor: 0.5,
        ..SceneConfig::new("fusion", 2.5)
    };
    assert_eq!(cfg.frame_dir(), PathBuf::from("/tmp/reels/fusion"));
    assert_eq!(cfg.video_path(), PathBuf::from("/tmp/reels/fusion.mp4"));
    assert_eq!(cfg.total_ticks(), 75);
    assert!((cfg.dt() - 1.0 / 60.0).abs() < 1e-15);
}

#[test]
fn rejects_bad_values() {
    let bad = [
        SceneConfig::new("", 1.0),
        SceneConfig::new("a/b", 1.0),
        SceneConfig::new("x", 0.0),
        SceneConfig::new("x", f64::INFINITY),
        SceneConfig {
            fps: 0,
            ..SceneConfig::default()
        },
        SceneConfig {
            speed_factor: -1.0,
            ..SceneConfig::default()
        },
        SceneConfig {
            width: 1601,
            ..SceneConfig::default()
        },
        SceneConfig {
            height: 0,
            ..SceneConfig::default()
        },
        SceneConfig {
            width: 70_000,
            ..SceneConfig::default()
        },
        SceneConfig {
            max_in_flight: 0,
            ..SceneConfig::default()
        },
    ];
    for cfg in bad {
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ReelError::Validation(_)), "{cfg:?}");
    }
}

#[test]
fn json_overrides_only_listed_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.json");
    std::fs::write(
        &path,
        r##"{ "name": "cross_check", "fps": 24, "background": "#000000", "debug": true }"##,
    )
    .unwrap();

    let cfg = SceneConfig::from_json_path(&path).unwrap();
    assert_eq!(cfg.name, "cross_check");
    assert_eq!(cfg.fps, 24);
    assert_eq!(cfg.background, Color::BLACK);
    assert!(cfg.debug);
    assert_eq!(cfg.width, 1600);
}

#[test]
fn json_errors_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scene.json");
    std::fs::write(&path, r#"{ "fsp": 24 }"#).unwrap();
    assert!(matches!(
        SceneConfig::from_json_path(&path),
        Err(ReelError::Validation(_))
    ));

    std::fs::write(&path, r#"{ "width": 15 }"#).unwrap();
    assert!(SceneConfig::from_json_path(&path).is_err());

    assert!(matches!(
        SceneConfig::from_json_path(dir.path().join("missing.json")),
        Err(ReelError::Other(_))
    ));
}

#[test]
fn tick_range_defaults_to_the_whole_run() {
    assert_eq!(RunOpts::full().tick_range(10, 100).unwrap(), (0, 100));
    assert_eq!(RunOpts::window(1.0, 2.0).tick_range(10, 100).unwrap(), (10, 20));
    assert_eq!(RunOpts::window(5.0, 50.0).tick_range(10, 100).unwrap(), (50, 100));
}

#[test]
fn tick_range_rejects_inverted_or_negative_windows() {
    assert!(RunOpts::window(3.0, 1.0).tick_range(10, 100).is_err());
    assert!(RunOpts::window(-1.0, 1.0).tick_range(10, 100).is_err());
    // start past the end of the run leaves nothing to render
    assert!(RunOpts::window(20.0, 30.0).tick_range(10, 100).is_err());
}

#[test]
fn freeze_frames_follow_fps() {
    assert_eq!(RunOpts::full().freeze_frames(60).unwrap(), 0);
    assert_eq!(RunOpts::full().with_freeze(1.5).freeze_frames(60).unwrap(), 90);
    assert!(RunOpts::full().with_freeze(f64::NAN).freeze_frames(60).is_err());
}
