use std::{cell::RefCell, rc::Rc};

use super::*;
use crate::{
    actor::ActorCore,
    content::{controller::ConstantVelocity, vehicle::Vehicle},
};

type Seen = Rc<RefCell<Vec<(f64, Rect)>>>;

struct ViewLog {
    core: ActorCore,
    seen: Seen,
}

impl ViewLog {
    fn new() -> (Self, Seen) {
        let seen = Seen::default();
        (
            Self {
                core: ActorCore::default(),
                seen: seen.clone(),
            },
            seen,
        )
    }
}

impl Actor for ViewLog {
    fn core(&self) -> &ActorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ActorCore {
        &mut self.core
    }

    fn update(&mut self, time: f64, view: Rect) -> ReelResult<()> {
        self.seen.borrow_mut().push((time, view));
        Ok(())
    }

    fn paint(&self, _canvas: &mut dyn Canvas) -> ReelResult<()> {
        Ok(())
    }
}

fn config(dir: &std::path::Path) -> SceneConfig {
    SceneConfig {
        out_root: dir.to_path_buf(),
        fps: 10,
        width: 60,
        height: 40,
        max_in_flight: 2,
        ..SceneConfig::new("unit", 1.0)
    }
}

fn scene_with_ego(cfg: SceneConfig) -> (Scene, ActorId) {
    let mut scene = Scene::new(cfg).unwrap();
    let ego = scene.add_actor(Vehicle::new(
        Point::new(0.0, 1.0),
        ConstantVelocity(Point::new(10.0, 0.0)),
    ));
    scene.set_ego(ego).unwrap();
    (scene, ego)
}

#[test]
fn the_tree_sees_the_view_around_the_moved_ego() {
    let dir = tempfile::tempdir().unwrap();
    let (mut scene, ego) = scene_with_ego(config(dir.path()));
    let (log, seen) = ViewLog::new();
    scene.add_actor(log);

    scene.simulate().unwrap();
    let seen = seen.borrow();
    assert_eq!(seen.len(), 11);
    let (t, view) = seen[1];
    assert!((t - 0.1).abs() < 1e-12);
    // the ego moved 1 m before the view was computed
    assert!((view.leftbottom.x - (1.0 - 15.0)).abs() < 1e-9);
    assert_eq!(view.leftbottom.y, 1.0 - 3.0);

    let car = scene.find(ego).and_then(|a| a.downcast_ref::<Vehicle>()).unwrap();
    assert!((car.pos().x - 10.0).abs() < 1e-9);
    assert_eq!(scene.tick(), 10);
    assert!((scene.time() - 1.0).abs() < 1e-12);
}

#[test]
fn an_ego_without_position_stops_the_first_step() {
    let dir = tempfile::tempdir().unwrap();
    let mut scene = Scene::new(config(dir.path())).unwrap();
    let (log, seen) = ViewLog::new();
    // the log has no position, so it cannot be the camera target
    let id = scene.add_actor(log);
    scene.set_ego(id).unwrap();
    assert!(matches!(scene.simulate(), Err(ReelError::Uninitialized(_))));
    assert!(seen.borrow().is_empty());
}

#[test]
fn time_is_tick_times_dt() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = SceneConfig {
        speed_factor: 0.5,
        ..config(dir.path())
    };
    let (mut scene, _) = scene_with_ego(cfg);
    scene.simulate().unwrap();
    assert!((scene.time() - 0.5).abs() < 1e-12);
}

#[test]
fn ego_must_be_top_level() {
    let dir = tempfile::tempdir().unwrap();
    let mut scene = Scene::new(config(dir.path())).unwrap();
    let mut inner = ActorList::new();
    let nested = inner.push(Vehicle::new(Point::ZERO, ConstantVelocity(Point::ZERO)));
    scene.add_actor(inner);
    assert!(matches!(scene.set_ego(nested), Err(ReelError::Validation(_))));
    assert!(scene.ego().is_none());
}

#[test]
fn missing_ego_is_uninitialized() {
    let dir = tempfile::tempdir().unwrap();
    let mut scene = Scene::new(config(dir.path())).unwrap();
    assert!(matches!(scene.simulate(), Err(ReelError::Uninitialized(_))));
}

#[test]
fn a_scene_runs_once() {
    let dir = tempfile::tempdir().unwrap();
    let (mut scene, _) = scene_with_ego(config(dir.path()));
    scene.simulate().unwrap();
    assert!(matches!(scene.simulate(), Err(ReelError::Validation(_))));
}

#[test]
fn invalid_config_is_rejected() {
    assert!(Scene::new(SceneConfig::new("x", -1.0)).is_err());
}

#[test]
fn a_refused_second_run_keeps_the_frames() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());
    let (mut scene, _) = scene_with_ego(cfg.clone());
    let report = scene.run(&RunOpts::full()).unwrap();
    assert_eq!(report.rendered, 10);
    let first = frame_path(&cfg.frame_dir(), 0);
    assert!(first.exists());

    assert!(matches!(scene.run(&RunOpts::full()), Err(ReelError::Validation(_))));
    assert!(first.exists());
}

#[test]
fn a_run_without_ego_leaves_the_frame_directory_alone() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());
    std::fs::create_dir_all(cfg.frame_dir()).unwrap();
    let kept = frame_path(&cfg.frame_dir(), 0);
    std::fs::write(&kept, b"x").unwrap();

    let mut scene = Scene::new(cfg).unwrap();
    assert!(matches!(scene.run(&RunOpts::full()), Err(ReelError::Uninitialized(_))));
    assert_eq!(std::fs::read(&kept).unwrap(), b"x");
}

#[test]
fn run_recreates_the_frame_directory() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());
    std::fs::create_dir_all(cfg.frame_dir()).unwrap();
    std::fs::write(cfg.frame_dir().join("stale.png"), b"x").unwrap();

    let (mut scene, _) = scene_with_ego(cfg.clone());
    let report = scene.run(&RunOpts::window(0.2, 0.5).with_freeze(0.3)).unwrap();
    assert_eq!(report.rendered, 3);
    assert_eq!(report.frozen, 3);
    assert_eq!(report.ticks, 10);

    let mut names: Vec<String> = std::fs::read_dir(cfg.frame_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    let expected: Vec<String> = (0..6).map(|i| format!("{i:06}.png")).collect();
    assert_eq!(names, expected);

    let last = std::fs::read(frame_path(&cfg.frame_dir(), 2)).unwrap();
    let frozen = std::fs::read(frame_path(&cfg.frame_dir(), 5)).unwrap();
    assert_eq!(last, frozen);
}

#[test]
fn render_before_any_step_is_uninitialized() {
    let dir = tempfile::tempdir().unwrap();
    let (mut scene, _) = scene_with_ego(config(dir.path()));
    assert!(matches!(
        scene.render_frame(),
        Err(ReelError::Uninitialized(_))
    ));
}

#[test]
fn frames_show_the_background_and_the_ego() {
    let dir = tempfile::tempdir().unwrap();
    let (mut scene, _) = scene_with_ego(config(dir.path()));
    scene.run(&RunOpts::window(0.0, 0.1)).unwrap();

    let img = image::open(frame_path(&scene.config().frame_dir(), 0))
        .unwrap()
        .to_rgba8();
    assert_eq!(img.dimensions(), (60, 40));
    // far corner is background
    assert_eq!(img.get_pixel(59, 0).0, [255, 255, 255, 255]);
    // the ego sits 15 m from the left and 3 m above the bottom: 2 px per metre
    let p = img.get_pixel(30, 40 - 6 - 1).0;
    assert!(p[0] < 128, "{p:?}");
}
