use super::*;
use crate::{
    animation::period::Period,
    render::canvas::{DrawCall, RecordingCanvas},
};

struct Counter {
    core: ActorCore,
    updates: u32,
}

impl Counter {
    fn new() -> Self {
        Self {
            core: ActorCore::default(),
            updates: 0,
        }
    }
}

impl Actor for Counter {
    fn core(&self) -> &ActorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ActorCore {
        &mut self.core
    }

    fn update(&mut self, _time: f64, _view: Rect) -> ReelResult<()> {
        self.updates += 1;
        Ok(())
    }

    fn paint(&self, canvas: &mut dyn Canvas) -> ReelResult<()> {
        canvas.text(Point::ZERO, "counter", &Default::default())
    }
}

fn view() -> Rect {
    Rect::new(Point::ZERO, Point::new(30.0, 20.0))
}

#[test]
fn step_records_time_and_view_then_runs_callbacks() {
    let mut c = Counter::new().with_callback(Callback::grow(Period::new(0.0, 1.0)));
    let a: &mut dyn Actor = &mut c;

    a.step(0.5, view()).unwrap();
    assert_eq!(a.core().time, 0.5);
    assert_eq!(a.core().view, Some(view()));
    assert!((a.core().scale - 0.5).abs() < 1e-9);
    assert_eq!(a.core().callbacks().len(), 1);

    a.step(1.5, view()).unwrap();
    assert!(a.core().callbacks().is_empty(), "terminal callback dropped");
    assert_eq!(a.downcast_ref::<Counter>().map(|c| c.updates), Some(2));
}

#[test]
fn callbacks_attached_mid_tick_run_from_the_next_tick() {
    let mut c = Counter::new().with_callback(Callback::one_shot(-1.0, |actor| {
        actor.add_callback(Callback::one_shot(-1.0, |actor| {
            actor.core_mut().priority = 7;
            Ok(())
        }));
        Ok(())
    }));
    let a: &mut dyn Actor = &mut c;

    a.step(0.0, view()).unwrap();
    assert_eq!(a.core().priority, DEFAULT_PRIORITY);
    assert_eq!(a.core().callbacks().len(), 1);

    a.step(0.1, view()).unwrap();
    assert_eq!(a.core().priority, 7);
    assert!(a.core().callbacks().is_empty());
}

#[test]
fn plot_skips_invisible_actors_and_wraps_partial_opacity() {
    let mut c = Counter::new();
    let mut canvas = RecordingCanvas::new(view());

    c.core.visible = false;
    (&c as &dyn Actor).plot(&mut canvas).unwrap();
    assert!(canvas.calls().is_empty());

    c.core.visible = true;
    c.core.alpha = 0.25;
    (&c as &dyn Actor).plot(&mut canvas).unwrap();
    match &canvas.calls()[0] {
        DrawCall::Text { opacity, .. } => assert_eq!(*opacity, 0.25),
        other => panic!("unexpected call {other:?}"),
    }

    c.core.alpha = 0.0;
    (&c as &dyn Actor).plot(&mut canvas).unwrap();
    assert_eq!(canvas.calls().len(), 1);
}

#[test]
fn ids_are_unique() {
    let a = Counter::new();
    let b = Counter::new();
    assert_ne!(a.id(), b.id());
}

#[test]
fn downcast_reaches_the_concrete_kind() {
    let mut boxed: Box<dyn Actor> = Box::new(Counter::new());
    boxed.step(0.0, view()).unwrap();
    let counter = boxed.downcast_mut::<Counter>().unwrap();
    counter.updates = 10;
    assert_eq!(boxed.downcast_ref::<Counter>().unwrap().updates, 10);
    assert!(boxed.downcast_ref::<ActorList>().is_none());
}
