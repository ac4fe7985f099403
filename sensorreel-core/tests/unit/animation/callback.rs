use super::*;
use crate::{
    actor::ActorCore,
    foundation::{error::ReelError, geometry::Point},
    render::canvas::{Canvas, RecordingCanvas},
};

struct Probe {
    core: ActorCore,
    content: String,
    text_color: Color,
}

impl Probe {
    fn new() -> Self {
        Self {
            core: ActorCore::default(),
            content: String::new(),
            text_color: Color::BLACK,
        }
    }
}

impl Actor for Probe {
    fn core(&self) -> &ActorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ActorCore {
        &mut self.core
    }

    fn paint(&self, canvas: &mut dyn Canvas) -> ReelResult<()> {
        canvas.fill_rect(Rect::new(Point::ZERO, Point::new(1.0, 1.0)), Color::RED)
    }

    fn set_content(&mut self, content: &str) {
        self.content = content.to_owned();
    }

    fn recolor(&mut self, target: ColorTarget, color: Color) {
        if target == ColorTarget::Text {
            self.text_color = color;
        }
    }
}

fn view() -> Rect {
    Rect::new(Point::ZERO, Point::new(30.0, 20.0))
}

fn run(cb: &mut Callback, actor: &mut Probe, time: f64) {
    cb.step(time, view(), actor).unwrap();
}

#[test]
fn fade_alpha_and_visibility_follow_the_window() {
    let mut cb: Callback = FadeInOut::new(2.0, 5.0).ramps(1.0, 1.0).into();
    let mut a = Probe::new();

    run(&mut cb, &mut a, 2.5);
    assert!((a.core.alpha - 0.5).abs() < 1e-9);
    assert!(a.core.visible);

    run(&mut cb, &mut a, 4.5);
    assert!((a.core.alpha - 0.5).abs() < 1e-9);

    run(&mut cb, &mut a, 3.5);
    assert_eq!(a.core.alpha, 1.0);

    for (t, vis) in [(1.9, false), (2.0, true), (5.0, true)] {
        let mut cb: Callback = FadeInOut::new(2.0, 5.0).ramps(1.0, 1.0).into();
        run(&mut cb, &mut a, t);
        assert_eq!(a.core.visible, vis, "t={t}");
    }

    run(&mut cb, &mut a, 5.1);
    assert!(!a.core.visible);
    assert!(cb.is_done());
}

#[test]
fn fade_holds_by_default_and_terminates_when_removable() {
    let mut hold = Callback::fade(0.0, 1.0);
    let mut a = Probe::new();
    run(&mut hold, &mut a, 2.0);
    assert!(hold.is_done());
    assert!(!a.core.visible);
    assert!(!a.core.done);

    let mut remove: Callback = FadeInOut::new(0.0, 1.0).removable().into();
    let mut b = Probe::new();
    run(&mut remove, &mut b, 2.0);
    assert!(remove.is_done());
    assert!(b.core.done);
}

#[test]
fn zero_length_ramps_count_as_opaque() {
    let fade = FadeInOut::new(1.0, 2.0).ramps(0.0, 0.0);
    assert_eq!(fade.alpha(1.0), 1.0);
    assert_eq!(fade.alpha(2.0), 1.0);
    assert_eq!(fade.alpha(1.5), 1.0);
}

#[test]
fn open_ended_fade_never_fades_out() {
    let fade = FadeInOut::starting(1.0);
    assert_eq!(fade.alpha(1.25), 0.5);
    assert_eq!(fade.alpha(1e6), 1.0);
}

#[test]
fn delete_after_disappear_fires_one_tick_after_vanishing() {
    let mut cb = Callback::delete_after_disappear();
    let mut a = Probe::new();

    a.core.visible = false;
    run(&mut cb, &mut a, 0.0);
    run(&mut cb, &mut a, 0.1);
    assert!(!a.core.done, "never visible yet");

    a.core.visible = true;
    run(&mut cb, &mut a, 0.2);
    assert!(!a.core.done);

    a.core.visible = false;
    run(&mut cb, &mut a, 0.3);
    assert!(!a.core.done, "still alive on the tick it disappears");

    run(&mut cb, &mut a, 0.4);
    assert!(a.core.done);
    assert!(cb.is_done());
}

#[test]
fn one_shot_fires_exactly_once_after_trigger() {
    let mut cb = Callback::one_shot(1.0, |actor| {
        actor.core_mut().priority += 1;
        Ok(())
    });
    let mut a = Probe::new();
    let base = a.core.priority;

    run(&mut cb, &mut a, 1.0);
    assert_eq!(a.core.priority, base);
    run(&mut cb, &mut a, 1.1);
    assert_eq!(a.core.priority, base + 1);
    assert!(cb.is_done());
    run(&mut cb, &mut a, 1.2);
    assert_eq!(a.core.priority, base + 1);
}

#[test]
fn one_shot_errors_propagate() {
    let mut cb = Callback::one_shot(0.0, |_| Err(ReelError::uninitialized("feed")));
    let mut a = Probe::new();
    let err = cb.step(1.0, view(), &mut a).unwrap_err();
    assert!(matches!(err, ReelError::Uninitialized(_)));
}

#[test]
fn recolor_hands_the_ramp_color_to_the_actor() {
    let ramp = ColorRamp::new(Period::lasting(1.0, 2.0), Color::BLACK, Color::WHITE).there_and_back();
    let mut cb = Callback::recolor(ramp, ColorTarget::Text);
    let mut a = Probe::new();

    run(&mut cb, &mut a, 0.5);
    assert_eq!(a.text_color, Color::BLACK);
    run(&mut cb, &mut a, 2.0);
    assert_eq!(a.text_color, Color::WHITE);
    run(&mut cb, &mut a, 3.5);
    assert_eq!(a.text_color, Color::BLACK);
    assert!(cb.is_done());
}

#[test]
fn text_reveal_shows_a_prefix_and_a_marker() {
    let mut cb = Callback::text_reveal(Period::new(0.0, 1.0), ["a", "b", "c", "d"]);
    let mut a = Probe::new();

    run(&mut cb, &mut a, 0.0);
    assert_eq!(a.content, "_");
    run(&mut cb, &mut a, 0.5);
    assert_eq!(a.content, "ab_");
    run(&mut cb, &mut a, 0.99);
    assert_eq!(a.content, "abc_");
    run(&mut cb, &mut a, 1.0);
    assert_eq!(a.content, "abcd");
    assert!(!cb.is_done());
    run(&mut cb, &mut a, 1.1);
    assert!(cb.is_done());
}

#[test]
fn lifecycle_gate_toggles_recording() {
    let mut cb = Callback::lifecycle_gate(Period::new(1.0, 2.0));
    let mut a = Probe::new();

    run(&mut cb, &mut a, 0.5);
    assert!(!a.core.recording);
    run(&mut cb, &mut a, 1.5);
    assert!(a.core.recording);
    run(&mut cb, &mut a, 2.5);
    assert!(!a.core.recording);
    assert!(cb.is_done());
}

#[test]
fn degenerate_window_terminates_immediately_with_full_progress() {
    let mut cb = Callback::grow(Period::new(3.0, 3.0));
    let mut a = Probe::new();
    run(&mut cb, &mut a, 3.0);
    assert_eq!(a.core.scale, 1.0);
    assert!(a.core.scale.is_finite());
    assert!(cb.is_done());
}

#[test]
fn grow_scales_up_over_the_window() {
    let mut cb = Callback::grow(Period::new(0.0, 0.2));
    let mut a = Probe::new();
    run(&mut cb, &mut a, 0.1);
    assert!((a.core.scale - 0.5).abs() < 1e-9);
}

#[test]
fn cloned_callbacks_do_not_share_state() {
    let template = Callback::delete_after_disappear();
    let mut first = template.clone();
    let mut second = template;

    let mut a = Probe::new();
    run(&mut first, &mut a, 0.0);
    a.core.visible = false;
    run(&mut first, &mut a, 0.1);
    run(&mut first, &mut a, 0.2);
    assert!(first.is_done());

    let mut b = Probe::new();
    b.core.visible = false;
    run(&mut second, &mut b, 0.0);
    assert!(!second.is_done());
    assert!(!b.core.done);
}

#[test]
fn probe_paints_through_recording_canvas() {
    let a = Probe::new();
    let mut canvas = RecordingCanvas::new(view());
    a.paint(&mut canvas).unwrap();
    assert_eq!(canvas.calls().len(), 1);
}
