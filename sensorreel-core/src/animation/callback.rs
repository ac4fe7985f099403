use std::{fmt, rc::Rc};

use crate::{
    actor::{Actor, ColorTarget},
    animation::{period::Period, ramp::ColorRamp},
    foundation::{color::Color, error::ReelResult, geometry::Rect},
};

/// Default length of the fade-in and fade-out ramps, in seconds.
pub const DEFAULT_FADE: f64 = 0.5;

/// Marker appended to partially revealed text.
pub const REVEAL_MARKER: &str = "_";

/// Action fired once by [`Callback::one_shot`].
pub type Action = Rc<dyn Fn(&mut dyn Actor) -> ReelResult<()>>;

/// Mutator receiving the color computed by a [`ColorRamp`].
pub type Recolor = Rc<dyn Fn(&mut dyn Actor, Color)>;

/// A time-scoped behavior owned by exactly one actor.
///
/// A callback is stepped once per tick, after its owner has updated itself, and mutates the owner
/// through the `&mut dyn Actor` handed to it. Once [`Callback::is_done`] turns true the owner
/// drops it at the end of that tick.
///
/// Cloning yields an independent copy, so one template can be attached to several actors.
#[derive(Clone)]
pub struct Callback {
    kind: CallbackKind,
    time: f64,
    view: Option<Rect>,
    done: bool,
}

/// The closed set of callback behaviors.
#[derive(Clone)]
pub enum CallbackKind {
    /// Visibility window with alpha ramps.
    FadeInOut(FadeInOut),
    /// Terminates the owner the tick after it stops being visible.
    DeleteAfterDisappear {
        /// The owner has been visible at least once.
        seen: bool,
        /// The owner disappeared; terminate on the next tick.
        armed: bool,
    },
    /// Fire an action the first tick `time > at`.
    OneShot {
        /// Trigger instant.
        at: f64,
        /// Mutation applied to the owner.
        action: Action,
    },
    /// Color interpolation handed to a mutator.
    ColorShift {
        /// Interpolation state.
        ramp: ColorRamp,
        /// Applies the color to the owner.
        apply: Recolor,
    },
    /// Progressive reveal of a token sequence.
    TextReveal {
        /// Reveal window.
        period: Period,
        /// Tokens concatenated in order.
        tokens: Vec<String>,
    },
    /// Gates the owner's `recording` flag to a window.
    LifecycleGate(Period),
    /// Drives the owner's `scale` from 0 to 1 over a window.
    Grow(Period),
}

/// Fade-in/fade-out visibility window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeInOut {
    /// Visibility window.
    pub period: Period,
    /// Fade-in ramp length in seconds. Zero means "fully opaque at `start`".
    pub fade_in: f64,
    /// Fade-out ramp length in seconds. Zero means "fully opaque until `end`".
    pub fade_out: f64,
    /// Terminate the owner when the window closes instead of holding it invisible.
    pub removable: bool,
}

impl FadeInOut {
    /// Window `[start, end]` with default ramps.
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            period: Period::new(start, end),
            fade_in: DEFAULT_FADE,
            fade_out: DEFAULT_FADE,
            removable: false,
        }
    }

    /// Open-ended window starting at `start`.
    pub fn starting(start: f64) -> Self {
        Self::new(start, f64::INFINITY)
    }

    /// Override both ramp lengths.
    pub fn ramps(mut self, fade_in: f64, fade_out: f64) -> Self {
        self.fade_in = fade_in.max(0.0);
        self.fade_out = fade_out.max(0.0);
        self
    }

    /// Terminate the owner once the window closes.
    pub fn removable(mut self) -> Self {
        self.removable = true;
        self
    }

    /// `clamp(min(fade-in ramp, fade-out ramp, 1), 0, 1)` at `time`.
    pub fn alpha(&self, time: f64) -> f64 {
        let ramp_in = if self.fade_in > 0.0 {
            (time - self.period.start) / self.fade_in
        } else {
            1.0
        };
        let ramp_out = if self.fade_out > 0.0 {
            (self.period.end - time) / self.fade_out
        } else {
            1.0
        };
        let a = ramp_in.min(ramp_out).min(1.0);
        if a.is_nan() { 0.0 } else { a.clamp(0.0, 1.0) }
    }
}

impl From<FadeInOut> for Callback {
    fn from(fade: FadeInOut) -> Self {
        Self::new(CallbackKind::FadeInOut(fade))
    }
}

impl Callback {
    fn new(kind: CallbackKind) -> Self {
        Self {
            kind,
            time: 0.0,
            view: None,
            done: false,
        }
    }

    /// Fade window `[start, end]` with default ramps; see [`FadeInOut`] for the builder form.
    pub fn fade(start: f64, end: f64) -> Self {
        FadeInOut::new(start, end).into()
    }

    /// Terminate the owner on the tick after it first goes from visible to invisible.
    pub fn delete_after_disappear() -> Self {
        Self::new(CallbackKind::DeleteAfterDisappear {
            seen: false,
            armed: false,
        })
    }

    /// Run `action` against the owner once, the first tick with `time > at`.
    pub fn one_shot(at: f64, action: impl Fn(&mut dyn Actor) -> ReelResult<()> + 'static) -> Self {
        Self::new(CallbackKind::OneShot {
            at,
            action: Rc::new(action),
        })
    }

    /// Interpolate along `ramp` and hand each color to `apply`.
    pub fn color_shift(ramp: ColorRamp, apply: impl Fn(&mut dyn Actor, Color) + 'static) -> Self {
        Self::new(CallbackKind::ColorShift {
            ramp,
            apply: Rc::new(apply),
        })
    }

    /// Interpolate along `ramp`, recoloring `target` through [`Actor::recolor`].
    pub fn recolor(ramp: ColorRamp, target: ColorTarget) -> Self {
        Self::color_shift(ramp, move |actor, color| actor.recolor(target, color))
    }

    /// Reveal `tokens` progressively over `period`.
    pub fn text_reveal<I, S>(period: Period, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(CallbackKind::TextReveal {
            period,
            tokens: tokens.into_iter().map(Into::into).collect(),
        })
    }

    /// Allow the owner to record history only during `period`.
    pub fn lifecycle_gate(period: Period) -> Self {
        Self::new(CallbackKind::LifecycleGate(period))
    }

    /// Grow the owner's scale from 0 to 1 over `period`.
    pub fn grow(period: Period) -> Self {
        Self::new(CallbackKind::Grow(period))
    }

    /// Behavior of this callback.
    pub fn kind(&self) -> &CallbackKind {
        &self.kind
    }

    /// Last observed time.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Last observed viewport.
    pub fn view(&self) -> Option<Rect> {
        self.view
    }

    /// `true` once the callback has exhausted its purpose.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Observe `(time, view)` and mutate `actor`.
    pub fn step(&mut self, time: f64, view: Rect, actor: &mut dyn Actor) -> ReelResult<()> {
        self.time = time;
        self.view = Some(view);
        if self.done {
            return Ok(());
        }

        match &mut self.kind {
            CallbackKind::FadeInOut(fade) => {
                let core = actor.core_mut();
                core.visible = fade.period.contains(time);
                core.alpha = fade.alpha(time);
                if fade.period.is_over(time) {
                    core.visible = false;
                    if fade.removable {
                        core.done = true;
                    }
                    self.done = true;
                }
            }
            CallbackKind::DeleteAfterDisappear { seen, armed } => {
                if *armed {
                    actor.core_mut().done = true;
                    self.done = true;
                } else if actor.core().visible {
                    *seen = true;
                } else if *seen {
                    *armed = true;
                }
            }
            CallbackKind::OneShot { at, action } => {
                if time > *at {
                    self.done = true;
                    (**action)(actor)?;
                }
            }
            CallbackKind::ColorShift { ramp, apply } => {
                if let Some(color) = ramp.advance(time) {
                    (**apply)(actor, color);
                }
                if ramp.is_finished(time) {
                    self.done = true;
                }
            }
            CallbackKind::TextReveal { period, tokens } => {
                let shown = revealed(tokens, period.clamped_progress(time));
                actor.set_content(&shown);
                if period.is_over(time) {
                    self.done = true;
                }
            }
            CallbackKind::LifecycleGate(period) => {
                actor.core_mut().recording = period.contains(time);
                if period.is_over(time) {
                    self.done = true;
                }
            }
            CallbackKind::Grow(period) => {
                actor.core_mut().scale = period.clamped_progress(time);
                if period.is_over(time) {
                    self.done = true;
                }
            }
        }
        Ok(())
    }
}

/// `floor(progress * n)` tokens, followed by [`REVEAL_MARKER`] while incomplete.
pub(crate) fn revealed(tokens: &[String], progress: f64) -> String {
    let n = tokens.len();
    let count = ((progress.clamp(0.0, 1.0) * n as f64).floor() as usize).min(n);
    let mut out: String = tokens[..count].concat();
    if count < n {
        out.push_str(REVEAL_MARKER);
    }
    out
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("kind", &self.kind)
            .field("time", &self.time)
            .field("done", &self.done)
            .finish()
    }
}

impl fmt::Debug for CallbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FadeInOut(fade) => f.debug_tuple("FadeInOut").field(fade).finish(),
            Self::DeleteAfterDisappear { seen, armed } => f
                .debug_struct("DeleteAfterDisappear")
                .field("seen", seen)
                .field("armed", armed)
                .finish(),
            Self::OneShot { at, .. } => f.debug_struct("OneShot").field("at", at).finish(),
            Self::ColorShift { ramp, .. } => {
                f.debug_struct("ColorShift").field("ramp", ramp).finish()
            }
            Self::TextReveal { period, tokens } => f
                .debug_struct("TextReveal")
                .field("period", period)
                .field("tokens", &tokens.len())
                .finish(),
            Self::LifecycleGate(period) => f.debug_tuple("LifecycleGate").field(period).finish(),
            Self::Grow(period) => f.debug_tuple("Grow").field(period).finish(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/callback.rs"]
mod tests;
