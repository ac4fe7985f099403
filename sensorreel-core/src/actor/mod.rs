//! Actors: drawable, steppable scene entities.
//!
//! Every actor embeds an [`ActorCore`] with the state shared by all kinds (priority, visibility,
//! opacity, terminal flag, attached callbacks). Subtypes implement [`Actor`] for their own update
//! and paint logic; the shared tick protocol lives on `dyn Actor`.

pub(crate) mod feed;
pub(crate) mod list;

use std::{
    any::Any,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::{
    animation::callback::Callback,
    foundation::{
        color::Color,
        error::ReelResult,
        geometry::{Point, Rect},
    },
    render::canvas::Canvas,
};

pub use list::ActorList;

/// Default priority for actors that do not pick one.
pub const DEFAULT_PRIORITY: i32 = 50;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique actor handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(pub u64);

impl ActorId {
    fn next() -> Self {
        Self(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "actor#{}", self.0)
    }
}

/// Which color slot of an actor a recolor request addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorTarget {
    /// Label or text color.
    Text,
    /// Stroke color (lines, arrows).
    Line,
    /// Marker color.
    Marker,
    /// Solid fill color.
    Fill,
}

/// State shared by every actor kind.
#[derive(Clone, Debug)]
pub struct ActorCore {
    /// Stable identity, used to look actors up inside a tree.
    pub id: ActorId,
    /// Z-order and step order; lower goes first, ties keep insertion order.
    pub priority: i32,
    /// Painted only while `true`.
    pub visible: bool,
    /// Opacity in `0..=1`. Callbacks clamp; the actor does not.
    pub alpha: f64,
    /// Terminal flag; the parent prunes the actor at the end of the tick.
    pub done: bool,
    /// Last tick time seen.
    pub time: f64,
    /// Last viewport seen.
    pub view: Option<Rect>,
    /// Read by history-recording actors to decide whether to append samples.
    pub recording: bool,
    /// Size multiplier read by image actors.
    pub scale: f64,
    callbacks: Vec<Callback>,
}

impl ActorCore {
    /// Fresh core with the given priority.
    pub fn new(priority: i32) -> Self {
        Self {
            id: ActorId::next(),
            priority,
            visible: true,
            alpha: 1.0,
            done: false,
            time: 0.0,
            view: None,
            recording: true,
            scale: 1.0,
            callbacks: Vec::new(),
        }
    }

    /// Attached callbacks, in attachment order.
    pub fn callbacks(&self) -> &[Callback] {
        &self.callbacks
    }

    /// Attach a callback; it runs after the ones already attached.
    pub fn add_callback(&mut self, cb: Callback) {
        self.callbacks.push(cb);
    }
}

impl Default for ActorCore {
    fn default() -> Self {
        Self::new(DEFAULT_PRIORITY)
    }
}

/// A drawable, steppable scene entity.
///
/// Implementors provide state access plus the subtype-specific `update`/`paint` hooks. The tick
/// protocol (`step`, `plot`) is implemented once on `dyn Actor`.
pub trait Actor: Any {
    /// Shared state.
    fn core(&self) -> &ActorCore;

    /// Shared state, mutably.
    fn core_mut(&mut self) -> &mut ActorCore;

    /// Subtype state update for this tick. Runs before the callbacks.
    fn update(&mut self, _time: f64, _view: Rect) -> ReelResult<()> {
        Ok(())
    }

    /// Runs after the callbacks of this tick, once visibility and opacity are settled.
    fn post_update(&mut self, _time: f64) -> ReelResult<()> {
        Ok(())
    }

    /// Draw into `canvas`. Only called while the actor is visible.
    fn paint(&self, canvas: &mut dyn Canvas) -> ReelResult<()>;

    /// World position, for actors that have one.
    fn position(&self) -> Option<Point> {
        None
    }

    /// Replace displayed content (text actors).
    fn set_content(&mut self, _content: &str) {}

    /// Recolor one color slot.
    fn recolor(&mut self, _target: ColorTarget, _color: Color) {}

    /// Children, for composite actors.
    fn as_list(&self) -> Option<&ActorList> {
        None
    }

    /// Children, mutably, for composite actors.
    fn as_list_mut(&mut self) -> Option<&mut ActorList> {
        None
    }

    /// Identity.
    fn id(&self) -> ActorId {
        self.core().id
    }

    /// Terminal flag.
    fn done(&self) -> bool {
        self.core().done
    }

    /// Attach a callback.
    fn add_callback(&mut self, cb: Callback) {
        self.core_mut().add_callback(cb);
    }

    /// Builder form of [`Actor::add_callback`].
    fn with_callback(mut self, cb: impl Into<Callback>) -> Self
    where
        Self: Sized,
    {
        self.add_callback(cb.into());
        self
    }

    /// Builder form for the priority.
    fn with_priority(mut self, priority: i32) -> Self
    where
        Self: Sized,
    {
        self.core_mut().priority = priority;
        self
    }
}

impl dyn Actor {
    /// Advance this actor to `time`.
    ///
    /// Records `(time, view)`, runs [`Actor::update`], then evaluates every attached callback in
    /// attachment order and drops the ones that became terminal, then runs
    /// [`Actor::post_update`]. Callbacks attached while the callbacks run are kept and first
    /// evaluated on the next tick.
    pub fn step(&mut self, time: f64, view: Rect) -> ReelResult<()> {
        {
            let core = self.core_mut();
            core.time = time;
            core.view = Some(view);
        }
        self.update(time, view)?;

        let mut callbacks = std::mem::take(&mut self.core_mut().callbacks);
        for cb in &mut callbacks {
            cb.step(time, view, self)?;
        }
        callbacks.retain(|cb| !cb.is_done());

        let core = self.core_mut();
        let added = std::mem::replace(&mut core.callbacks, callbacks);
        core.callbacks.extend(added);
        self.post_update(time)
    }

    /// Paint into `canvas` if visible, inside an opacity layer when `alpha < 1`.
    pub fn plot(&self, canvas: &mut dyn Canvas) -> ReelResult<()> {
        let core = self.core();
        if !core.visible {
            return Ok(());
        }
        let alpha = core.alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return Ok(());
        }
        if alpha < 1.0 {
            canvas.push_opacity(alpha);
            let out = self.paint(canvas);
            canvas.pop_opacity();
            out
        } else {
            self.paint(canvas)
        }
    }

    /// Downcast to a concrete actor kind.
    pub fn downcast_mut<T: Actor>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }

    /// Downcast to a concrete actor kind.
    pub fn downcast_ref<T: Actor>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/actor/actor.rs"]
mod tests;
