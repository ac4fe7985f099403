use crate::{
    actor::Actor,
    foundation::{
        error::{ReelError, ReelResult},
        geometry::{Point, Rect},
    },
};

/// Default viewport size in metres.
pub const DEFAULT_VIEW_SIZE: Point = Point::new(30.0, 20.0);

/// Default ego position inside the viewport, from its left-bottom corner.
pub const DEFAULT_EGO_OFFSET: Point = Point::new(15.0, 3.0);

/// How the camera follows the ego.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum CameraPolicy {
    /// Follow both axes.
    Rigid,
    /// Follow x only. y is locked to the ego's y the first time a view is computed.
    #[default]
    LockX,
}

/// Maps the ego position to the viewport rectangle.
#[derive(Clone, Debug)]
pub struct Camera {
    policy: CameraPolicy,
    locked_y: Option<f64>,
    /// Viewport size in metres.
    pub size: Point,
    /// Ego position inside the viewport.
    pub offset: Point,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraPolicy::default())
    }
}

impl Camera {
    /// Camera with the default size and offset.
    pub fn new(policy: CameraPolicy) -> Self {
        Self {
            policy,
            locked_y: None,
            size: DEFAULT_VIEW_SIZE,
            offset: DEFAULT_EGO_OFFSET,
        }
    }

    /// Following policy.
    pub fn policy(&self) -> CameraPolicy {
        self.policy
    }

    /// Switch policy, clearing any policy state.
    pub fn set_policy(&mut self, policy: CameraPolicy) {
        self.policy = policy;
        self.reset();
    }

    /// y captured by [`CameraPolicy::LockX`], once set.
    pub fn locked_y(&self) -> Option<f64> {
        self.locked_y
    }

    /// Forget policy state; the next view re-captures it.
    pub fn reset(&mut self) {
        self.locked_y = None;
    }

    /// Viewport around `ego`.
    pub fn view(&mut self, ego: &dyn Actor) -> ReelResult<Rect> {
        let pos = ego
            .position()
            .ok_or_else(|| ReelError::uninitialized(format!("ego {} has no position", ego.id())))?;
        self.view_at(pos)
    }

    /// Viewport around an ego standing at `pos`.
    pub fn view_at(&mut self, pos: Point) -> ReelResult<Rect> {
        if !pos.is_finite() {
            return Err(ReelError::validation(format!(
                "ego position must be finite, got {pos}"
            )));
        }
        let anchor = match self.policy {
            CameraPolicy::Rigid => pos,
            CameraPolicy::LockX => Point::new(pos.x, *self.locked_y.get_or_insert(pos.y)),
        };
        Ok(Rect::from_origin_size(anchor - self.offset, self.size))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/camera.rs"]
mod tests;
