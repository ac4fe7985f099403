//! Ready-made actors for sensor-fusion explainer scenes.
//!
//! Vehicles, sampled trajectories and the road live in world coordinates. Annotations (texts,
//! legends, diagrams, sprites) default to [`Placement::Screen`], which pins them to the moving
//! viewport.

pub(crate) mod controller;
pub(crate) mod diagram;
pub(crate) mod road;
pub(crate) mod sprite;
pub(crate) mod text;
pub(crate) mod trajectory;
pub(crate) mod vehicle;

use crate::foundation::geometry::{Point, Rect};

/// How an actor's anchor point is interpreted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// World coordinates.
    World,
    /// Offset from the viewport's left-bottom corner.
    #[default]
    Screen,
}

impl Placement {
    /// World position of `at` under `view`.
    pub fn resolve(self, at: Point, view: Rect) -> Point {
        match self {
            Self::World => at,
            Self::Screen => view.leftbottom + at,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/placement.rs"]
mod tests;
