use crate::{
    actor::{Actor, ActorCore},
    foundation::{
        color::Color,
        error::ReelResult,
        geometry::{Point, Rect},
    },
    render::canvas::Canvas,
};

/// Roads paint below everything else.
pub const ROAD_PRIORITY: i32 = 1;

/// Straight horizontal road with solid edge lines and a dashed centre line.
///
/// Dash and gap lengths default to 3 m and 9 m and line width to 0.1 m.
#[derive(Clone, Debug)]
pub struct Road {
    core: ActorCore,
    /// Ordinates of the solid lines.
    pub solid_lines: Vec<f64>,
    /// Ordinates of the dashed lines.
    pub dashed_lines: Vec<f64>,
    /// `(dash, gap)` lengths in metres.
    pub dash: (f64, f64),
    /// Line width in metres.
    pub line_width: f64,
    /// Paint color.
    pub color: Color,
}

impl Default for Road {
    fn default() -> Self {
        Self::new()
    }
}

impl Road {
    /// Two-lane road: solid lines at `y = -2` and `y = 6`, dashed at `y = 2`.
    pub fn new() -> Self {
        Self {
            core: ActorCore::new(ROAD_PRIORITY),
            solid_lines: vec![-2.0, 6.0],
            dashed_lines: vec![2.0],
            dash: (3.0, 9.0),
            line_width: 0.1,
            color: Color::rgb(0.12, 0.47, 0.71),
        }
    }

    /// Every lane line ordinate, solid first.
    pub fn lines(&self) -> Vec<f64> {
        self.solid_lines
            .iter()
            .chain(&self.dashed_lines)
            .copied()
            .collect()
    }

    fn line_in_view(&self, y: f64, view: Rect) -> bool {
        let half = 0.5 * self.line_width;
        y - half < view.righttop.y && y + half > view.leftbottom.y
    }

    /// Rectangles to fill for the part of the road inside `view`.
    pub fn marks(&self, view: Rect) -> Vec<Rect> {
        let (left, right) = (view.leftbottom.x, view.righttop.x);
        let half = 0.5 * self.line_width;
        let band = |y: f64, x0: f64, x1: f64| {
            Rect::new(Point::new(x0, y - half), Point::new(x1, y + half))
        };

        let mut out = Vec::new();
        for &y in &self.solid_lines {
            if self.line_in_view(y, view) {
                out.push(band(y, left, right));
            }
        }

        let (on, off) = self.dash;
        let segment = on + off;
        if on <= 0.0 || segment <= 0.0 {
            return out;
        }
        for &y in &self.dashed_lines {
            if !self.line_in_view(y, view) {
                continue;
            }
            let mut start = segment * (left / segment).floor();
            while start <= right {
                let end = (start + on).min(right);
                let x0 = start.max(left);
                if end > x0 {
                    out.push(band(y, x0, end));
                }
                start += segment;
            }
        }
        out
    }
}

impl Actor for Road {
    fn core(&self) -> &ActorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ActorCore {
        &mut self.core
    }

    fn paint(&self, canvas: &mut dyn Canvas) -> ReelResult<()> {
        for mark in self.marks(canvas.view()) {
            canvas.fill_rect(mark, self.color)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/road.rs"]
mod tests;
