use crate::{
    actor::{Actor, ActorCore, ColorTarget},
    content::{Placement, text::ANNOTATION_PRIORITY},
    foundation::{
        color::Color,
        error::ReelResult,
        geometry::{Line, Point},
    },
    render::canvas::{Canvas, LineStyle},
};

/// Arrow head length along the last segment, in metres.
pub const ARROW_LENGTH: f64 = 0.35;

/// Arrow head half-width, in metres.
pub const ARROW_HALF_WIDTH: f64 = 0.15;

/// Polyline drawn progressively from its first vertex, ending in an arrow head.
///
/// The path starts growing on the first tick the actor is visible and reaches its full length
/// `duration` seconds later. Growth is by arc length, so every metre takes the same time.
#[derive(Clone, Debug)]
pub struct PolyLine {
    core: ActorCore,
    start: Point,
    deltas: Vec<Point>,
    duration: f64,
    started: Option<f64>,
    /// Anchor interpretation.
    pub placement: Placement,
    /// Stroke.
    pub line: LineStyle,
    /// Arrow head fill.
    pub arrow: Color,
}

impl PolyLine {
    /// Path from `start` following `deltas`, fully drawn after `duration` seconds.
    pub fn new(start: Point, deltas: impl IntoIterator<Item = Point>, duration: f64) -> Self {
        Self {
            core: ActorCore::new(ANNOTATION_PRIORITY),
            start,
            deltas: deltas.into_iter().collect(),
            duration,
            started: None,
            placement: Placement::Screen,
            line: LineStyle::solid(Color::BLACK, 3.0),
            arrow: Color::BLACK,
        }
    }

    /// Line and arrow color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.line.color = color;
        self.arrow = color;
        self
    }

    /// Anchor interpretation.
    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Vertices, anchor first.
    pub fn points(&self) -> Vec<Point> {
        let mut out = Vec::with_capacity(self.deltas.len() + 1);
        let mut p = self.start;
        out.push(p);
        for &d in &self.deltas {
            p += d;
            out.push(p);
        }
        out
    }

    /// Total path length.
    pub fn length(&self) -> f64 {
        self.deltas.iter().map(|d| Point::ZERO.distance(*d)).sum()
    }

    /// Drawn fraction at `time`, in `0..=1`.
    pub fn progress(&self, time: f64) -> f64 {
        let Some(started) = self.started else {
            return 0.0;
        };
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((time - started) / self.duration).clamp(0.0, 1.0)
    }

    /// Vertices of the part of the path covering `fraction` of its length.
    pub fn partial(&self, fraction: f64) -> Vec<Point> {
        let points = self.points();
        let total = self.length();
        if fraction >= 1.0 || total <= 0.0 {
            return points;
        }
        let mut remaining = fraction.max(0.0) * total;
        let mut out = vec![points[0]];
        for pair in points.windows(2) {
            let seg = Line::new(pair[0], pair[1]);
            let len = seg.length();
            if remaining >= len {
                out.push(pair[1]);
                remaining -= len;
                if remaining <= 0.0 {
                    break;
                }
                continue;
            }
            if len > 0.0 {
                out.push(seg.interpolate(remaining / len).end);
            }
            break;
        }
        out
    }

    fn arrow_head(tip: Point, from: Point) -> Option<[Point; 3]> {
        let dir = tip - from;
        let len = Point::ZERO.distance(dir);
        if len <= 0.0 {
            return None;
        }
        let unit = dir * (1.0 / len);
        let normal = Point::new(-unit.y, unit.x);
        let base = tip - unit * ARROW_LENGTH;
        Some([
            tip,
            base + normal * ARROW_HALF_WIDTH,
            base - normal * ARROW_HALF_WIDTH,
        ])
    }
}

impl Actor for PolyLine {
    fn core(&self) -> &ActorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ActorCore {
        &mut self.core
    }

    fn post_update(&mut self, time: f64) -> ReelResult<()> {
        if self.started.is_none() && self.core.visible {
            self.started = Some(time);
        }
        Ok(())
    }

    fn paint(&self, canvas: &mut dyn Canvas) -> ReelResult<()> {
        let progress = self.progress(self.core.time);
        if progress <= 0.0 {
            return Ok(());
        }
        let view = canvas.view();
        let points: Vec<Point> = self
            .partial(progress)
            .into_iter()
            .map(|p| self.placement.resolve(p, view))
            .collect();
        if points.len() < 2 {
            return Ok(());
        }
        canvas.stroke_path(&points, &self.line)?;

        let tip = points[points.len() - 1];
        let from = points[points.len() - 2];
        if let Some(head) = Self::arrow_head(tip, from) {
            canvas.fill_polygon(&head, self.arrow)?;
        }
        Ok(())
    }

    fn recolor(&mut self, target: ColorTarget, color: Color) {
        match target {
            ColorTarget::Line => {
                self.line.color = color;
                self.arrow = color;
            }
            ColorTarget::Fill => self.arrow = color,
            ColorTarget::Text | ColorTarget::Marker => {}
        }
    }
}

/// Multiplexer symbol: a trapezoid, wide on the input side, narrowing towards the output.
///
/// `at` is the middle of the input edge; the output edge is `width` metres to the right.
#[derive(Clone, Debug)]
pub struct Mux {
    core: ActorCore,
    at: Point,
    /// Anchor interpretation.
    pub placement: Placement,
    /// Horizontal extent.
    pub width: f64,
    /// Input edge height.
    pub input_height: f64,
    /// Output edge height.
    pub output_height: f64,
    /// Body fill.
    pub fill: Color,
    /// Outline.
    pub edge: LineStyle,
}

impl Mux {
    /// 1 m wide, 3.4 m tall at the input and 1.7 m at the output.
    pub fn new(at: Point) -> Self {
        Self {
            core: ActorCore::new(ANNOTATION_PRIORITY),
            at,
            placement: Placement::Screen,
            width: 1.0,
            input_height: 3.4,
            output_height: 1.7,
            fill: Color::rgb(0.94, 0.94, 0.94),
            edge: LineStyle::solid(Color::BLACK, 2.0),
        }
    }

    /// Corners, counter-clockwise from the input bottom, relative to the anchor placement.
    pub fn corners(&self) -> [Point; 4] {
        let (hi, ho) = (0.5 * self.input_height, 0.5 * self.output_height);
        let a = self.at;
        [
            a + Point::new(0.0, -hi),
            a + Point::new(self.width, -ho),
            a + Point::new(self.width, ho),
            a + Point::new(0.0, hi),
        ]
    }
}

impl Actor for Mux {
    fn core(&self) -> &ActorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ActorCore {
        &mut self.core
    }

    fn paint(&self, canvas: &mut dyn Canvas) -> ReelResult<()> {
        let view = canvas.view();
        let c = self.corners().map(|p| self.placement.resolve(p, view));
        canvas.fill_polygon(&c, self.fill)?;
        canvas.stroke_path(&[c[0], c[1], c[2], c[3], c[0]], &self.edge)
    }

    fn recolor(&mut self, target: ColorTarget, color: Color) {
        match target {
            ColorTarget::Line => self.edge.color = color,
            ColorTarget::Fill => self.fill = color,
            ColorTarget::Text | ColorTarget::Marker => {}
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/diagram.rs"]
mod tests;
