use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use rand::Rng;
use rand_distr::{Distribution, Normal};

/// A 2D point (or displacement) in scene units (metres, y up).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Build a point from its components.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Sample a point around `center` with independent Gaussian error per axis.
    ///
    /// `scale` holds the per-axis standard deviation. A zero (or negative) deviation leaves that
    /// axis exact.
    pub fn noisy<R: Rng + ?Sized>(center: Self, scale: Self, rng: &mut R) -> Self {
        fn axis<R: Rng + ?Sized>(mean: f64, std_dev: f64, rng: &mut R) -> f64 {
            if !std_dev.is_finite() || std_dev <= 0.0 {
                return mean;
            }
            match Normal::new(mean, std_dev) {
                Ok(n) => n.sample(rng),
                Err(_) => mean,
            }
        }

        Self {
            x: axis(center.x, scale.x, rng),
            y: axis(center.y, scale.y, rng),
        }
    }

    pub(crate) fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned rectangle given by its left-bottom and right-top corners.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    /// Minimum corner.
    pub leftbottom: Point,
    /// Maximum corner.
    pub righttop: Point,
}

impl Rect {
    /// Build a rectangle from its corners.
    pub const fn new(leftbottom: Point, righttop: Point) -> Self {
        Self {
            leftbottom,
            righttop,
        }
    }

    /// Build a rectangle from its left-bottom corner and size.
    pub fn from_origin_size(leftbottom: Point, size: Point) -> Self {
        Self::new(leftbottom, leftbottom + size)
    }

    /// Build a rectangle of `size` centred on `center`.
    pub fn centered(center: Point, size: Point) -> Self {
        let half = size * 0.5;
        Self::new(center - half, center + half)
    }

    /// Open-region containment: points on the boundary are outside.
    pub fn contains(&self, p: Point) -> bool {
        p.x > self.leftbottom.x
            && p.x < self.righttop.x
            && p.y > self.leftbottom.y
            && p.y < self.righttop.y
    }

    /// Horizontal extent.
    pub fn width(&self) -> f64 {
        self.righttop.x - self.leftbottom.x
    }

    /// Vertical extent.
    pub fn height(&self) -> f64 {
        self.righttop.y - self.leftbottom.y
    }

    /// Extent as a point.
    pub fn size(&self) -> Point {
        self.righttop - self.leftbottom
    }

    /// Geometric centre.
    pub fn center(&self) -> Point {
        (self.leftbottom + self.righttop) * 0.5
    }

    /// Scale about the centre.
    pub fn scaled(&self, factor: f64) -> Self {
        Self::centered(self.center(), self.size() * factor)
    }
}

impl Add<Point> for Rect {
    type Output = Self;

    fn add(self, shift: Point) -> Self {
        Self::new(self.leftbottom + shift, self.righttop + shift)
    }
}

/// A directed segment.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Line {
    /// First endpoint.
    pub start: Point,
    /// Second endpoint.
    pub end: Point,
    /// `end - start`.
    pub delta: Point,
}

impl Line {
    /// Segment between two endpoints.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            delta: end - start,
        }
    }

    /// Segment from `start` along `delta`.
    pub fn from_delta(start: Point, delta: Point) -> Self {
        Self::new(start, start + delta)
    }

    /// Segment length.
    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    /// Partially-completed segment: `0` collapses onto `start`, `1` is the full segment.
    pub fn interpolate(&self, percentage: f64) -> Self {
        Self::from_delta(self.start, self.delta * percentage)
    }
}

impl Add<Point> for Line {
    type Output = Self;

    fn add(self, shift: Point) -> Self {
        Self::new(self.start + shift, self.end + shift)
    }
}

impl Sub<Point> for Line {
    type Output = Self;

    fn sub(self, shift: Point) -> Self {
        Self::new(self.start - shift, self.end - shift)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/geometry.rs"]
mod tests;
