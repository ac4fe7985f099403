use crate::{animation::period::Period, foundation::color::Color};

/// Linear color interpolation over a [`Period`].
///
/// With `there_and_back` the progress is folded as `1 - |2p - 1|`, so the window midpoint lands
/// exactly on `to` and both ends sit on `from`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorRamp {
    /// Interpolation window.
    pub period: Period,
    /// Color at progress 0.
    pub from: Color,
    /// Color at progress 1 (or at the midpoint when folded).
    pub to: Color,
    /// Fold the progress into a symmetric out-and-back curve.
    pub there_and_back: bool,
}

impl ColorRamp {
    /// One-way ramp from `from` to `to`.
    pub fn new(period: Period, from: Color, to: Color) -> Self {
        Self {
            period,
            from,
            to,
            there_and_back: false,
        }
    }

    /// Enable the out-and-back fold.
    pub fn there_and_back(mut self) -> Self {
        self.there_and_back = true;
        self
    }

    /// Effective interpolation factor at `time`, in `0..=1`.
    pub fn factor(&self, time: f64) -> f64 {
        let p = self.period.clamped_progress(time);
        if self.there_and_back {
            1.0 - (2.0 * p - 1.0).abs()
        } else {
            p
        }
    }

    /// Color at `time`, or `None` before the window opens.
    pub fn advance(&self, time: f64) -> Option<Color> {
        if time < self.period.start {
            return None;
        }
        Some(self.from.lerp(self.to, self.factor(time)))
    }

    /// `true` once the window has closed.
    pub fn is_finished(&self, time: f64) -> bool {
        self.period.is_over(time)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ramp.rs"]
mod tests;
