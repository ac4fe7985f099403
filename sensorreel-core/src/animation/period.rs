/// A closed time window `[start, end]` in scene seconds.
///
/// `end` may be `f64::INFINITY` for "from `start` onwards". A window whose end is not after its
/// start is degenerate and reports full progress as soon as it is queried.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Period {
    /// Window start (inclusive).
    pub start: f64,
    /// Window end (inclusive).
    pub end: f64,
}

impl Period {
    /// Window `[start, end]`.
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Open-ended window starting at `start`.
    pub const fn starting(start: f64) -> Self {
        Self::new(start, f64::INFINITY)
    }

    /// Window of `duration` seconds starting at `start`.
    pub fn lasting(start: f64, duration: f64) -> Self {
        Self::new(start, start + duration)
    }

    /// Window length in seconds (may be infinite).
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// `true` when the window has no extent.
    pub fn is_degenerate(&self) -> bool {
        self.end <= self.start
    }

    /// `(time - start) / (end - start)`, unclamped.
    ///
    /// Degenerate windows return `1.0`; an open-ended window stays at `0.0`.
    pub fn progress(&self, time: f64) -> f64 {
        if self.is_degenerate() {
            return 1.0;
        }
        let p = (time - self.start) / self.duration();
        if p.is_finite() { p } else { 0.0 }
    }

    /// Same as [`Period::progress`] but clamped to `0..=1`.
    pub fn clamped_progress(&self, time: f64) -> f64 {
        self.progress(time).clamp(0.0, 1.0)
    }

    /// `start <= time <= end`.
    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time <= self.end
    }

    /// `time > end`; a degenerate window is over as soon as `time >= start`.
    pub fn is_over(&self, time: f64) -> bool {
        time > self.end || (self.is_degenerate() && time >= self.start)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/period.rs"]
mod tests;
