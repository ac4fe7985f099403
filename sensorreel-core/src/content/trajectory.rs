use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{
    actor::{Actor, ActorCore, ActorList, ColorTarget, feed::Feed},
    foundation::{
        color::Color,
        error::ReelResult,
        geometry::{Point, Rect},
    },
    render::canvas::{Canvas, LineStyle, MarkerShape, MarkerStyle},
};

/// Default sampling period in seconds.
pub const DEFAULT_SAMPLE_PERIOD: f64 = 0.05;

/// Default time during which a fresh marker is drawn enlarged.
pub const DEFAULT_ANIMATION_TIME: f64 = 1.0;

/// Maximum area multiplier of a fresh marker.
pub const FRESH_MARKER_BOOST: f64 = 7.0;

/// GPS-spoofing drift applied to the `y` of a sampled position.
///
/// Before `onset` the output tracks the true `y`. After it, `y` walks away by `dy` per sample and
/// `dy` grows by `4 %` per second elapsed between samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriftAttack {
    /// Attack onset in seconds.
    pub onset: f64,
    y: f64,
    dy: f64,
    last: f64,
}

impl DriftAttack {
    /// Drift starting at `onset` from `y_init`.
    pub fn new(onset: f64, y_init: f64) -> Self {
        Self {
            onset,
            y: y_init,
            dy: -0.04,
            last: 0.0,
        }
    }

    /// Attacked version of `truth` at `time`.
    pub fn apply(&mut self, truth: Point, time: f64) -> Point {
        if time > self.onset {
            self.y += self.dy;
            self.dy *= 1.0 + 0.04 * (time - self.last);
        } else {
            self.y = truth.y;
        }
        self.last = time;
        Point::new(truth.x, self.y)
    }
}

/// How a trajectory turns the source position into a sample.
#[derive(Clone, Debug, PartialEq)]
pub enum Sampler {
    /// The source position itself.
    Exact,
    /// Independent Gaussian error per axis with the given standard deviations.
    Gaussian {
        /// Per-axis standard deviation.
        scale: Point,
    },
    /// Spoofed measurement.
    Drift(DriftAttack),
    /// Point on the horizontal lane line at `y`, level with the source, with Gaussian error.
    Lane {
        /// Lane line ordinate.
        y: f64,
        /// Per-axis standard deviation.
        scale: Point,
    },
}

impl Sampler {
    fn sample(&mut self, truth: Point, time: f64, rng: &mut ChaCha8Rng) -> Point {
        match self {
            Self::Exact => truth,
            Self::Gaussian { scale } => Point::noisy(truth, *scale, rng),
            Self::Drift(attack) => attack.apply(truth, time),
            Self::Lane { y, scale } => Point::noisy(Point::new(truth.x, *y), *scale, rng),
        }
    }
}

/// One recorded position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    /// Sampled position.
    pub pos: Point,
    /// Time the sample was taken.
    pub born: f64,
}

/// Periodically sampled history of a moving source.
///
/// While the owner's `recording` flag is set, a sample is taken every `sample_period` seconds of
/// accumulated tick time. The newest sample is published on [`Trajectory::output`]. History older
/// than the last point before the first in-view sample is dropped every tick.
pub struct Trajectory {
    core: ActorCore,
    source: Feed,
    output: Feed,
    sampler: Sampler,
    rng: ChaCha8Rng,
    sample_period: f64,
    offset: Point,
    accum: f64,
    last_time: Option<f64>,
    samples: Vec<Sample>,
    /// Marker style.
    pub marker: MarkerStyle,
    /// Connecting line style.
    pub line: LineStyle,
    /// Enlargement window for fresh markers; negative disables it.
    pub animation_time: f64,
}

impl Trajectory {
    /// Exact trajectory of `source`, sampled every [`DEFAULT_SAMPLE_PERIOD`].
    pub fn new(source: Feed) -> Self {
        Self {
            core: ActorCore::default(),
            source,
            output: Feed::new(),
            sampler: Sampler::Exact,
            rng: ChaCha8Rng::seed_from_u64(0),
            sample_period: DEFAULT_SAMPLE_PERIOD,
            offset: Point::ZERO,
            accum: 0.0,
            last_time: None,
            samples: Vec::new(),
            marker: MarkerStyle::default(),
            line: LineStyle::dotted(Color::GREY, 2.0),
            animation_time: DEFAULT_ANIMATION_TIME,
        }
    }

    /// Use `sampler` for new samples.
    pub fn with_sampler(mut self, sampler: Sampler) -> Self {
        self.sampler = sampler;
        self
    }

    /// Gaussian measurement with per-axis standard deviation `scale`.
    pub fn gaussian(self, scale: Point) -> Self {
        self.with_sampler(Sampler::Gaussian { scale })
    }

    /// Seed the noise source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    /// Sampling period in seconds.
    pub fn with_period(mut self, sample_period: f64) -> Self {
        self.sample_period = sample_period;
        self
    }

    /// Constant offset added to the source before sampling.
    pub fn with_offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    /// Color both the markers and the line.
    pub fn with_color(mut self, color: Color) -> Self {
        self.marker.color = color;
        self.line.color = color;
        self
    }

    /// Marker glyph.
    pub fn with_marker_shape(mut self, shape: MarkerShape) -> Self {
        self.marker.shape = shape;
        self
    }

    /// Fresh-marker enlargement window; negative disables it.
    pub fn with_animation_time(mut self, animation_time: f64) -> Self {
        self.animation_time = animation_time;
        self
    }

    /// Channel carrying the newest sample.
    pub fn output(&self) -> Feed {
        self.output.clone()
    }

    /// Recorded history, oldest first.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Marker size multiplier for a sample of `age` seconds.
    ///
    /// The marker area starts at `1 + 7` times the base and shrinks linearly to the base over
    /// `animation_time`; the returned value is the linear factor.
    pub fn marker_scale(&self, age: f64) -> f64 {
        if self.animation_time < 0.0 || age > self.animation_time {
            return 1.0;
        }
        let ratio = if self.animation_time > 0.0 {
            1.0 + FRESH_MARKER_BOOST * (1.0 - age / self.animation_time)
        } else {
            1.0
        };
        ratio.max(1.0).sqrt()
    }

    fn prune(&mut self, view: Rect) {
        let first = self
            .samples
            .iter()
            .position(|s| view.contains(s.pos))
            .unwrap_or(0);
        let keep_from = first.saturating_sub(1);
        self.samples.drain(..keep_from);
    }
}

impl Actor for Trajectory {
    fn core(&self) -> &ActorCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ActorCore {
        &mut self.core
    }

    fn update(&mut self, time: f64, view: Rect) -> ReelResult<()> {
        let dt = self.last_time.map_or(0.0, |last| (time - last).max(0.0));
        self.last_time = Some(time);

        if self.core.recording && self.sample_period > 0.0 {
            self.accum += dt;
            if self.accum >= self.sample_period {
                self.accum -= self.sample_period;
                if let Some(truth) = self.source.latest() {
                    let pos = self.sampler.sample(truth + self.offset, time, &mut self.rng);
                    self.samples.push(Sample { pos, born: time });
                    self.output.publish(pos);
                }
            }
        }

        self.prune(view);
        Ok(())
    }

    fn paint(&self, canvas: &mut dyn Canvas) -> ReelResult<()> {
        if self.samples.is_empty() {
            return Ok(());
        }
        let points: Vec<Point> = self.samples.iter().map(|s| s.pos).collect();
        canvas.stroke_path(&points, &self.line)?;
        for s in &self.samples {
            let scale = self.marker_scale(self.core.time - s.born);
            canvas.marker(s.pos, &self.marker, scale)?;
        }
        Ok(())
    }

    fn position(&self) -> Option<Point> {
        self.samples.last().map(|s| s.pos)
    }

    fn recolor(&mut self, target: ColorTarget, color: Color) {
        match target {
            ColorTarget::Marker => self.marker.color = color,
            ColorTarget::Line => self.line.color = color,
            ColorTarget::Text | ColorTarget::Fill => {}
        }
    }
}

/// Lane-line detections ahead of a vehicle.
///
/// Builds one trajectory per lane line, each sampling the point `ahead` metres in front of the
/// vehicle on that line with Gaussian error `noise`.
pub fn lane_detection(
    source: &Feed,
    lines: &[f64],
    ahead: f64,
    noise: Point,
    sample_period: f64,
    seed: u64,
) -> ActorList {
    let mut list = ActorList::new();
    for (i, &y) in lines.iter().enumerate() {
        let traj = Trajectory::new(source.clone())
            .with_sampler(Sampler::Lane { y, scale: noise })
            .with_offset(Point::new(ahead, 0.0))
            .with_period(sample_period)
            .with_seed(seed.wrapping_add(i as u64));
        list.push(traj);
    }
    list
}

#[cfg(test)]
#[path = "../../tests/unit/content/trajectory.rs"]
mod tests;
