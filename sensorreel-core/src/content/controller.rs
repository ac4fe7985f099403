use std::any::Any;

use crate::{
    actor::feed::Feed,
    foundation::{
        error::{ReelError, ReelResult},
        geometry::Point,
    },
};

/// Velocity source driving a [`crate::Vehicle`].
pub trait Controller: Any {
    /// Commanded velocity at `time`, in m/s.
    fn velocity(&mut self, time: f64) -> ReelResult<Point>;
}

/// Fixed velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantVelocity(pub Point);

impl Controller for ConstantVelocity {
    fn velocity(&mut self, _time: f64) -> ReelResult<Point> {
        Ok(self.0)
    }
}

/// Lateral PI(D) controller holding a cruise speed and steering `y` towards `yref`.
///
/// The measurement comes from a [`Feed`], usually the output of a sampled trajectory. While the
/// feed is empty the last commanded velocity is kept.
#[derive(Clone, Debug)]
pub struct PidController {
    speed: Point,
    yref: f64,
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain.
    pub ki: f64,
    /// Derivative gain. Carried for completeness; the lateral law does not use it.
    pub kd: f64,
    e_cum: f64,
    measurement: Option<Feed>,
}

impl PidController {
    /// Controller cruising at `cruise`, steering towards `yref` with `kp = 0.5`.
    pub fn new(cruise: Point, yref: f64) -> Self {
        Self {
            speed: cruise,
            yref,
            kp: 0.5,
            ki: 0.0,
            kd: 0.0,
            e_cum: 0.0,
            measurement: None,
        }
    }

    /// Override the gains.
    pub fn with_gains(mut self, kp: f64, ki: f64, kd: f64) -> Self {
        self.kp = kp;
        self.ki = ki;
        self.kd = kd;
        self
    }

    /// Builder form of [`PidController::set_measurement`].
    pub fn with_measurement(mut self, feed: Feed) -> Self {
        self.set_measurement(feed);
        self
    }

    /// Point the controller at another measurement source.
    pub fn set_measurement(&mut self, feed: Feed) {
        self.measurement = Some(feed);
    }

    /// Current measurement source.
    pub fn measurement(&self) -> Option<&Feed> {
        self.measurement.as_ref()
    }

    /// Decayed error integral.
    pub fn integral(&self) -> f64 {
        self.e_cum
    }
}

impl Controller for PidController {
    fn velocity(&mut self, _time: f64) -> ReelResult<Point> {
        let feed = self
            .measurement
            .as_ref()
            .ok_or_else(|| ReelError::uninitialized("PID controller has no measurement feed"))?;

        if let Some(meas) = feed.latest() {
            let err = self.yref - meas.y;
            self.e_cum = 0.7 * self.e_cum + err;
            self.speed.y = self.kp * err + self.ki * self.e_cum;
        }
        Ok(self.speed)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/controller.rs"]
mod tests;
