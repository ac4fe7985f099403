use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::foundation::{
    color::Color,
    error::{ReelError, ReelResult},
};

/// Frame writes allowed in flight at once unless configured otherwise.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 30;

/// Scene-wide settings, loadable from JSON.
///
/// Every field has a default, so a JSON file only lists what it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Scene name: frame directory `<out_root>/<name>/`, video `<out_root>/<name>.mp4`.
    pub name: String,
    /// Root output directory.
    pub out_root: PathBuf,
    /// Simulated length in seconds.
    pub duration: f64,
    /// Frames per simulated second.
    pub fps: u32,
    /// Simulated seconds per video second.
    pub speed_factor: f64,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Color the frames are flattened over.
    pub background: Color,
    /// Paint the current time on every frame.
    pub debug: bool,
    /// Frame writes allowed in flight at once.
    pub max_in_flight: usize,
    /// Font file for text. Falls back to a system sans-serif face when unset.
    pub font_path: Option<PathBuf>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            name: "scene".to_owned(),
            out_root: PathBuf::from("out"),
            duration: 10.0,
            fps: 60,
            speed_factor: 1.0,
            width: 1600,
            height: 1200,
            background: Color::WHITE,
            debug: false,
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            font_path: None,
        }
    }
}

impl SceneConfig {
    /// Defaults with `name` and `duration` set.
    pub fn new(name: impl Into<String>, duration: f64) -> Self {
        Self {
            name: name.into(),
            duration,
            ..Self::default()
        }
    }

    /// Parse JSON from `path`, then validate.
    pub fn from_json_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open scene config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            ReelError::validation(format!("parse scene config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject settings the driver or the encoder cannot honor.
    pub fn validate(&self) -> ReelResult<()> {
        if self.name.trim().is_empty() {
            return Err(ReelError::validation("scene name must be non-empty"));
        }
        if self.name.contains(['/', '\\']) {
            return Err(ReelError::validation(format!(
                "scene name '{}' must not contain path separators",
                self.name
            )));
        }
        if !self.duration.is_finite() || self.duration <= 0.0 {
            return Err(ReelError::validation("duration must be finite and > 0"));
        }
        if self.fps == 0 {
            return Err(ReelError::validation("fps must be > 0"));
        }
        if !self.speed_factor.is_finite() || self.speed_factor <= 0.0 {
            return Err(ReelError::validation("speed_factor must be finite and > 0"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ReelError::validation("frame width/height must be non-zero"));
        }
        if self.width > u32::from(u16::MAX) || self.height > u32::from(u16::MAX) {
            return Err(ReelError::validation(format!(
                "frame size {}x{} exceeds {}",
                self.width,
                self.height,
                u16::MAX
            )));
        }
        if self.width % 2 != 0 || self.height % 2 != 0 {
            return Err(ReelError::validation(format!(
                "frame size {}x{} must be even for yuv420p",
                self.width, self.height
            )));
        }
        if self.max_in_flight == 0 {
            return Err(ReelError::validation("max_in_flight must be > 0"));
        }
        Ok(())
    }

    /// Simulated seconds between ticks.
    pub fn dt(&self) -> f64 {
        self.speed_factor / f64::from(self.fps)
    }

    /// Ticks in a full run: `floor(duration * fps)`.
    pub fn total_ticks(&self) -> u64 {
        (self.duration * f64::from(self.fps)).floor() as u64
    }

    /// Directory holding the numbered frames.
    pub fn frame_dir(&self) -> PathBuf {
        self.out_root.join(&self.name)
    }

    /// Path of the assembled video.
    pub fn video_path(&self) -> PathBuf {
        self.out_root.join(format!("{}.mp4", self.name))
    }
}

/// Per-run options of [`crate::Scene::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunOpts {
    /// First rendered instant in seconds; ticks before it are simulated only.
    pub start_time: Option<f64>,
    /// Rendering stops at this instant (exclusive).
    pub end_time: Option<f64>,
    /// Seconds of trailing still frames.
    pub freeze_secs: Option<f64>,
}

impl RunOpts {
    /// Render every tick, no freeze.
    pub fn full() -> Self {
        Self::default()
    }

    /// Render only ticks in `[start, end)` seconds.
    pub fn window(start: f64, end: f64) -> Self {
        Self {
            start_time: Some(start),
            end_time: Some(end),
            freeze_secs: None,
        }
    }

    /// Append `secs` of copies of the last frame.
    pub fn with_freeze(mut self, secs: f64) -> Self {
        self.freeze_secs = Some(secs);
        self
    }

    /// Rendered tick range `[start, end)` for a run of `total` ticks at `fps`.
    pub fn tick_range(&self, fps: u32, total: u64) -> ReelResult<(u64, u64)> {
        let fps = f64::from(fps);
        let to_tick = |label: &str, secs: f64| -> ReelResult<u64> {
            if !secs.is_finite() || secs < 0.0 {
                return Err(ReelError::validation(format!(
                    "{label} must be finite and >= 0, got {secs}"
                )));
            }
            Ok((secs * fps).floor() as u64)
        };
        let start = self
            .start_time
            .map(|s| to_tick("start_time", s))
            .transpose()?
            .unwrap_or(0);
        let end = self
            .end_time
            .map(|s| to_tick("end_time", s))
            .transpose()?
            .unwrap_or(total)
            .min(total);
        if start > end {
            return Err(ReelError::validation(format!(
                "render window start tick {start} is after end tick {end}"
            )));
        }
        Ok((start, end))
    }

    /// Number of trailing copies: `floor(freeze_secs * fps)`.
    pub fn freeze_frames(&self, fps: u32) -> ReelResult<u64> {
        match self.freeze_secs {
            None => Ok(0),
            Some(s) if s.is_finite() && s >= 0.0 => Ok((s * f64::from(fps)).floor() as u64),
            Some(s) => Err(ReelError::validation(format!(
                "freeze_secs must be finite and >= 0, got {s}"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
