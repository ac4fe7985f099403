//! Built-in demo scenes.

mod assets;
mod cross_check;
mod fusion;

use sensorreel::{ReelResult, Scene, SceneConfig};

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Demo {
    /// GPS spoofing drifts the fused position until the car crashes.
    Fusion,
    /// Lane detection cross-checks the fused position.
    CrossCheck,
}

impl Demo {
    pub fn name(self) -> &'static str {
        match self {
            Self::Fusion => "fusion",
            Self::CrossCheck => "cross-check",
        }
    }

    /// Timeline length in simulated seconds.
    pub fn duration(self) -> f64 {
        match self {
            Self::Fusion => fusion::DURATION,
            Self::CrossCheck => cross_check::DURATION,
        }
    }

    /// Seconds the last frame is held for unless overridden.
    pub fn default_freeze(self) -> f64 {
        match self {
            Self::Fusion => 2.0,
            Self::CrossCheck => 0.0,
        }
    }

    /// Whether `cfg` names the scene something other than the default or this demo.
    fn renames(self, cfg: &SceneConfig) -> bool {
        cfg.name != SceneConfig::default().name && cfg.name != self.name()
    }

    /// Build the scene; `cfg` name and duration are replaced by the demo's own.
    pub fn build(self, mut cfg: SceneConfig) -> ReelResult<Scene> {
        if self.renames(&cfg) {
            tracing::warn!(
                configured = %cfg.name,
                demo = self.name(),
                "configured scene name replaced by the demo name"
            );
        }
        self.name().clone_into(&mut cfg.name);
        cfg.duration = self.duration();
        match self {
            Self::Fusion => fusion::build(cfg),
            Self::CrossCheck => cross_check::build(cfg),
        }
    }
}
