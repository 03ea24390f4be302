//! Configuration for a simulation run.
//!
//! Maps onto a `config.toml` file. Every section is optional; missing
//! values fall back to the `Default` impls.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! seed = 42
//! log_interval = 100
//!
//! [grid]
//! width = 512
//! height = 512
//! buffering = "lookback"
//! stamp_mode = "void_color"
//!
//! [thresholds]
//! under = 2.0
//! over = 3.0
//! # preset = "game_of_life"   # overrides under/over when set
//!
//! [init]
//! red = 1.0
//! green = 0.5
//! blue = 0.0
//! ```

use crate::brush::StampMode;
use crate::buffers::BufferMode;
use crate::init::Intensity;
use crate::rule::{ThresholdPreset, Thresholds};
use serde::{Deserialize, Serialize};

/// Largest accepted grid side.
pub const MAX_DIMENSION: usize = 8192;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    pub buffering: BufferMode,
    pub stamp_mode: StampMode,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            buffering: BufferMode::Double,
            stamp_mode: StampMode::AlphaOnly,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ThresholdConfig {
    pub under: f32,
    pub over: f32,
    pub preset: Option<ThresholdPreset>,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        let (under, over) = ThresholdPreset::StableLand.pair();
        Self {
            under,
            over,
            preset: None,
        }
    }
}

impl ThresholdConfig {
    /// The preset's pair when one is set, otherwise `under`/`over`.
    pub fn resolve(&self) -> crate::error::Result<Thresholds> {
        match self.preset {
            Some(preset) => Ok(preset.thresholds()),
            None => Thresholds::new(self.under, self.over),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub grid: GridConfig,
    pub thresholds: ThresholdConfig,
    pub init: Intensity,
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Steps between `info` summaries.
    pub log_interval: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            thresholds: ThresholdConfig::default(),
            init: Intensity::FULL,
            seed: None,
            log_interval: 1000,
        }
    }
}

impl SimulationConfig {
    /// Validates all configuration parameters.
    ///
    /// # Validation Rules
    /// - Grid dimensions must be positive and at most [`MAX_DIMENSION`]
    /// - Thresholds must be accepted by [`Thresholds::new`]
    /// - Intensities must be finite and non-negative
    /// - `log_interval` must be positive
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.grid.width > 0, "Grid width must be positive");
        anyhow::ensure!(
            self.grid.width <= MAX_DIMENSION,
            "Grid width too large (max {MAX_DIMENSION})"
        );
        anyhow::ensure!(self.grid.height > 0, "Grid height must be positive");
        anyhow::ensure!(
            self.grid.height <= MAX_DIMENSION,
            "Grid height too large (max {MAX_DIMENSION})"
        );

        self.thresholds.resolve()?;

        for (name, v) in [
            ("red", self.init.red),
            ("green", self.init.green),
            ("blue", self.init.blue),
        ] {
            anyhow::ensure!(
                v.is_finite() && v >= 0.0,
                "Init {name} intensity must be finite and non-negative"
            );
        }

        anyhow::ensure!(self.log_interval > 0, "Log interval must be positive");
        Ok(())
    }

    /// Parses and validates a `config.toml` document.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        use anyhow::Context;
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parsing {}", path.display()))
    }

    /// Hash of the fields that influence simulation results.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.grid).as_bytes());
        hasher.update(format!("{:?}", self.thresholds).as_bytes());
        hasher.update(format!("{:?}", self.init).as_bytes());
        hasher.update(format!("{:?}", self.seed).as_bytes());
        hex::encode(hasher.finalize())
    }
}
