//! Configuration loading for Reverie.
//!
//! Configuration is loaded from TOML files with environment variable overrides.

use crate::features::BoundaryMode;
use crate::input::{Knobs, BRIGHTNESS, MOTION, SMOKE_DENSITY};
use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "config.default.toml";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ReverieConfig {
    #[serde(default)]
    pub knobs: KnobsConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub scoring: ScoringConfig,

    #[serde(default)]
    pub animation: AnimationConfig,
}

/// Knob values used when the command line leaves them out.
#[derive(Debug, Clone, Deserialize)]
pub struct KnobsConfig {
    #[serde(default = "default_motion")]
    pub motion: f64,

    #[serde(default = "default_smoke_density")]
    pub smoke_density: f64,

    #[serde(default = "default_brightness")]
    pub brightness: f64,
}

impl Default for KnobsConfig {
    fn default() -> Self {
        Self {
            motion: default_motion(),
            smoke_density: default_smoke_density(),
            brightness: default_brightness(),
        }
    }
}

impl KnobsConfig {
    /// Knobs with command-line overrides applied, clamped to their ranges.
    pub fn resolve(
        &self,
        motion: Option<f64>,
        smoke_density: Option<f64>,
        brightness: Option<f64>,
    ) -> Knobs {
        Knobs::new(
            motion.unwrap_or(self.motion),
            smoke_density.unwrap_or(self.smoke_density),
            brightness.unwrap_or(self.brightness),
        )
    }
}

fn default_motion() -> f64 {
    MOTION.default
}

fn default_smoke_density() -> f64 {
    SMOKE_DENSITY.default
}

fn default_brightness() -> f64 {
    BRIGHTNESS.default
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_directory")]
    pub directory: String,

    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default)]
    pub save_schema: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            width: default_width(),
            height: default_height(),
            save_schema: false,
        }
    }
}

fn default_directory() -> String {
    "output".to_string()
}

fn default_width() -> u32 {
    980
}

fn default_height() -> u32 {
    980
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub boundary: BoundaryMode,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "default_frames")]
    pub frames: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
        }
    }
}

fn default_frames() -> u64 {
    12
}

impl ReverieConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false))
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("REVERIE").separator("__"))
            .build()?;

        let reverie_config: ReverieConfig = config.try_deserialize()?;
        Ok(reverie_config)
    }
}
