//! Engine configuration with documented defaults
//!
//! Everything here can be overridden from a TOML file. Missing keys fall back
//! to the defaults below, so a partial file is always valid input.

use crate::core::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration for a game session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Map generation parameters
    pub map: MapConfig,
    /// Ore seeding parameters
    pub ore: OreConfig,
    /// Meta-progression limits for new players
    pub progression: ProgressionConfig,
}

/// Size and seed of a freshly generated map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub height: usize,
    pub width: usize,
    /// Seed for ore placement. The same seed always yields the same deposits.
    pub seed: u64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            height: 16,
            width: 16,
            seed: 0,
        }
    }
}

/// Two-stage ore draw: a Bernoulli trial per chunk, then a weighted pick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OreConfig {
    /// Probability that a chunk holds any deposit at all
    ///
    /// At 0.3 roughly a third of the map is minable.
    pub presence_probability: f64,

    /// Relative weight of iron ore among deposits
    pub iron_ore_weight: f64,

    /// Relative weight of gold among deposits
    ///
    /// Gold is worth twice as much as iron ore but cannot be cut, so it is
    /// kept rare (1 in 10 deposits by default).
    pub gold_weight: f64,
}

impl Default for OreConfig {
    fn default() -> Self {
        Self {
            presence_probability: 0.3,
            iron_ore_weight: 0.9,
            gold_weight: 0.1,
        }
    }
}

/// Limits a brand new global profile starts with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Largest map height a new profile may create
    pub initial_max_height: usize,
    /// Largest map width a new profile may create
    pub initial_max_width: usize,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            initial_max_height: 16,
            initial_max_width: 16,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let p = self.ore.presence_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(EngineError::InvalidConfig(format!(
                "ore.presence_probability ({}) must be within [0, 1]",
                p
            )));
        }

        let weights = [self.ore.iron_ore_weight, self.ore.gold_weight];
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(EngineError::InvalidConfig(
                "ore weights must be finite and non-negative".into(),
            ));
        }
        if weights.iter().sum::<f64>() <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "at least one ore weight must be positive".into(),
            ));
        }

        if self.map.height == 0 || self.map.width == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "map must have at least one cell, got {}x{}",
                self.map.height, self.map.width
            )));
        }

        Ok(())
    }
}
