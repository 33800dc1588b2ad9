//! Wall tuning
//!
//! Loaded from JSON so wall behaviour can be tweaked without a rebuild.
//! Every field falls back to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a [`WallConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must be zero or more, got {value}")]
    Negative { field: &'static str, value: i32 },
    #[error("power_up_chance must be within 0..=1, got {0}")]
    Probability(f64),
}

/// Wall tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallConfig {
    /// Preferred brick width in pixels (stretched to tile the surface)
    pub target_brick_width: f32,
    /// Brick height in pixels
    pub brick_height: f32,
    /// Hidden ribbon columns past each side of the surface
    pub edge_buffer_columns: i32,
    /// Rows between a surface edge and its row limit
    pub row_margin: i32,
    /// Rows inside a row limit where bricks ignore that side's hits
    pub inert_row_offset: i32,
    /// Chance a repair brick carries a power-up
    pub power_up_chance: f64,
    /// RNG seed for repair power-ups
    pub seed: u64,
}

impl Default for WallConfig {
    fn default() -> Self {
        Self {
            target_brick_width: TARGET_BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            edge_buffer_columns: EDGE_BUFFER_COLUMNS,
            row_margin: ROW_MARGIN,
            inert_row_offset: INERT_ROW_OFFSET,
            power_up_chance: POWER_UP_CHANCE,
            seed: 0,
        }
    }
}

impl WallConfig {
    /// Parse and validate a config from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded wall config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("target_brick_width", self.target_brick_width),
            ("brick_height", self.brick_height),
        ] {
            if value.is_nan() || value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("edge_buffer_columns", self.edge_buffer_columns),
            ("row_margin", self.row_margin),
            ("inert_row_offset", self.inert_row_offset),
        ] {
            if value < 0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if !(0.0..=1.0).contains(&self.power_up_chance) {
            return Err(ConfigError::Probability(self.power_up_chance));
        }
        Ok(())
    }

    /// Builder-style seed override
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = WallConfig::from_json(r#"{ "seed": 42, "row_margin": 3 }"#).unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.row_margin, 3);
        assert_eq!(config.brick_height, BRICK_HEIGHT);
        assert_eq!(config.power_up_chance, POWER_UP_CHANCE);
    }

    #[test]
    fn test_json_round_trip() {
        let config = WallConfig::default().with_seed(7);
        let json = config.to_json().unwrap();
        assert_eq!(WallConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = WallConfig::from_json(r#"{ "brick_height": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { field: "brick_height", .. }));

        let err = WallConfig::from_json(r#"{ "power_up_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Probability(_)));

        let err = WallConfig::from_json(r#"{ "row_margin": -1 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Negative { field: "row_margin", value: -1 }));

        let err = WallConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = WallConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
