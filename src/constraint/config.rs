//! Configuration for the constraint engine

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::geometry::MAX_PRECISION;

/// Errors that can occur when loading an engine configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read engine config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse engine config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("precision {precision} is out of range (at most {max} decimal places)")]
    InvalidPrecision { precision: u32, max: u32 },
}

/// Configuration options for constraint resolution
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Decimal places coordinates are rounded to before the resolver compares them
    pub precision: u32,

    /// Run configuration diagnostics on every sample and log the findings
    pub diagnostics: bool,

    /// Emit boundary lines to the visualization sink
    pub markers: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            precision: 2,
            diagnostics: false,
            markers: false,
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a configuration from a TOML string; missing keys keep their defaults
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        if config.precision > MAX_PRECISION {
            return Err(ConfigError::InvalidPrecision {
                precision: config.precision,
                max: MAX_PRECISION,
            });
        }
        Ok(config)
    }

    /// Set the rounding precision in decimal places, capped at [`MAX_PRECISION`]
    pub fn with_precision(mut self, places: u32) -> Self {
        self.precision = places.min(MAX_PRECISION);
        self
    }

    /// Enable or disable per-sample diagnostics
    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }

    /// Enable or disable visualization markers
    pub fn with_markers(mut self, enabled: bool) -> Self {
        self.markers = enabled;
        self
    }
}
