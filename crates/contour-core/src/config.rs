//! Configuration for the contour pipeline.

use crate::error::{ContourError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest width kept without rescaling, and the rescale target width.
pub const DEFAULT_MAX_WIDTH: usize = 2048;
/// Largest height kept without rescaling, and the rescale target height.
pub const DEFAULT_MAX_HEIGHT: usize = 2048;
/// Grid step in pixels along both axes.
pub const DEFAULT_STEP: usize = 8;
/// Brightness cutoff separating bright from dark samples.
pub const DEFAULT_THRESHOLD: u8 = 200;

fn default_max_width() -> usize {
    DEFAULT_MAX_WIDTH
}

fn default_max_height() -> usize {
    DEFAULT_MAX_HEIGHT
}

fn default_step() -> usize {
    DEFAULT_STEP
}

fn default_threshold() -> u8 {
    DEFAULT_THRESHOLD
}

/// Tunable parameters for a contour render.
///
/// Every field has a default, so a settings file only needs the fields it
/// wants to override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Images wider than this are rescaled down to exactly this width.
    #[serde(default = "default_max_width")]
    pub max_width: usize,

    /// Images taller than this are rescaled down to exactly this height.
    #[serde(default = "default_max_height")]
    pub max_height: usize,

    /// Horizontal distance in pixels between grid samples.
    #[serde(default = "default_step")]
    pub step_x: usize,

    /// Vertical distance in pixels between grid samples.
    #[serde(default = "default_step")]
    pub step_y: usize,

    /// A sample brighter than this is an empty cell, otherwise a full one.
    #[serde(default = "default_threshold")]
    pub threshold: u8,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            step_x: DEFAULT_STEP,
            step_y: DEFAULT_STEP,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ContourError::invalid_config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ContourError::invalid_config(e.to_string()))
    }

    /// Validate the configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.step_x == 0 {
            return Err("step_x must be >= 1".to_string());
        }

        if self.step_y == 0 {
            return Err("step_y must be >= 1".to_string());
        }

        // The resampler divides by (target - 1).
        if self.max_width < 2 {
            return Err("max_width must be >= 2".to_string());
        }

        if self.max_height < 2 {
            return Err("max_height must be >= 2".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.max_width, 2048);
        assert_eq!(config.max_height, 2048);
        assert_eq!(config.step_x, 8);
        assert_eq!(config.step_y, 8);
        assert_eq!(config.threshold, 200);
    }

    #[test]
    fn test_config_validation() {
        let mut config = PipelineConfig::default();
        assert!(config.validate().is_ok());

        config.step_x = 0;
        assert!(config.validate().is_err());

        config = PipelineConfig::default();
        config.step_y = 0;
        assert!(config.validate().is_err());

        config = PipelineConfig::default();
        config.max_width = 1;
        assert!(config.validate().is_err());

        config = PipelineConfig::default();
        config.max_height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_partial_fields_use_defaults() {
        let config = PipelineConfig::from_json(r#"{"threshold": 128}"#).unwrap();
        assert_eq!(config.threshold, 128);
        assert_eq!(config.max_width, 2048);
        assert_eq!(config.step_x, 8);
    }

    #[test]
    fn test_from_json_full() {
        let json = r#"{
            "max_width": 512,
            "max_height": 256,
            "step_x": 4,
            "step_y": 2,
            "threshold": 90
        }"#;

        let config = PipelineConfig::from_json(json).unwrap();
        assert_eq!(config.max_width, 512);
        assert_eq!(config.max_height, 256);
        assert_eq!(config.step_x, 4);
        assert_eq!(config.step_y, 2);
        assert_eq!(config.threshold, 90);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(PipelineConfig::from_json("not json").is_err());
    }
}
