//! Generation settings, loadable from YAML.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assigner::DEFAULT_MAX_ATTEMPTS;
use crate::error::{ConfigError, ConfigLoadError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub random_seed: u64,
    pub grid: DimensionsConfig,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionsConfig {
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_side_length")]
    pub side_length: f32,
    #[serde(default = "default_gap")]
    pub gap: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory for JSON exports. Nothing is written when unset.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

/// Largest tile count a single grid may hold.
pub const MAX_TILES: u64 = 1 << 24;

fn default_name() -> String {
    "grid".to_string()
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_side_length() -> f32 {
    1.0
}

fn default_gap() -> f32 {
    0.05
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl DimensionsConfig {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            side_length: default_side_length(),
            gap: default_gap(),
        }
    }
}

impl GridConfig {
    pub fn new(width: u32, height: u32, random_seed: u64) -> Self {
        Self {
            name: default_name(),
            random_seed,
            grid: DimensionsConfig::new(width, height),
            max_attempts: default_max_attempts(),
            logging: LoggingConfig::default(),
            export: ExportConfig::default(),
        }
    }

    pub fn with_spacing(mut self, side_length: f32, gap: f32) -> Self {
        self.grid.side_length = side_length;
        self.grid.gap = gap;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let grid = &self.grid;
        if grid.width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if grid.height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if !(grid.side_length.is_finite() && grid.side_length > 0.0) {
            return Err(ConfigError::InvalidSideLength(grid.side_length));
        }
        if !(grid.gap.is_finite() && grid.gap >= 0.0) {
            return Err(ConfigError::InvalidGap(grid.gap));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::ZeroMaxAttempts);
        }
        let tiles = u64::from(grid.width) * u64::from(grid.height);
        if tiles > MAX_TILES {
            return Err(ConfigError::TooManyTiles {
                width: grid.width,
                height: grid.height,
                limit: MAX_TILES,
            });
        }
        Ok(())
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigLoadError> {
        let config: GridConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigLoadError> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config = GridConfig::from_yaml_str(
            "name: meadow\nrandom_seed: 3\ngrid:\n  width: 12\n  height: 4\n",
        )
        .unwrap();
        assert_eq!(config.name, "meadow");
        assert_eq!(config.random_seed, 3);
        assert_eq!(config.grid.side_length, 1.0);
        assert_eq!(config.grid.gap, 0.05);
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(config.logging.level, "info");
        assert!(config.export.output_dir.is_none());
    }

    #[test]
    fn test_validation_rejects_bad_dimensions() {
        assert_eq!(
            GridConfig::new(0, 3, 1).validate(),
            Err(ConfigError::ZeroWidth)
        );
        assert_eq!(
            GridConfig::new(3, 0, 1).validate(),
            Err(ConfigError::ZeroHeight)
        );
        assert_eq!(
            GridConfig::new(3, 3, 1).with_spacing(0.0, 0.0).validate(),
            Err(ConfigError::InvalidSideLength(0.0))
        );
        assert_eq!(
            GridConfig::new(3, 3, 1).with_spacing(1.0, -0.1).validate(),
            Err(ConfigError::InvalidGap(-0.1))
        );
        assert!(matches!(
            GridConfig::new(3, 3, 1)
                .with_spacing(f32::NAN, 0.0)
                .validate(),
            Err(ConfigError::InvalidSideLength(_))
        ));
        assert_eq!(
            GridConfig::new(3, 3, 1).with_max_attempts(0).validate(),
            Err(ConfigError::ZeroMaxAttempts)
        );
        assert_eq!(
            GridConfig::new(u32::MAX, u32::MAX, 1).validate(),
            Err(ConfigError::TooManyTiles {
                width: u32::MAX,
                height: u32::MAX,
                limit: MAX_TILES,
            })
        );
        assert_eq!(GridConfig::new(4096, 4096, 1).validate(), Ok(()));
        assert!(GridConfig::new(4097, 4096, 1).validate().is_err());
        assert_eq!(GridConfig::new(3, 3, 1).validate(), Ok(()));
    }

    #[test]
    fn test_invalid_yaml_values_are_rejected() {
        let err = GridConfig::from_yaml_str("grid:\n  width: 0\n  height: 2\n").unwrap_err();
        assert!(matches!(err, ConfigLoadError::Invalid(ConfigError::ZeroWidth)));
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.yaml");
        let config = GridConfig::new(8, 5, 77).with_spacing(2.0, 0.0);
        config.to_yaml(&path).unwrap();
        assert_eq!(GridConfig::from_yaml(&path).unwrap(), config);
    }
}
