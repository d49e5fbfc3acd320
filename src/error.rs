use std::path::PathBuf;

use thiserror::Error;

use crate::assigner::RuleRejections;
use crate::grid::GridCoordinate;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid width must be greater than zero")]
    ZeroWidth,
    #[error("grid height must be greater than zero")]
    ZeroHeight,
    #[error("side length must be a positive finite number, got {0}")]
    InvalidSideLength(f32),
    #[error("gap must be a non-negative finite number, got {0}")]
    InvalidGap(f32),
    #[error("max attempts must be greater than zero")]
    ZeroMaxAttempts,
    #[error("grid of {width}x{height} tiles exceeds the limit of {limit} tiles")]
    TooManyTiles { width: u32, height: u32, limit: u64 },
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),
    #[error(
        "no valid attributes for tile {coordinate} after {attempts} attempts (blocked by {blocking})"
    )]
    UnsatisfiableConstraint {
        coordinate: GridCoordinate,
        attempts: u32,
        blocking: RuleRejections,
    },
}

/// Failure reported by a tile sink or camera framer. Never aborts emission.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("render target unavailable: {0}")]
    MissingRenderTarget(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no camera frame was received before writing")]
    MissingFrame,
    #[error("failed to write export {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode export: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}
