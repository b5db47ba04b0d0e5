use std::path::PathBuf;

use thiserror::Error;

/// Contract violations from the input side of an engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("elapsed time must be finite and non-negative, got {0} ms")]
    InvalidElapsed(f64),
    #[error("point ({x}, {y}) is outside the logical canvas")]
    PointOutOfBounds { x: f64, y: f64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}
