//! Errors that end a run.
//!
//! Transient input misses (no frame, no hand) are not errors; they surface as "no sample".

use std::path::PathBuf;

use thiserror::Error;

use crate::input::DetectorError;

#[derive(Error, Debug)]
pub enum GameError {
    /// The hand detector failed on a frame (as opposed to finding no hands).
    #[error("hand detector fault: {0}")]
    Detector(#[from] DetectorError),

    /// The config file exists but could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for `GameConfig`.
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A config value that cannot be sanitized into something playable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Window or surface failure in the headful runtime.
    #[error(transparent)]
    Engine(#[from] engine::error::EngineError),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
