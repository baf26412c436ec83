//! Error types for the skillradar scoring system
//!
//! Scoring itself is total and never fails. Errors only arise at the edges:
//! reading configuration, ingesting loosely typed log records, and the log
//! store's file I/O.

use thiserror::Error;

use crate::scoring::config::ConfigError;

/// Main error type for skillradar operations
#[derive(Error, Debug)]
pub enum RadarError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A record could not be turned into a calibration log
    #[error("Invalid calibration log: {0}")]
    InvalidLog(String),

    /// A log with the same id is already stored
    #[error("Calibration log already exists: {0}")]
    AlreadyExists(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for skillradar operations
pub type Result<T> = std::result::Result<T, RadarError>;

/// Convert anyhow::Error to RadarError
impl From<anyhow::Error> for RadarError {
    fn from(err: anyhow::Error) -> Self {
        RadarError::Other(err.to_string())
    }
}
