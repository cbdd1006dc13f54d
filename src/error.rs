//! Error types for settings validation and persistence

use std::path::PathBuf;
use thiserror::Error;

/// Rejected settings input. Reported to the user, never changes timer state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a whole number of minutes")]
    NotANumber { field: &'static str, value: String },

    #[error("{field}: duration must be greater than zero")]
    NonPositive { field: &'static str },

    #[error("{field}: {value} is outside the allowed range {min}-{max}")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: u64,
        max: u64,
    },
}

/// Settings file could not be read or written.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings file {path} is malformed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("settings file {path} holds an invalid record: {reason}")]
    InvalidRecord { path: PathBuf, reason: String },
}
