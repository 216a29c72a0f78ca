//! Error types for punkt-core
//!
//! Scanning, annotation and training never fail. Only loading trained
//! parameters and trainer configuration can produce an error.

use thiserror::Error;

/// Error type for fallible operations
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid trainer configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Persisted parameter data is malformed
    #[error("Invalid parameters: {0}")]
    Parameters(String),

    /// JSON encoding or decoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML decoding failure
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O failure while reading or writing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for fallible operations
pub type Result<T> = std::result::Result<T, Error>;
