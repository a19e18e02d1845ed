//! Error types for the page-alerts crate.

use thiserror::Error;

/// Errors that can occur when building alerts or loading configuration.
///
/// Queue operations themselves never fail: an out-of-range dismissal is a
/// no-op and missing options default to off.
#[derive(Debug, Error)]
pub enum AlertError {
    /// Legacy call arguments matched none of the recognized shapes.
    #[error("unrecognized alert arguments: {reason}")]
    UnrecognizedArguments {
        /// Why the arguments were rejected.
        reason: String,
    },

    /// Alert options were not an object or carried wrongly-typed fields.
    #[error("invalid alert options: {reason}")]
    InvalidOptions {
        /// Why the options were rejected.
        reason: String,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {reason}")]
    Config {
        /// Why the configuration was rejected.
        reason: String,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for AlertError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for alert operations.
pub type Result<T> = std::result::Result<T, AlertError>;
