//! Advisory service error types

use thiserror::Error;

/// Result type for advisory operations
pub type AdvisoryResult<T> = Result<T, AdvisoryError>;

/// Advisory service error types
#[derive(Error, Debug)]
pub enum AdvisoryError {
    #[error("prediction service unavailable: {message}")]
    PredictionUnavailable { message: String },

    #[error("unexpected response shape from {endpoint}: missing field `{field}`")]
    UnexpectedResponseShape { endpoint: String, field: String },

    #[error("persistence failed: {message}")]
    Persistence { message: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AdvisoryError {
    /// Shorthand for configuration failures during startup
    pub fn config(message: impl Into<String>) -> Self {
        AdvisoryError::Config {
            message: message.into(),
        }
    }

    /// Shorthand for persistence failures outside of sqlx's own error type
    pub fn persistence(message: impl Into<String>) -> Self {
        AdvisoryError::Persistence {
            message: message.into(),
        }
    }
}
