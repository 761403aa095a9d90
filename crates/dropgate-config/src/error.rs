//! Configuration error types

use thiserror::Error;

/// Configuration result type
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Data type '{0}' not found or disabled")]
    NotFoundOrDisabled(String),

    #[error("Environment error: {key}: {message}")]
    Env { key: String, message: String },
}

impl ConfigError {
    pub(crate) fn env(key: &str, message: impl Into<String>) -> Self {
        ConfigError::Env {
            key: key.to_string(),
            message: message.into(),
        }
    }
}
