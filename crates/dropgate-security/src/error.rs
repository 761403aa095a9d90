//! Admission failures

use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Denial>;

/// Why a request was not admitted.
///
/// Carries the category and a short client-safe message only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Denial {
    /// Client address not on the allow-list
    #[error("forbidden")]
    Forbidden,

    /// Missing or invalid credential
    #[error("{0}")]
    Unauthorized(String),

    /// Trailing window exhausted
    #[error("rate limit exceeded")]
    RateLimited {
        /// Time until the oldest request in the window leaves it
        retry_after: Duration,
    },
}

impl Denial {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Denial::Unauthorized(message.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Denial::Forbidden => "forbidden",
            Denial::Unauthorized(_) => "unauthorized",
            Denial::RateLimited { .. } => "rate_limited",
        }
    }
}
