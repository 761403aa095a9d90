//! Data-source errors

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WarehouseError>;

/// Failures raised while fetching rows.
///
/// Messages may contain driver detail and query text; they are for logs only.
#[derive(Debug, Error)]
pub enum WarehouseError {
    #[error("Warehouse unavailable: {0}")]
    Unavailable(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Unknown data type: {0}")]
    UnknownDataType(String),

    #[error("Query timed out after {0} seconds")]
    Timeout(u64),

    #[error("Query cancelled")]
    Cancelled,
}

impl WarehouseError {
    /// Whether the same request may succeed if tried again later
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            WarehouseError::Unavailable(_) | WarehouseError::Timeout(_) | WarehouseError::Cancelled
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable() {
        assert!(WarehouseError::Unavailable("down".into()).is_retryable());
        assert!(WarehouseError::Timeout(30).is_retryable());
        assert!(WarehouseError::Cancelled.is_retryable());
        assert!(!WarehouseError::Query("syntax".into()).is_retryable());
        assert!(!WarehouseError::UnknownDataType("x".into()).is_retryable());
    }
}
