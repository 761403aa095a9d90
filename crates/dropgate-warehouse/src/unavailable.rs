//! Stand-in for a warehouse that could not be reached at startup

use async_trait::async_trait;

use crate::error::{Result, WarehouseError};
use crate::query::WarehouseQuery;
use crate::source::{DataSource, QueryResult};

/// Fails every fetch with a retryable [`WarehouseError::Unavailable`]
#[derive(Debug, Clone)]
pub struct UnavailableDataSource {
    reason: String,
}

impl UnavailableDataSource {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl DataSource for UnavailableDataSource {
    fn name(&self) -> &str {
        "unavailable"
    }

    async fn fetch(&self, query: &WarehouseQuery) -> Result<QueryResult> {
        tracing::debug!(source = %query.source, "Rejecting query, warehouse unavailable");
        Err(WarehouseError::Unavailable(self.reason.clone()))
    }
}
