//! Data-source interface

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::query::WarehouseQuery;

/// One result row: the stored value and its display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub value: String,
    pub label: String,
}

impl Row {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Rows returned for a query and the source identifier reported to clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub rows: Vec<Row>,
    pub source: String,
}

/// Executes warehouse queries.
///
/// Implementations own connectivity and any retry policy. Callers bound each
/// call with a timeout and may drop the future on cancellation.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    async fn fetch(&self, query: &WarehouseQuery) -> Result<QueryResult>;
}
