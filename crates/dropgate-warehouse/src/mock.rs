//! Built-in rows for running without a warehouse

use async_trait::async_trait;

use crate::error::{Result, WarehouseError};
use crate::query::WarehouseQuery;
use crate::source::{DataSource, QueryResult, Row};

/// Serves fixed cost-center and WBS rows.
///
/// Rows are filtered by a case-insensitive "contains" on value or label using the
/// first text parameter, and cut to a trailing integer limit when one is present.
#[derive(Debug, Clone, Default)]
pub struct MockDataSource;

impl MockDataSource {
    pub fn new() -> Self {
        Self
    }

    fn rows_for(data_type: &str) -> Option<Vec<Row>> {
        let rows = match data_type {
            "cc" | "cost_centers" => vec![
                Row::new("1000", "1000 - IT Department"),
                Row::new("2000", "2000 - Finance Department"),
                Row::new("3000", "3000 - Marketing Department"),
                Row::new("4000", "4000 - Operations"),
                Row::new("5000", "5000 - Human Resources"),
            ],
            "wbs" => vec![
                Row::new("WBS001", "WBS001 - Project Alpha"),
                Row::new("WBS002", "WBS002 - Project Beta"),
                Row::new("WBS003", "WBS003 - Project Gamma"),
                Row::new("WBS004", "WBS004 - Project Delta"),
                Row::new("WBS005", "WBS005 - Project Epsilon"),
            ],
            _ => return None,
        };
        Some(rows)
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch(&self, query: &WarehouseQuery) -> Result<QueryResult> {
        let data_type = query.source.data_type().unwrap_or_default();
        let rows = Self::rows_for(data_type)
            .ok_or_else(|| WarehouseError::UnknownDataType(data_type.to_string()))?;

        let term = query
            .params
            .first()
            .and_then(|p| p.as_text())
            .unwrap_or_default()
            .to_lowercase();

        let mut rows: Vec<Row> = rows
            .into_iter()
            .filter(|row| {
                term.is_empty()
                    || row.value.to_lowercase().contains(&term)
                    || row.label.to_lowercase().contains(&term)
            })
            .collect();

        if let Some(limit) = query.params.last().and_then(|p| p.as_integer()) {
            rows.truncate(usize::try_from(limit).unwrap_or(0));
        }

        Ok(QueryResult {
            rows,
            source: format!("{} (mock)", data_type),
        })
    }
}
