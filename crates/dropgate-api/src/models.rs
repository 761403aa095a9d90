//! API request and response models

use chrono::{DateTime, Utc};
use dropgate_config::{DataTypeDefinition, SearchSettings};
use dropgate_warehouse::Row;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// One dropdown option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DropdownItem {
    pub value: String,
    pub label: String,
}

impl From<Row> for DropdownItem {
    fn from(row: Row) -> Self {
        Self {
            value: row.value,
            label: row.label,
        }
    }
}

/// Search response envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DropdownResponse {
    pub data: Vec<DropdownItem>,
    pub metadata: Metadata,
}

impl DropdownResponse {
    /// Fresh (uncached) response for fetched rows
    pub fn fetched(rows: Vec<Row>, source: String) -> Self {
        let data: Vec<DropdownItem> = rows.into_iter().map(DropdownItem::from).collect();
        Self {
            metadata: Metadata {
                exported_at: Utc::now(),
                row_count: data.len(),
                source,
                cached: false,
            },
            data,
        }
    }
}

/// Response metadata
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Metadata {
    /// When the rows were fetched from the data source
    pub exported_at: DateTime<Utc>,
    pub row_count: usize,
    /// Identifier of the data source that produced the rows
    pub source: String,
    /// Served from the response cache
    pub cached: bool,
}

/// Data type entry in `/api/config`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DataTypeInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
}

impl From<&DataTypeDefinition> for DataTypeInfo {
    fn from(dt: &DataTypeDefinition) -> Self {
        Self {
            id: dt.id.clone(),
            name: dt.name.clone(),
            description: dt.description.clone(),
            icon: dt.icon.clone(),
        }
    }
}

/// Data type entry in `/api/types`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DataTypeSummary {
    pub id: String,
    pub name: String,
    pub icon: String,
}

impl From<&DataTypeDefinition> for DataTypeSummary {
    fn from(dt: &DataTypeDefinition) -> Self {
        Self {
            id: dt.id.clone(),
            name: dt.name.clone(),
            icon: dt.icon.clone(),
        }
    }
}

/// Search-UI settings sent to the frontend
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClientSearchSettings {
    pub min_search_length: u32,
    pub debounce_ms: u32,
}

impl From<&SearchSettings> for ClientSearchSettings {
    fn from(settings: &SearchSettings) -> Self {
        Self {
            min_search_length: settings.min_search_length,
            debounce_ms: settings.debounce_ms,
        }
    }
}

/// Frontend configuration
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub data_types: Vec<DataTypeInfo>,
    pub default_type: String,
    pub search_settings: ClientSearchSettings,
}

/// Body of `POST /api/dynamic-search`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DynamicSearchRequest {
    /// Query text; must start with SELECT
    #[serde(default)]
    pub query: String,
    /// Positional parameters bound as text
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub data_type: Option<String>,
}

/// Search query string
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Search term; empty or absent means no filter
    #[serde(default)]
    pub q: String,
}

/// Liveness response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Current UTC time, RFC 3339
    pub time: String,
    pub version: String,
    pub uptime_seconds: u64,
    /// Entries currently held by the response cache
    pub cache_entries: usize,
    /// Searches answered from the cache since startup
    pub cache_hits: u64,
    pub cache_misses: u64,
}
