//! Configuration document types

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root of the configuration document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    /// Searchable data types, in presentation order
    #[serde(default)]
    pub data_types: Vec<DataTypeDefinition>,
    /// Data type the frontend selects initially
    #[serde(default)]
    pub default_data_type: String,
    /// Response cache settings
    #[serde(default)]
    pub cache_settings: CacheSettings,
    /// Search-UI settings
    #[serde(default)]
    pub search_settings: SearchSettings,
}

/// One searchable entity: query template plus display metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DataTypeDefinition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Parameterized query template using `?` placeholders
    #[serde(default)]
    pub query: String,
    /// Columns matched against the search term, one placeholder each
    #[serde(default)]
    pub search_fields: Vec<String>,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub enabled: bool,
}

impl DataTypeDefinition {
    /// Count `?` placeholders in the template, ignoring any inside single-quoted literals.
    pub fn placeholder_count(&self) -> usize {
        let mut in_literal = false;
        let mut count = 0;
        for ch in self.query.chars() {
            match ch {
                '\'' => in_literal = !in_literal,
                '?' if !in_literal => count += 1,
                _ => {}
            }
        }
        count
    }

    /// Placeholders the template must carry: the empty-term check plus one per search field.
    pub fn base_placeholders(&self) -> usize {
        self.search_fields.len() + 1
    }

    /// Whether the template ends with a result-limit placeholder.
    pub fn takes_limit(&self) -> bool {
        self.placeholder_count() == self.base_placeholders() + 1
    }
}

/// Longest accepted cache TTL: one year
pub const MAX_TTL_MINUTES: u64 = 365 * 24 * 60;

/// Response cache settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CacheSettings {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub ttl_minutes: u64,
}

impl CacheSettings {
    /// Configured TTL, `None` when unset (0) or beyond [`MAX_TTL_MINUTES`]
    pub fn ttl(&self) -> Option<Duration> {
        if self.ttl_minutes == 0 || self.ttl_minutes > MAX_TTL_MINUTES {
            return None;
        }
        self.ttl_minutes.checked_mul(60).map(Duration::from_secs)
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_minutes: 60,
        }
    }
}

/// Search-UI settings forwarded to the frontend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchSettings {
    #[serde(default)]
    pub min_search_length: u32,
    #[serde(default)]
    pub debounce_ms: u32,
    /// Upper bound passed to templates that take a limit placeholder; 0 disables
    #[serde(default)]
    pub max_results: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            min_search_length: 2,
            debounce_ms: 300,
            max_results: 100,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            data_types: vec![
                DataTypeDefinition {
                    id: "cc".to_string(),
                    name: "Cost Centers".to_string(),
                    description: "Company cost centers".to_string(),
                    query: "SELECT COST_CENTER_NUMBER as value, COST_CENTER_NUMBER || ' - ' || COST_CENTER_NAME as label \
                            FROM FINANCE_AND_ACCOUNTING.golden.cost_center \
                            WHERE (? = '' OR COST_CENTER_NUMBER LIKE ? OR COST_CENTER_NAME LIKE ?) \
                            ORDER BY COST_CENTER_NUMBER LIMIT 100"
                        .to_string(),
                    search_fields: vec![
                        "COST_CENTER_NUMBER".to_string(),
                        "COST_CENTER_NAME".to_string(),
                    ],
                    icon: "💰".to_string(),
                    enabled: true,
                },
                DataTypeDefinition {
                    id: "wbs".to_string(),
                    name: "WBS Elements".to_string(),
                    description: "Work Breakdown Structure elements".to_string(),
                    query: "SELECT WBS_NUMBER as value, WBS_NUMBER || ' - ' || WBS_DESCRIPTION as label \
                            FROM FINANCE_AND_ACCOUNTING.golden.wbs \
                            WHERE (? = '' OR WBS_NUMBER LIKE ? OR WBS_DESCRIPTION LIKE ?) \
                            ORDER BY WBS_NUMBER LIMIT 100"
                        .to_string(),
                    search_fields: vec!["WBS_NUMBER".to_string(), "WBS_DESCRIPTION".to_string()],
                    icon: "📊".to_string(),
                    enabled: true,
                },
            ],
            default_data_type: "cc".to_string(),
            cache_settings: CacheSettings::default(),
            search_settings: SearchSettings::default(),
        }
    }
}
