//! Read-only lookup over the configured data types

use std::collections::HashSet;

use crate::error::{ConfigError, Result};
use crate::types::{DataTypeDefinition, GatewayConfig};

/// Ordered set of data-type definitions loaded from configuration.
///
/// The catalog is never mutated after construction. Duplicate ids are kept as
/// configured and the first enabled entry with a matching id wins.
#[derive(Debug, Clone, Default)]
pub struct DataTypeCatalog {
    definitions: Vec<DataTypeDefinition>,
}

impl DataTypeCatalog {
    pub fn new(definitions: Vec<DataTypeDefinition>) -> Self {
        Self { definitions }
    }

    pub fn from_config(config: &GatewayConfig) -> Self {
        Self::new(config.data_types.clone())
    }

    /// Resolve an enabled definition by id
    pub fn lookup(&self, id: &str) -> Result<&DataTypeDefinition> {
        self.definitions
            .iter()
            .find(|dt| dt.enabled && dt.id == id)
            .ok_or_else(|| ConfigError::NotFoundOrDisabled(id.to_string()))
    }

    /// Enabled definitions in configuration order
    pub fn list_enabled(&self) -> Vec<&DataTypeDefinition> {
        self.definitions.iter().filter(|dt| dt.enabled).collect()
    }

    /// Ids that appear more than once, in order of their second appearance
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for dt in &self.definitions {
            if !seen.insert(dt.id.as_str()) && !duplicates.contains(&dt.id.as_str()) {
                duplicates.push(dt.id.as_str());
            }
        }
        duplicates
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(id: &str, name: &str, enabled: bool) -> DataTypeDefinition {
        DataTypeDefinition {
            id: id.to_string(),
            name: name.to_string(),
            enabled,
            ..Default::default()
        }
    }

    #[test]
    fn test_lookup_enabled() {
        let catalog = DataTypeCatalog::new(vec![dt("cc", "Cost Centers", true)]);
        assert_eq!(catalog.lookup("cc").unwrap().name, "Cost Centers");
    }

    #[test]
    fn test_lookup_disabled_or_missing() {
        let catalog = DataTypeCatalog::new(vec![dt("cc", "Cost Centers", false)]);
        assert!(matches!(
            catalog.lookup("cc"),
            Err(ConfigError::NotFoundOrDisabled(id)) if id == "cc"
        ));
        assert!(matches!(
            catalog.lookup("wbs"),
            Err(ConfigError::NotFoundOrDisabled(_))
        ));
    }

    #[test]
    fn test_first_match_wins() {
        let catalog = DataTypeCatalog::new(vec![
            dt("cc", "first", true),
            dt("cc", "second", true),
        ]);
        assert_eq!(catalog.lookup("cc").unwrap().name, "first");
        assert_eq!(catalog.duplicate_ids(), vec!["cc"]);
    }

    #[test]
    fn test_disabled_duplicate_does_not_shadow() {
        let catalog = DataTypeCatalog::new(vec![
            dt("cc", "off", false),
            dt("cc", "on", true),
        ]);
        assert_eq!(catalog.lookup("cc").unwrap().name, "on");
    }

    #[test]
    fn test_list_enabled_keeps_order() {
        let catalog = DataTypeCatalog::new(vec![
            dt("wbs", "WBS", true),
            dt("gl", "GL", false),
            dt("cc", "CC", true),
        ]);
        let ids: Vec<_> = catalog.list_enabled().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["wbs", "cc"]);
    }
}
