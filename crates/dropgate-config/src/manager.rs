//! Configuration document loading and validation

use std::path::{Path, PathBuf};

use crate::catalog::DataTypeCatalog;
use crate::error::{ConfigError, Result};
use crate::settings::DEFAULT_CONFIG_FILE;
use crate::types::{GatewayConfig, MAX_TTL_MINUTES};

/// A validated document together with the catalog built from it
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: GatewayConfig,
    pub catalog: DataTypeCatalog,
}

impl LoadedConfig {
    /// Validate a document and build its catalog
    pub fn from_config(config: GatewayConfig) -> Result<Self> {
        ConfigManager::validate_config(&config)?;
        let catalog = DataTypeCatalog::from_config(&config);
        Ok(Self { config, catalog })
    }
}

/// Configuration manager
pub struct ConfigManager {
    /// Configuration file path
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_path(PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load the document.
    ///
    /// A missing file yields the built-in default document; a file that exists but
    /// cannot be read or parsed is an error.
    pub fn load_config(&self) -> Result<LoadedConfig> {
        let config = match std::fs::read_to_string(&self.config_path) {
            Ok(raw) => {
                let config: GatewayConfig =
                    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                        path: self.config_path.display().to_string(),
                        source,
                    })?;
                tracing::info!(
                    path = %self.config_path.display(),
                    data_types = config.data_types.len(),
                    "Loaded configuration"
                );
                config
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    path = %self.config_path.display(),
                    "Configuration file not found, using default configuration"
                );
                GatewayConfig::default()
            }
            Err(e) => return Err(e.into()),
        };

        let loaded = LoadedConfig::from_config(config)?;
        Self::warn_on_shadowing(&loaded);
        Ok(loaded)
    }

    /// Check every template carries the placeholders its search fields need
    pub fn validate_config(config: &GatewayConfig) -> Result<()> {
        if config.cache_settings.ttl_minutes > MAX_TTL_MINUTES {
            return Err(ConfigError::Validation(format!(
                "cacheSettings.ttlMinutes is {}, at most {} is allowed",
                config.cache_settings.ttl_minutes, MAX_TTL_MINUTES
            )));
        }

        for dt in &config.data_types {
            if dt.id.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "Data type id must not be empty".to_string(),
                ));
            }

            let found = dt.placeholder_count();
            let expected = dt.base_placeholders();
            if found != expected && found != expected + 1 {
                return Err(ConfigError::Validation(format!(
                    "Data type '{}' query has {} placeholders, expected {} (or {} with a limit)",
                    dt.id,
                    found,
                    expected,
                    expected + 1
                )));
            }

            if dt.takes_limit() && config.search_settings.max_results == 0 {
                return Err(ConfigError::Validation(format!(
                    "Data type '{}' query takes a result limit but maxResults is 0",
                    dt.id
                )));
            }
        }
        Ok(())
    }

    fn warn_on_shadowing(loaded: &LoadedConfig) {
        for id in loaded.catalog.duplicate_ids() {
            tracing::warn!(data_type = %id, "Duplicate data type id, first enabled entry wins");
        }

        let default_id = &loaded.config.default_data_type;
        if !default_id.is_empty() && loaded.catalog.lookup(default_id).is_err() {
            tracing::warn!(
                data_type = %default_id,
                "Default data type is not an enabled data type"
            );
        }
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
