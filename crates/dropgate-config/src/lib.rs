//! # dropgate configuration
//!
//! Configuration management for the dropgate search gateway:
//!
//! - **Configuration document**: the JSON file describing searchable data types,
//!   cache settings and search-UI settings
//! - **Data-type catalog**: ordered, read-only lookup over the loaded definitions
//! - **Environment policy**: security layers, rate limit and server settings read
//!   from process environment (optionally primed from a `.env` file)

pub mod catalog;
pub mod env;
pub mod error;
pub mod manager;
pub mod security;
pub mod settings;
pub mod types;

pub use catalog::DataTypeCatalog;
pub use env::{EnvSource, MapEnv, ProcessEnv};
pub use error::{ConfigError, Result};
pub use manager::{ConfigManager, LoadedConfig};
pub use security::{AuthMode, RateLimitSettings, SecurityPolicy};
pub use settings::ServerSettings;
pub use types::{
    CacheSettings, DataTypeDefinition, GatewayConfig, SearchSettings, MAX_TTL_MINUTES,
};
