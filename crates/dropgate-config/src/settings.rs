//! Server process settings

use std::path::PathBuf;
use std::time::Duration;

use crate::env::{self, EnvSource};
use crate::error::{ConfigError, Result};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_CONFIG_FILE: &str = "config.json";
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 30;

/// Settings for the HTTP server process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub port: u16,
    pub config_file: PathBuf,
    /// Serve built-in mock rows instead of the warehouse
    pub test_mode: bool,
    /// Bound on each data-source call
    pub query_timeout: Duration,
    /// Origins allowed in addition to the built-in host origins
    pub cors_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            test_mode: false,
            query_timeout: Duration::from_secs(DEFAULT_QUERY_TIMEOUT_SECS),
            cors_origins: Vec::new(),
        }
    }
}

impl ServerSettings {
    pub fn from_env(env: &dyn EnvSource) -> Result<Self> {
        let timeout_secs = env::number(env, "QUERY_TIMEOUT_SECS", DEFAULT_QUERY_TIMEOUT_SECS)?;
        if timeout_secs == 0 {
            return Err(ConfigError::env(
                "QUERY_TIMEOUT_SECS",
                "timeout must be at least 1 second",
            ));
        }

        Ok(Self {
            port: env::number(env, "PORT", DEFAULT_PORT)?,
            config_file: env::non_empty(env, "CONFIG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
            test_mode: env::flag(env, "TEST_MODE"),
            query_timeout: Duration::from_secs(timeout_secs),
            cors_origins: env::list(env, "CORS_ORIGINS"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;

    #[test]
    fn test_defaults() {
        let settings = ServerSettings::from_env(&MapEnv::new()).unwrap();
        assert_eq!(settings, ServerSettings::default());
    }

    #[test]
    fn test_overrides() {
        let env = MapEnv::new()
            .with("PORT", "9090")
            .with("CONFIG_FILE", "/etc/dropgate/config.json")
            .with("TEST_MODE", "true")
            .with("QUERY_TIMEOUT_SECS", "5")
            .with("CORS_ORIGINS", "https://a.example, https://b.example");
        let settings = ServerSettings::from_env(&env).unwrap();
        assert_eq!(settings.port, 9090);
        assert_eq!(settings.config_file, PathBuf::from("/etc/dropgate/config.json"));
        assert!(settings.test_mode);
        assert_eq!(settings.query_timeout, Duration::from_secs(5));
        assert_eq!(settings.cors_origins.len(), 2);
    }

    #[test]
    fn test_bad_port_is_fatal() {
        let env = MapEnv::new().with("PORT", "http");
        assert!(matches!(
            ServerSettings::from_env(&env),
            Err(ConfigError::Env { key, .. }) if key == "PORT"
        ));
    }

    #[test]
    fn test_zero_query_timeout_is_fatal() {
        let env = MapEnv::new().with("QUERY_TIMEOUT_SECS", "0");
        assert!(matches!(
            ServerSettings::from_env(&env),
            Err(ConfigError::Env { key, .. }) if key == "QUERY_TIMEOUT_SECS"
        ));
    }
}
