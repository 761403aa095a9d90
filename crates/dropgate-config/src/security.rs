//! Security and rate-limit policy derived from the environment

use std::collections::HashSet;

use crate::env::{self, EnvSource};
use crate::error::{ConfigError, Result};

/// Which credential layers are active, loaded once per process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityPolicy {
    /// Exact client addresses allowed through; empty disables the layer
    pub ip_allow_list: HashSet<String>,
    pub api_key_enabled: bool,
    pub api_keys: Vec<String>,
    pub bearer_enabled: bool,
    pub bearer_secret: Option<String>,
}

impl SecurityPolicy {
    pub fn ip_allow_list_enabled(&self) -> bool {
        !self.ip_allow_list.is_empty()
    }

    pub fn with_allowed_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip_allow_list.insert(ip.into());
        self
    }

    pub fn with_api_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.api_key_enabled = true;
        self.api_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_bearer_secret(mut self, secret: impl Into<String>) -> Self {
        self.bearer_enabled = true;
        self.bearer_secret = Some(secret.into());
        self
    }
}

/// Authentication mode selected at startup
///
/// The legacy single-key mode and the layered policy are mutually exclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthMode {
    /// Every request is let through
    #[default]
    Disabled,
    /// One shared secret checked against the API-key header
    Legacy { key: String },
    /// Ordered IP allow-list, API key and bearer token checks
    Layered(SecurityPolicy),
}

impl AuthMode {
    /// Read the authentication mode from the environment.
    ///
    /// `API_KEY` selects legacy mode and wins over the layered variables. A layer
    /// switched on without the material it needs is a startup error.
    pub fn from_env(env: &dyn EnvSource) -> Result<Self> {
        if let Some(key) = env::non_empty(env, "API_KEY") {
            return Ok(AuthMode::Legacy { key });
        }

        let ip_allow_list: HashSet<String> = env::list(env, "IP_WHITELIST").into_iter().collect();
        let api_key_enabled = env::flag(env, "AUTH_ENABLED");
        let bearer_enabled = env::flag(env, "JWT_ENABLED");

        if ip_allow_list.is_empty() && !api_key_enabled && !bearer_enabled {
            return Ok(AuthMode::Disabled);
        }

        let api_keys = env::list(env, "API_KEYS");
        if api_key_enabled && api_keys.is_empty() {
            return Err(ConfigError::env(
                "API_KEYS",
                "AUTH_ENABLED is true but no API keys are configured",
            ));
        }

        let bearer_secret = env::non_empty(env, "JWT_SECRET");
        if bearer_enabled && bearer_secret.is_none() {
            return Err(ConfigError::env(
                "JWT_SECRET",
                "JWT_ENABLED is true but no secret is configured",
            ));
        }

        Ok(AuthMode::Layered(SecurityPolicy {
            ip_allow_list,
            api_key_enabled,
            api_keys,
            bearer_enabled,
            bearer_secret,
        }))
    }

    pub fn label(&self) -> &'static str {
        match self {
            AuthMode::Disabled => "disabled",
            AuthMode::Legacy { .. } => "legacy",
            AuthMode::Layered(_) => "layered",
        }
    }
}

/// Per-client admission limit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateLimitSettings {
    /// Requests per trailing minute; 0 disables limiting
    pub requests_per_minute: u32,
}

impl RateLimitSettings {
    pub fn from_env(env: &dyn EnvSource) -> Result<Self> {
        Ok(Self {
            requests_per_minute: env::number(env, "RATE_LIMIT_PER_MINUTE", 0)?,
        })
    }

    pub fn enabled(&self) -> bool {
        self.requests_per_minute > 0
    }
}
