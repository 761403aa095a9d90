//! Environment variable access

use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{ConfigError, Result};

/// Source of environment variables
pub trait EnvSource: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// Reads the real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ProcessEnv {
    /// Prime the process environment from a `.env` file when one exists.
    ///
    /// Variables already set in the environment are left untouched.
    pub fn load_dotenv() {
        match dotenv::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(error = %e, "Failed to read .env file"),
        }
    }
}

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory environment, mainly for tests
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn get(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// A flag is on only when set to `true` (case-insensitive)
pub(crate) fn flag(env: &dyn EnvSource, key: &str) -> bool {
    env.get(key)
        .map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Comma-separated list, entries trimmed and empties dropped
pub(crate) fn list(env: &dyn EnvSource, key: &str) -> Vec<String> {
    env.get(key)
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Non-empty trimmed value
pub(crate) fn non_empty(env: &dyn EnvSource, key: &str) -> Option<String> {
    env.get(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn number<T: FromStr>(env: &dyn EnvSource, key: &str, default: T) -> Result<T> {
    match non_empty(env, key) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::env(key, format!("'{}' is not a valid number", raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag() {
        let env = MapEnv::new().with("A", "TRUE").with("B", "yes");
        assert!(flag(&env, "A"));
        assert!(!flag(&env, "B"));
        assert!(!flag(&env, "C"));
    }

    #[test]
    fn test_list_trims_and_drops_empty() {
        let env = MapEnv::new().with("KEYS", " a, b ,, c ,");
        assert_eq!(list(&env, "KEYS"), vec!["a", "b", "c"]);
        assert!(list(&env, "MISSING").is_empty());
    }

    #[test]
    fn test_number() {
        let env: MapEnv = [("PORT", "9000"), ("BAD", "nine")].into_iter().collect();
        assert_eq!(number::<u16>(&env, "PORT", 8080).unwrap(), 9000);
        assert_eq!(number::<u16>(&env, "UNSET", 8080).unwrap(), 8080);
        assert!(matches!(
            number::<u16>(&env, "BAD", 8080),
            Err(ConfigError::Env { key, .. }) if key == "BAD"
        ));
    }
}
