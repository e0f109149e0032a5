//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/api";
pub const DEFAULT_STATE_DIR: &str = ".portal";

pub const BASE_URL_ENV: &str = "PORTAL_API_BASE_URL";
pub const STATE_DIR_ENV: &str = "PORTAL_STATE_DIR";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid base URL {0:?}: expected http:// or https://")]
    InvalidBaseUrl(String),

    #[error("state directory must not be empty")]
    EmptyStateDir,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Proxied API root, without a trailing slash.
    pub base_url: String,
    /// Directory holding persisted client state.
    pub state_dir: PathBuf,
}

impl ClientConfig {
    /// Validate and normalize explicit settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not http(s) or the state dir is empty.
    pub fn new(base_url: &str, state_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let base_url = base_url.trim().trim_end_matches('/');
        let has_host = ["http://", "https://"]
            .iter()
            .any(|scheme| base_url.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()));
        if !has_host {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_owned()));
        }

        let state_dir = state_dir.into();
        if state_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyStateDir);
        }
        Ok(Self { base_url: base_url.to_owned(), state_dir })
    }

    /// Build config from a key lookup.
    ///
    /// Optional:
    /// - `PORTAL_API_BASE_URL`: default `http://127.0.0.1:8080/api`
    /// - `PORTAL_STATE_DIR`: default `.portal`
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::new`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let state_dir = lookup(STATE_DIR_ENV).unwrap_or_else(|| DEFAULT_STATE_DIR.to_owned());
        Self::new(&base_url, state_dir)
    }

    /// Build config from the process environment.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::new`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}
