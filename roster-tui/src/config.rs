//! User settings.
//!
//! Read from `config.json` in the platform config directory, then overridden
//! by `ROSTER_*` environment variables. Every field has a default, so a
//! missing file or a partial one is fine.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use log::debug;
use roster_lib::DEFAULT_USERS_URL;
use roster_lib::query::PAGE_SIZE;
use roster_lib::source::DEFAULT_FETCH_DELAY;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::paths;

pub const ENV_ENDPOINT: &str = "ROSTER_ENDPOINT";
pub const ENV_PAGE_SIZE: &str = "ROSTER_PAGE_SIZE";
pub const ENV_FETCH_DELAY_MS: &str = "ROSTER_FETCH_DELAY_MS";
pub const ENV_TIMEOUT_SECS: &str = "ROSTER_TIMEOUT_SECS";

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// URL the user list is fetched from.
    pub endpoint: String,
    /// Rows per table page.
    pub page_size: usize,
    /// Delay before the first fetch.
    pub fetch_delay_ms: u64,
    /// Whole-request timeout.
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_USERS_URL.to_string(),
            page_size: PAGE_SIZE,
            fetch_delay_ms: DEFAULT_FETCH_DELAY.as_millis() as u64,
            timeout_secs: 30,
        }
    }
}

impl Settings {
    /// Loads settings from the config file and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = paths::config_file();
        Self::load_from(path.as_deref(), |name| std::env::var(name).ok())
    }

    /// Loads settings from `path` (if it exists) and applies overrides
    /// looked up through `env`.
    pub fn load_from<F>(path: Option<&Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = match path {
            Some(path) if path.exists() => {
                debug!("reading settings from {}", path.display());
                Self::read(path)?
            }
            _ => Self::default(),
        };
        settings.apply_env(env)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env<F>(&mut self, env: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = env(ENV_ENDPOINT) {
            self.endpoint = endpoint;
        }
        if let Some(value) = env(ENV_PAGE_SIZE) {
            self.page_size = parse_number(ENV_PAGE_SIZE, &value)?;
        }
        if let Some(value) = env(ENV_FETCH_DELAY_MS) {
            self.fetch_delay_ms = parse_number(ENV_FETCH_DELAY_MS, &value)?;
        }
        if let Some(value) = env(ENV_TIMEOUT_SECS) {
            self.timeout_secs = parse_number(ENV_TIMEOUT_SECS, &value)?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                name: "page_size",
                value: self.page_size.to_string(),
                reason: "must be at least 1",
            });
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                name: "timeout_secs",
                value: self.timeout_secs.to_string(),
                reason: "must be at least 1",
            });
        }
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "endpoint",
                value: self.endpoint.clone(),
                reason: "must not be empty",
            });
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
        reason: "expected a non-negative integer",
    })
}
