//! Node configuration.
//!
//! Values are layered, later sources winning:
//!
//! 1. built-in defaults
//! 2. an optional config file (YAML, TOML, or JSON, chosen by extension)
//! 3. environment variables prefixed `GUESTBOOK`, nested with `__`,
//!    e.g. `GUESTBOOK_STORE__URL`
//! 4. command-line flags (applied by the binary)
//!
//! The storage backend is resolved once from [`StoreConfig`] and handed to
//! the router; it is never re-evaluated per request.

use config::{Config, ConfigError, Environment, File};
use guestbook_storage::{
    EntryStore, MemoryStore, RestStore, RestStoreConfig, StorageError, DEFAULT_TABLE,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::observability::LogFormat;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "GUESTBOOK";

/// Configuration for the guestbook node.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeConfig {
    /// HTTP listen address.
    pub api_addr: SocketAddr,
    /// Log level.
    pub log_level: String,
    /// Log output format.
    pub log_format: LogFormat,
    /// Entry store settings.
    pub store: StoreConfig,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            api_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            store: StoreConfig::default(),
        }
    }
}

impl NodeConfig {
    /// Loads configuration from defaults, an optional file, and the process
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Like [`NodeConfig::load`], but reads environment variables from
    /// `env` instead of the process when given.
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }
}

/// Entry store settings.
///
/// When both `url` and `api_key` are set the node uses the hosted store;
/// otherwise it runs in demo mode on a process-local list.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Hosted database base URL.
    pub url: Option<String>,
    /// Hosted database API key.
    pub api_key: Option<String>,
    /// Table holding the entries.
    pub table: String,
    /// Per-request timeout for the hosted store, in seconds.
    pub timeout_secs: u64,
    /// Start the demo store with a welcome entry.
    pub seed_welcome: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            table: DEFAULT_TABLE.to_string(),
            timeout_secs: 10,
            seed_welcome: true,
        }
    }
}

impl StoreConfig {
    /// Returns the hosted store credentials if both are present.
    fn credentials(&self) -> Option<(&str, &str)> {
        let url = self.url.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())?;
        Some((url, key))
    }

    /// Returns true if a hosted store is configured.
    pub fn is_configured(&self) -> bool {
        self.credentials().is_some()
    }

    /// Builds the store this configuration selects.
    pub fn build(&self) -> Result<Arc<dyn EntryStore>, StorageError> {
        match self.credentials() {
            Some((url, key)) => {
                let store = RestStore::new(RestStoreConfig {
                    url: url.to_string(),
                    api_key: key.to_string(),
                    table: self.table.clone(),
                    timeout: Duration::from_secs(self.timeout_secs),
                })?;
                tracing::info!(endpoint = %store.endpoint(), "Using hosted entry store");
                Ok(Arc::new(store))
            }
            None => {
                tracing::warn!(
                    "No database configured, running in demo mode; entries are kept in memory \
                     and lost on restart"
                );
                let store = if self.seed_welcome {
                    MemoryStore::with_welcome_entry()
                } else {
                    MemoryStore::new()
                };
                Ok(Arc::new(store))
            }
        }
    }
}
