//! # Configuration Persistence
//!
//! Save and load client settings to/from disk.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Node URL used when nothing else is configured.
pub const DEFAULT_NODE_URL: &str = "http://127.0.0.1:8080";

/// Errors reading or writing the client config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode config: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// URL of the guestbook node to talk to.
    pub node_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            node_url: DEFAULT_NODE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Returns the config file path.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("guestbook").join("client.json"))
    }

    /// Loads configuration from the default location, or returns defaults.
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::warn!("Could not determine config directory");
                Self::default()
            }
        }
    }

    /// Loads configuration from `path`, falling back to defaults if the file
    /// is missing or unreadable.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(?path, "Config file not found, using defaults");
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    tracing::debug!(?path, "Loaded configuration");
                    config
                }
                Err(e) => {
                    tracing::warn!(?path, error = %e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(?path, error = %e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Saves configuration to the default location.
    pub fn save(&self) -> Result<PathBuf, ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Saves configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents).map_err(io_err)?;

        tracing::info!(?path, "Saved configuration");
        Ok(())
    }
}
