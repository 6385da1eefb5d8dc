//! Configuration management for hbnb.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::storage::StorageMode;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "hbnb";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "hbnb.db";

/// Default JSON storage file name.
const STORAGE_FILE_NAME: &str = "file.json";

/// Environment flag selecting the storage backend (`db` or anything else).
pub const STORAGE_TYPE_ENV: &str = "HBNB_TYPE_STORAGE";

/// Environment flag naming the deployment environment (`test` resets the database).
pub const ENV_NAME_ENV: &str = "HBNB_ENV";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. The `HBNB_TYPE_STORAGE` and `HBNB_ENV` flags
/// 2. Environment variables prefixed with `HBNB_` (`__` separates sections)
/// 3. TOML config file at `~/.config/hbnb/config.toml`
/// 4. Default values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Web server configuration.
    pub server: ServerConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage backend flag: `db` selects the relational backend,
    /// any other value the JSON file backend.
    #[serde(rename = "type")]
    pub kind: String,
    /// Path to the `SQLite` database file.
    /// Defaults to `~/.local/share/hbnb/hbnb.db`
    pub database_path: Option<PathBuf>,
    /// Path to the JSON storage file.
    /// Defaults to `~/.local/share/hbnb/file.json`
    pub file_path: Option<PathBuf>,
    /// Deployment environment. `test` drops every table when the database opens.
    pub env: String,
}

/// Web server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            kind: "file".to_string(),
            database_path: None, // Will be resolved to default at runtime
            file_path: None,
            env: "dev".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("HBNB_").split("__"))
            .merge(
                Env::raw()
                    .only(&[STORAGE_TYPE_ENV])
                    .map(|_| "storage.type".into()),
            )
            .merge(Env::raw().only(&[ENV_NAME_ENV]).map(|_| "storage.env".into()));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "server host cannot be empty".to_string(),
            });
        }

        if self.server.port == 0 {
            return Err(Error::ConfigValidation {
                message: "server port must be greater than 0".to_string(),
            });
        }

        for (name, path) in [
            ("database_path", &self.storage.database_path),
            ("file_path", &self.storage.file_path),
        ] {
            if path.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
                return Err(Error::ConfigValidation {
                    message: format!("{name} cannot be empty"),
                });
            }
        }

        Ok(())
    }

    /// The storage backend selected by the `storage.type` flag.
    #[must_use]
    pub fn storage_mode(&self) -> StorageMode {
        StorageMode::from_flag(&self.storage.kind)
    }

    /// Whether the deployment environment is `test`.
    #[must_use]
    pub fn is_test_env(&self) -> bool {
        self.storage.env == "test"
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the JSON storage file path, resolving defaults if not set.
    #[must_use]
    pub fn file_path(&self) -> PathBuf {
        self.storage
            .file_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(STORAGE_FILE_NAME))
    }

    /// Address string for the web server.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
