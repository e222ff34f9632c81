//! Database configuration loading from file and environment variables.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::pool::DbSettings;

/// Top-level database configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DbConfig {
    /// Database file and connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Migration script settings.
    #[serde(default)]
    pub migrations: MigrationsConfig,
}

/// Database file and connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Busy timeout for SQLite connections, in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Maximum number of pooled SQLite connections.
    #[serde(default = "default_pool_max_size")]
    pub pool_max_size: u32,
}

/// Migration script settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MigrationsConfig {
    /// Root directory of the script store. The reserved upgrades namespace
    /// is a subdirectory of this root.
    #[serde(default = "default_upgrades_dir")]
    pub upgrades_dir: String,
}

fn default_db_path() -> String {
    "strata.db".to_string()
}

fn default_busy_timeout_ms() -> u64 {
    5_000
}

fn default_pool_max_size() -> u32 {
    4
}

fn default_upgrades_dir() -> String {
    "assets".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
            pool_max_size: default_pool_max_size(),
        }
    }
}

impl Default for MigrationsConfig {
    fn default() -> Self {
        Self {
            upgrades_dir: default_upgrades_dir(),
        }
    }
}

impl DbConfig {
    /// The pool settings described by this configuration.
    pub fn settings(&self) -> DbSettings {
        DbSettings {
            busy_timeout_ms: self.database.busy_timeout_ms,
            pool_max_size: self.database.pool_max_size,
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults when the
/// file does not exist.
///
/// Environment variable overrides:
/// - `STRATA_DB_PATH` overrides `database.path`
/// - `STRATA_BUSY_TIMEOUT_MS` overrides `database.busy_timeout_ms`
/// - `STRATA_POOL_MAX_SIZE` overrides `database.pool_max_size`
/// - `STRATA_UPGRADES_DIR` overrides `migrations.upgrades_dir`
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<DbConfig, ConfigError> {
    let mut config = if path.exists() {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)?
    } else {
        DbConfig::default()
    };

    if let Ok(db_path) = std::env::var("STRATA_DB_PATH") {
        config.database.path = db_path;
    }
    if let Ok(timeout) = std::env::var("STRATA_BUSY_TIMEOUT_MS") {
        match timeout.parse() {
            Ok(ms) => config.database.busy_timeout_ms = ms,
            Err(_) => {
                tracing::warn!(value = %timeout, "ignoring invalid STRATA_BUSY_TIMEOUT_MS");
            }
        }
    }
    if let Ok(size) = std::env::var("STRATA_POOL_MAX_SIZE") {
        match size.parse() {
            Ok(n) => config.database.pool_max_size = n,
            Err(_) => {
                tracing::warn!(value = %size, "ignoring invalid STRATA_POOL_MAX_SIZE");
            }
        }
    }
    if let Ok(dir) = std::env::var("STRATA_UPGRADES_DIR") {
        config.migrations.upgrades_dir = dir;
    }

    Ok(config)
}
