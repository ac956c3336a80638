//! Application configuration.
//!
//! Configuration is loaded from `BOOKNEST_*` environment variables with
//! fallback to defaults. The database file defaults to the platform data
//! directory:
//!
//! - **macOS**: `~/Library/Application Support/com.booknest.BookNest/booknest.db`
//! - **Windows**: `%APPDATA%\booknest\BookNest\data\booknest.db`
//! - **Linux**: `~/.local/share/booknest/booknest.db`

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use booknest_core::money::CURRENCY_SYMBOL;
use booknest_db::DbConfig;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Database file name inside the data directory.
pub const DATABASE_FILE: &str = "booknest.db";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Pool size (default: 5)
    pub max_connections: u32,

    /// Insert the starter catalog when the products table is empty
    pub seed_catalog: bool,

    /// Symbol used when formatting prices (default: Ksh)
    pub currency_symbol: String,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_vars(env::vars().collect())
    }

    /// Load configuration from an explicit variable map.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let var = |name: &str| vars.get(name).map(|v| v.trim()).filter(|v| !v.is_empty());

        let database_path = match var("BOOKNEST_DB_PATH") {
            Some(path) => PathBuf::from(path),
            None => default_database_path()?,
        };

        let max_connections: u32 = var("BOOKNEST_MAX_CONNECTIONS")
            .unwrap_or("5")
            .parse()
            .map_err(|_| ConfigError::InvalidValue("BOOKNEST_MAX_CONNECTIONS".to_string()))?;
        if max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "BOOKNEST_MAX_CONNECTIONS".to_string(),
            ));
        }

        let seed_catalog = match var("BOOKNEST_SEED_CATALOG") {
            None => true,
            Some(value) => parse_bool(value)
                .ok_or_else(|| ConfigError::InvalidValue("BOOKNEST_SEED_CATALOG".to_string()))?,
        };

        let currency_symbol = var("BOOKNEST_CURRENCY_SYMBOL")
            .unwrap_or(CURRENCY_SYMBOL)
            .to_string();

        Ok(AppConfig {
            database_path,
            max_connections,
            seed_catalog,
            currency_symbol,
        })
    }

    /// Configuration for tests: private in-memory database, no seeding.
    pub fn in_memory() -> Self {
        AppConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            seed_catalog: false,
            currency_symbol: CURRENCY_SYMBOL.to_string(),
        }
    }

    /// Pool configuration derived from this config.
    pub fn db_config(&self) -> DbConfig {
        if self.database_path.as_os_str() == ":memory:" {
            return DbConfig::in_memory();
        }
        DbConfig::new(&self.database_path).max_connections(self.max_connections)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// `<platform data dir>/booknest.db`, creating the directory if needed.
fn default_database_path() -> Result<PathBuf, ConfigError> {
    let dirs = ProjectDirs::from("com", "booknest", "BookNest").ok_or(ConfigError::NoDataDir)?;
    let data_dir = dirs.data_dir();

    std::fs::create_dir_all(data_dir).map_err(|e| ConfigError::DataDir {
        path: data_dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(data_dir.join(DATABASE_FILE))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Could not determine app data directory")]
    NoDataDir,

    #[error("Could not create data directory {path:?}: {reason}")]
    DataDir { path: PathBuf, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_explicit_values() {
        let config = AppConfig::from_vars(vars(&[
            ("BOOKNEST_DB_PATH", "/tmp/books.db"),
            ("BOOKNEST_MAX_CONNECTIONS", "8"),
            ("BOOKNEST_SEED_CATALOG", "off"),
            ("BOOKNEST_CURRENCY_SYMBOL", "KES"),
        ]))
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/books.db"));
        assert_eq!(config.max_connections, 8);
        assert!(!config.seed_catalog);
        assert_eq!(config.currency_symbol, "KES");
        assert_eq!(config.db_config().max_connections, 8);
    }

    #[test]
    fn test_defaults() {
        let config =
            AppConfig::from_vars(vars(&[("BOOKNEST_DB_PATH", "/tmp/books.db")])).unwrap();

        assert_eq!(config.max_connections, 5);
        assert!(config.seed_catalog);
        assert_eq!(config.currency_symbol, "Ksh");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = AppConfig::from_vars(vars(&[
            ("BOOKNEST_DB_PATH", "/tmp/books.db"),
            ("BOOKNEST_MAX_CONNECTIONS", "many"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref v) if v == "BOOKNEST_MAX_CONNECTIONS"));

        let err = AppConfig::from_vars(vars(&[
            ("BOOKNEST_DB_PATH", "/tmp/books.db"),
            ("BOOKNEST_MAX_CONNECTIONS", "0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(_)));

        let err = AppConfig::from_vars(vars(&[
            ("BOOKNEST_DB_PATH", "/tmp/books.db"),
            ("BOOKNEST_SEED_CATALOG", "maybe"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref v) if v == "BOOKNEST_SEED_CATALOG"));
    }

    #[test]
    fn test_in_memory_uses_single_connection() {
        let db = AppConfig::in_memory().db_config();
        assert_eq!(db.max_connections, 1);
        assert_eq!(db.database_path, PathBuf::from(":memory:"));
    }
}
