//! Catalog configuration.
//!
//! Loaded from environment variables with fallback to defaults.
//!
//! | Variable                    | Default           |
//! |-----------------------------|-------------------|
//! | `STOCKROOM_DB_PATH`         | `./stockroom.db`  |
//! | `STOCKROOM_PAGE_SIZE`       | `10` (must be ≥ 1)|
//! | `STOCKROOM_MAX_CONNECTIONS` | `5` (must be ≥ 1) |

use std::env;
use std::path::PathBuf;

use stockroom_core::DEFAULT_PAGE_SIZE;
use stockroom_db::DbConfig;

pub const DB_PATH_VAR: &str = "STOCKROOM_DB_PATH";
pub const PAGE_SIZE_VAR: &str = "STOCKROOM_PAGE_SIZE";
pub const MAX_CONNECTIONS_VAR: &str = "STOCKROOM_MAX_CONNECTIONS";

const DEFAULT_DB_PATH: &str = "./stockroom.db";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Catalog configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// SQLite database file
    pub database_path: PathBuf,

    /// Products per listing page
    pub page_size: i64,

    /// Pool size
    pub max_connections: u32,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            database_path: PathBuf::from(DEFAULT_DB_PATH),
            page_size: DEFAULT_PAGE_SIZE,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Load configuration from any variable source.
    ///
    /// `lookup` returns the raw value of a variable, or `None` when unset.
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let database_path = get(DB_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let page_size = match get(PAGE_SIZE_VAR) {
            Some(raw) => parse_at_least_one::<i64>(PAGE_SIZE_VAR, &raw)?,
            None => DEFAULT_PAGE_SIZE,
        };

        let max_connections = match get(MAX_CONNECTIONS_VAR) {
            Some(raw) => parse_at_least_one::<u32>(MAX_CONNECTIONS_VAR, &raw)?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(CatalogConfig {
            database_path,
            page_size,
            max_connections,
        })
    }

    /// Database settings for this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path).max_connections(self.max_connections)
    }
}

fn parse_at_least_one<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + From<u8>,
{
    match raw.trim().parse::<T>() {
        Ok(value) if value >= T::from(1) => Ok(value),
        _ => Err(ConfigError::InvalidValue(var.to_string())),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

// =============================================================================
// Unit Tests
// =============================================================================
