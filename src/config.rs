//! Environment-driven application configuration.
//!
//! Recognised variables:
//!
//! - `HOST`: bind address (default `0.0.0.0`)
//! - `PORT`: bind port (default `8080`)
//! - `STORAGE_MODE`: `in_memory` (default) | `postgres`
//! - `DATABASE_URL`: `PostgreSQL` connection URL, required for `postgres`
//! - `DATABASE_POOL_SIZE`: maximum pooled connections (default `10`)
//! - `LOG_FORMAT`: `pretty` (default) | `json`

use std::{
    env,
    net::{IpAddr, SocketAddr},
    str::FromStr,
};
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_SIZE: u32 = 10;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// `STORAGE_MODE` names an unknown backend.
    #[error("invalid STORAGE_MODE: {0} (expected in_memory or postgres)")]
    InvalidStorageMode(String),

    /// `LOG_FORMAT` names an unknown format.
    #[error("invalid LOG_FORMAT: {0} (expected pretty or json)")]
    InvalidLogFormat(String),

    /// A variable could not be parsed as the expected type.
    #[error("invalid {name}: {value}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },

    /// `DATABASE_URL` is required when `STORAGE_MODE=postgres`.
    #[error("DATABASE_URL is required when STORAGE_MODE=postgres")]
    MissingDatabaseUrl,
}

/// Storage backend for tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageMode {
    /// Process-local map; contents are lost on restart.
    #[default]
    InMemory,
    /// `PostgreSQL` via a Diesel connection pool.
    Postgres,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_owned())),
        }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(ConfigurationError::InvalidLogFormat(value.to_owned())),
        }
    }
}

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address to bind the HTTP listener to.
    pub host: IpAddr,
    /// Port to bind the HTTP listener to.
    pub port: u16,
    /// Task storage backend.
    pub storage_mode: StorageMode,
    /// `PostgreSQL` connection URL.
    pub database_url: Option<String>,
    /// Maximum size of the database connection pool.
    pub pool_max_size: u32,
    /// Log output format.
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Reads configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when a variable holds an invalid value
    /// or `DATABASE_URL` is missing for the postgres backend.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which returns the value of a
    /// variable or `None` when it is unset.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigurationError> {
        let host = parse_or("HOST", lookup("HOST"), || {
            IpAddr::from_str(DEFAULT_HOST).map_err(|_| ConfigurationError::InvalidValue {
                name: "HOST",
                value: DEFAULT_HOST.to_owned(),
            })
        })?;
        let port = parse_or("PORT", lookup("PORT"), || Ok(DEFAULT_PORT))?;
        let pool_max_size =
            parse_or("DATABASE_POOL_SIZE", lookup("DATABASE_POOL_SIZE"), || {
                Ok(DEFAULT_POOL_SIZE)
            })?;
        let storage_mode = lookup("STORAGE_MODE")
            .map(|value| value.parse())
            .transpose()?
            .unwrap_or_default();
        let log_format = lookup("LOG_FORMAT")
            .map(|value| value.parse())
            .transpose()?
            .unwrap_or_default();
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let config = Self {
            host,
            port,
            storage_mode,
            database_url,
            pool_max_size,
            log_format,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field requirements.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingDatabaseUrl`] when the postgres
    /// backend is selected without a connection URL, and
    /// [`ConfigurationError::InvalidValue`] for an empty pool.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.storage_mode == StorageMode::Postgres && self.database_url.is_none() {
            return Err(ConfigurationError::MissingDatabaseUrl);
        }
        if self.pool_max_size == 0 {
            return Err(ConfigurationError::InvalidValue {
                name: "DATABASE_POOL_SIZE",
                value: "0".to_owned(),
            });
        }
        Ok(())
    }

    /// Returns the address the HTTP listener binds to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T: FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: impl FnOnce() -> Result<T, ConfigurationError>,
) -> Result<T, ConfigurationError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigurationError::InvalidValue { name, value }),
        None => default(),
    }
}
