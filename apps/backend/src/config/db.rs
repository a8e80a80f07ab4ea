use std::time::Duration;

use crate::config::{optional, parse_or};
use crate::error::AppError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";

/// Connection settings for the session store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_attempts: u32,
    pub connect_retry_interval: Duration,
}

impl DbConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(crate::config::env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = optional(&lookup, "DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 10u32)?;
        let connect_attempts = parse_or(&lookup, "DB_CONNECT_ATTEMPTS", 5u32)?.max(1);
        let interval_ms = parse_or(&lookup, "DB_CONNECT_RETRY_MS", 500u64)?;

        Ok(Self {
            url,
            max_connections,
            connect_attempts,
            connect_retry_interval: Duration::from_millis(interval_ms),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 1,
            connect_attempts: 1,
            connect_retry_interval: Duration::from_millis(0),
        }
    }

    /// Each connection to `sqlite::memory:` is its own database, so the pool
    /// must be pinned to one connection.
    pub fn is_sqlite_memory(&self) -> bool {
        self.url.starts_with("sqlite::memory:") || self.url.contains("mode=memory")
    }
}
