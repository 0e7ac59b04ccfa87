//! Configuration Module
//!
//! Handles loading connector and cache configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;
use tracing::warn;

use crate::error::{CacheError, Result};

/// Object cache parameters.
///
/// Limits and the TTL are kept signed so that a negative value coming from
/// the environment reaches its consumer and is rejected there.
#[derive(Debug, Clone, Serialize)]
pub struct CacheConfig {
    /// Upper bound on cached objects, 0 = unbounded
    pub maxsize: i64,
    /// Whether the connector consults the cache at all
    pub enabled: bool,
    /// Default TTL in seconds for cached objects
    pub ttl: i64,
    /// Housekeeping period in minutes, 0 = no background sweep
    pub housekeeping: i64,
}

impl CacheConfig {
    /// Housekeeping period converted to seconds.
    pub fn housekeeping_secs(&self) -> i64 {
        self.housekeeping.saturating_mul(60)
    }

    /// Default TTL applied to entries the connector creates.
    ///
    /// # Errors
    /// `CacheError::Configuration` if the TTL is negative.
    pub fn default_ttl(&self) -> Result<Duration> {
        u64::try_from(self.ttl)
            .map(Duration::from_secs)
            .map_err(|_| CacheError::Configuration("Cache TTL cannot be negative".to_string()))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            maxsize: 0,
            enabled: true,
            ttl: 300,
            housekeeping: 0,
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Object cache settings
    pub cache: CacheConfig,
    /// HTTP server port for the cache admin API
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAXSIZE` - Maximum cached objects (default: 0, unbounded)
    /// - `CACHE_ENABLED` - Enable the object cache (default: true)
    /// - `CACHE_TTL` - Default TTL in seconds (default: 300)
    /// - `CACHE_HOUSEKEEPING` - Sweep period in minutes (default: 0, disabled)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        let defaults = CacheConfig::default();
        Self {
            cache: CacheConfig {
                maxsize: env_or("CACHE_MAXSIZE", defaults.maxsize),
                enabled: env_or("CACHE_ENABLED", defaults.enabled),
                ttl: env_or("CACHE_TTL", defaults.ttl),
                housekeeping: env_or("CACHE_HOUSEKEEPING", defaults.housekeeping),
            },
            server_port: env_or("SERVER_PORT", 3000),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            server_port: 3000,
        }
    }
}

/// Reads `name` from the environment, falling back to `default` when it is
/// unset or does not parse.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    let Ok(raw) = env::var(name) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!("Ignoring unparsable {}={:?}, using the default", name, raw);
            default
        }
    }
}
