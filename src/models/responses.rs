//! Response DTOs for the cache admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;
use serde_json::Value;

use crate::cache::CacheStats;

/// Response body for a cache lookup (GET /cache/:name)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub name: String,
    pub value: Value,
}

impl GetResponse {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Response body for storing an object (PUT /cache)
#[derive(Debug, Clone, Serialize)]
pub struct AddResponse {
    pub message: String,
    pub name: String,
    /// TTL the entry was stored with, in seconds
    pub ttl: u64,
}

impl AddResponse {
    pub fn new(name: impl Into<String>, ttl: u64) -> Self {
        let name = name.into();
        Self {
            message: format!("Object '{}' cached successfully", name),
            name,
            ttl,
        }
    }
}

/// Response body for wiping the cache (DELETE /cache)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    pub message: String,
    /// Entries stored right before the wipe
    pub cleared: usize,
}

impl ClearResponse {
    pub fn new(cleared: usize) -> Self {
        Self {
            message: format!("Cache cleared, {} entries removed", cleared),
            cleared,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub total_entries: usize,
    /// 0 = unbounded
    pub max_size: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl StatsResponse {
    pub fn new(stats: &CacheStats, max_size: usize) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
            max_size,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Whether the background sweep is attached
    pub housekeeping: bool,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy(housekeeping: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            housekeeping,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
