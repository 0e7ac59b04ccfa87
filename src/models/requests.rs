//! Request DTOs for the cache admin API
//!
//! Defines the structure of incoming HTTP request bodies.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

/// Request body for storing an object (PUT /cache)
///
/// # Fields
/// - `name`: Cache key, usually "Kind:propertyValue"
/// - `value`: Arbitrary JSON object to cache
/// - `ttl`: Optional TTL in seconds (uses the configured default if absent)
#[derive(Debug, Clone, Deserialize)]
pub struct AddRequest {
    pub name: String,
    pub value: Value,
    #[serde(default)]
    pub ttl: Option<u64>,
}

impl AddRequest {
    /// TTL to store the entry with, falling back to `default`.
    pub fn ttl_or(&self, default: Duration) -> Duration {
        self.ttl.map(Duration::from_secs).unwrap_or(default)
    }
}
