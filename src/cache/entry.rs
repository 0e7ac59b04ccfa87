//! Cache Entry Module
//!
//! Defines a single cached object together with its lifecycle metadata.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Entry ==
/// One cached value with its name, TTL, creation time and hit counter.
///
/// Only the owning `Inventory` changes `hits`; everything else is fixed at
/// construction.
#[derive(Debug, Clone)]
pub struct Entry<V> {
    name: String,
    value: V,
    ttl: Duration,
    /// Monotonic creation time used for expiry checks
    born: Instant,
    /// Wall-clock creation time reported by `info`
    created_at: DateTime<Utc>,
    hits: u64,
}

impl<V> Entry<V> {
    // == Constructor ==
    /// Creates a new entry, capturing the current time.
    ///
    /// # Arguments
    /// * `name` - Cache key, unique within one inventory
    /// * `value` - The object to cache
    /// * `ttl` - Time after creation at which the entry goes stale
    pub fn new(name: impl Into<String>, value: V, ttl: Duration) -> Self {
        Self {
            name: name.into(),
            value,
            ttl,
            born: Instant::now(),
            created_at: Utc::now(),
            hits: 0,
        }
    }

    /// Same as [`Entry::new`] with the TTL given in whole seconds.
    pub fn with_ttl_secs(name: impl Into<String>, value: V, ttl_secs: u64) -> Self {
        Self::new(name, value, Duration::from_secs(ttl_secs))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    // == Is Expired ==
    /// Checks if the entry has outlived its TTL.
    ///
    /// A zero TTL expires on the very next check. Otherwise the entry is
    /// expired once strictly more than `ttl` has elapsed since creation.
    pub fn is_expired(&self) -> bool {
        self.ttl.is_zero() || self.born.elapsed() > self.ttl
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    /// Read-only snapshot of the entry's metadata.
    pub fn info(&self) -> EntryInfo {
        EntryInfo {
            name: self.name.clone(),
            hits: self.hits,
            ttl: self.ttl.as_secs(),
            created_at: self.created_at,
        }
    }
}

// == Entry Info ==
/// Metadata snapshot returned by `Inventory::info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryInfo {
    pub name: String,
    pub hits: u64,
    /// TTL in seconds
    pub ttl: u64,
    pub created_at: DateTime<Utc>,
}
