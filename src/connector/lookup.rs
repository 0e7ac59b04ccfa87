//! Cached object lookups
//!
//! Check the inventory, fetch remotely on a miss, store the result.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::{Entry, Inventory};
use crate::config::CacheConfig;
use crate::error::Result;

/// Expensive remote lookup of a managed object by one of its properties.
pub trait ObjectLookup: Send + Sync {
    /// Object handle returned by the remote API.
    type Object: Clone + Send + 'static;

    /// Finds the object of type `kind` whose lookup property equals
    /// `property_value`. `Ok(None)` means the remote side has no match.
    fn fetch(
        &self,
        kind: &str,
        property_value: &str,
    ) -> impl Future<Output = Result<Option<Self::Object>>> + Send;
}

/// Cache key for an object type and lookup property value, "Kind:value".
pub fn cache_key(kind: &str, property_value: &str) -> String {
    format!("{}:{}", kind, property_value)
}

// == Cached Connector ==
/// Wraps an [`ObjectLookup`] with an [`Inventory`].
///
/// Check-then-fetch is not atomic: two callers missing on the same key
/// both fetch and both add, the later add wins.
pub struct CachedConnector<L: ObjectLookup> {
    lookup: L,
    inventory: Arc<Inventory<L::Object>>,
    enabled: bool,
    ttl: Duration,
}

impl<L: ObjectLookup> CachedConnector<L> {
    pub fn new(
        lookup: L,
        inventory: Arc<Inventory<L::Object>>,
        enabled: bool,
        ttl: Duration,
    ) -> Self {
        Self {
            lookup,
            inventory,
            enabled,
            ttl,
        }
    }

    /// Builds the connector and its inventory from the cache configuration.
    pub fn from_config(lookup: L, config: &CacheConfig) -> Result<Self> {
        let ttl = config.default_ttl()?;
        let inventory = Arc::new(Inventory::from_config(config)?);
        Ok(Self::new(lookup, inventory, config.enabled, ttl))
    }

    // == Object By Property ==
    /// Returns the object of type `kind` matching `property_value`.
    ///
    /// With caching enabled a live inventory entry answers directly. On a
    /// miss the remote lookup runs and a found object is cached under
    /// `"kind:property_value"` with the default TTL. Remote "not found"
    /// results are not cached. A failure to cache is logged and never
    /// replaces the fetched object.
    pub async fn object_by_property(
        &self,
        kind: &str,
        property_value: &str,
    ) -> Result<Option<L::Object>> {
        if !self.enabled {
            return self.lookup.fetch(kind, property_value).await;
        }

        let key = cache_key(kind, property_value);
        if self.inventory.contains(&key) {
            if let Some(object) = self.inventory.get(&key) {
                debug!("Cache hit for {}", key);
                return Ok(Some(object));
            }
        }

        debug!("Cache miss for {}, querying remote API", key);
        let found = self.lookup.fetch(kind, property_value).await?;
        if let Some(object) = &found {
            let entry = Entry::new(key.clone(), object.clone(), self.ttl);
            if let Err(e) = self.inventory.add(entry) {
                warn!("Failed to cache {}: {}", key, e);
            }
        }
        Ok(found)
    }

    /// Drops every cached object, e.g. after a reconnect.
    pub fn invalidate_all(&self) {
        self.inventory.clear();
    }

    pub fn inventory(&self) -> &Arc<Inventory<L::Object>> {
        &self.inventory
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn is_cache_enabled(&self) -> bool {
        self.enabled
    }
}
