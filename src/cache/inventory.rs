//! Cache Inventory Module
//!
//! Thread-safe store of named entries combining a HashMap with insertion
//! order tracking, TTL expiration and a bounded size.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::cache::{CacheStats, Entry, EntryInfo, InsertionOrder};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::tasks::{spawn_housekeeper, Housekeeper};

// == Shelf ==
/// State guarded by the inventory lock.
#[derive(Debug)]
pub(crate) struct Shelf<V> {
    entries: HashMap<String, Entry<V>>,
    order: InsertionOrder,
    stats: CacheStats,
}

impl<V> Shelf<V> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
        }
    }

    /// Drops `name` if it has expired. Returns true when it was removed.
    fn prune_if_expired(&mut self, name: &str) -> bool {
        let expired = self
            .entries
            .get(name)
            .map(|entry| entry.is_expired())
            .unwrap_or(false);

        if expired {
            debug!("Object {} has expired and will be removed from cache", name);
            self.remove(name);
            self.stats.record_expirations(1);
        }
        expired
    }

    fn remove(&mut self, name: &str) -> Option<Entry<V>> {
        let removed = self.entries.remove(name);
        self.order.remove(name);
        removed
    }

    // == Sweep ==
    /// Removes every expired entry. Returns the number removed.
    pub(crate) fn sweep(&mut self) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(name, _)| name.clone())
            .collect();

        for name in &expired {
            self.remove(name);
        }

        self.stats.record_expirations(expired.len());
        expired.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

// == Inventory ==
/// Bounded, TTL-aware cache of named objects shared across threads.
///
/// Every operation holds the inventory lock for its whole body, so all
/// operations on one inventory are totally ordered. Expired entries are
/// removed when a lookup notices them and, if a housekeeping period is set,
/// by a background sweep at that period.
///
/// The inventory never loads values itself. Callers check it, fetch on a
/// miss and `add` the result.
#[derive(Debug)]
pub struct Inventory<V> {
    shelf: Arc<Mutex<Shelf<V>>>,
    max_size: usize,
    housekeeping: Duration,
    housekeeper: Mutex<Option<Housekeeper>>,
}

impl<V: Send + 'static> Inventory<V> {
    // == Constructor ==
    /// Creates a new inventory from raw configuration values.
    ///
    /// # Arguments
    /// * `max_size` - Upper bound on stored entries, 0 = unbounded
    /// * `housekeeping_secs` - Sweep period in seconds, 0 = no sweep
    ///
    /// # Errors
    /// `CacheError::Configuration` if either value is negative.
    pub fn new(max_size: i64, housekeeping_secs: i64) -> Result<Self> {
        if max_size < 0 {
            return Err(CacheError::Configuration(
                "Cache inventory size cannot be negative".to_string(),
            ));
        }
        if housekeeping_secs < 0 {
            return Err(CacheError::Configuration(
                "Cache housekeeping period cannot be negative".to_string(),
            ));
        }

        Self::with_limits(
            max_size as usize,
            Duration::from_secs(housekeeping_secs as u64),
        )
    }

    /// Creates a new inventory with typed limits.
    ///
    /// A non-zero `housekeeping` period starts the background sweep and
    /// returns without waiting for it. The sweep is a task on the current
    /// tokio runtime, or a dedicated thread when called outside one.
    ///
    /// # Errors
    /// `CacheError::Internal` if the sweep thread cannot be started.
    pub fn with_limits(max_size: usize, housekeeping: Duration) -> Result<Self> {
        let shelf = Arc::new(Mutex::new(Shelf::new()));

        let housekeeper = if housekeeping.is_zero() {
            None
        } else {
            Some(spawn_housekeeper(Arc::downgrade(&shelf), housekeeping)?)
        };

        info!(
            "Cache inventory created: maxsize={}, housekeeping={}s",
            max_size,
            housekeeping.as_secs_f64()
        );

        Ok(Self {
            shelf,
            max_size,
            housekeeping,
            housekeeper: Mutex::new(housekeeper),
        })
    }

    /// Creates a new inventory from the cache section of the configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::new(config.maxsize, config.housekeeping_secs())
    }
}

impl<V> Inventory<V> {
    // == Add ==
    /// Stores an entry under its name, replacing any previous entry.
    ///
    /// Adding a new name to a full inventory first evicts the oldest
    /// inserted entry, expired or not. Replacing an existing name resets
    /// its hits and creation time but keeps its place in insertion order.
    ///
    /// # Errors
    /// `CacheError::InvalidEntry` for an empty name. The inventory is left
    /// untouched.
    pub fn add(&self, entry: Entry<V>) -> Result<()> {
        let name = entry.name();
        if name.is_empty() {
            return Err(CacheError::InvalidEntry(
                "Entry name cannot be empty".to_string(),
            ));
        }

        let mut shelf = self.shelf.lock();

        let is_overwrite = shelf.entries.contains_key(name);
        if !is_overwrite && self.max_size > 0 && shelf.entries.len() >= self.max_size {
            if let Some(evicted) = shelf.order.evict_oldest() {
                debug!("Cache maxsize reached, removing {}", evicted);
                shelf.entries.remove(&evicted);
                shelf.stats.record_eviction();
            }
        }

        debug!(
            "Caching object {} [ttl: {} seconds]",
            name,
            entry.ttl().as_secs()
        );
        let name = name.to_string();
        shelf.order.record(&name);
        shelf.entries.insert(name, entry);

        Ok(())
    }

    // == Contains ==
    /// Returns true if `name` is stored and not expired.
    ///
    /// An expired entry is removed as a side effect.
    pub fn contains(&self, name: &str) -> bool {
        let mut shelf = self.shelf.lock();
        if !shelf.entries.contains_key(name) {
            return false;
        }
        !shelf.prune_if_expired(name)
    }

    // == Clear ==
    /// Removes every entry without checking expiry.
    ///
    /// Returns how many entries were dropped.
    pub fn clear(&self) -> usize {
        let mut shelf = self.shelf.lock();
        let dropped = shelf.entries.len();
        shelf.entries.clear();
        shelf.order.clear();
        debug!("Cache inventory cleared, {} entries dropped", dropped);
        dropped
    }

    // == Info ==
    /// Returns a metadata snapshot for `name`.
    ///
    /// Expiry is not checked, so a stale entry that nothing has observed yet
    /// still reports its last known state.
    pub fn info(&self, name: &str) -> Option<EntryInfo> {
        self.shelf.lock().entries.get(name).map(Entry::info)
    }

    // == Length ==
    /// Number of stored entries. Stale entries count until observed.
    pub fn len(&self) -> usize {
        self.shelf.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn housekeeping_period(&self) -> Duration {
        self.housekeeping
    }

    // == Stats ==
    /// Returns a copy of the inventory counters.
    pub fn stats(&self) -> CacheStats {
        let shelf = self.shelf.lock();
        let mut stats = shelf.stats.clone();
        stats.set_total_entries(shelf.len());
        stats
    }

    // == Close ==
    /// Stops the background sweep. Safe to call more than once.
    ///
    /// The inventory stays usable; only lazy expiry remains afterwards.
    pub fn close(&self) {
        if let Some(housekeeper) = self.housekeeper.lock().take() {
            housekeeper.stop();
            info!("Cache housekeeper stopped");
        }
    }

    /// True while a background sweep is attached and running.
    pub fn is_housekeeping(&self) -> bool {
        self.housekeeper
            .lock()
            .as_ref()
            .map(Housekeeper::is_running)
            .unwrap_or(false)
    }
}

impl<V: Clone> Inventory<V> {
    // == Get ==
    /// Retrieves a clone of the value stored under `name`.
    ///
    /// Returns None for unknown or expired names, removing expired ones.
    /// A hit increments the entry's hit counter.
    pub fn get(&self, name: &str) -> Option<V> {
        let mut shelf = self.shelf.lock();

        if !shelf.entries.contains_key(name) || shelf.prune_if_expired(name) {
            shelf.stats.record_miss();
            return None;
        }

        shelf.stats.record_hit();
        shelf.entries.get_mut(name).map(|entry| {
            entry.record_hit();
            entry.value().clone()
        })
    }
}

impl<V> Drop for Inventory<V> {
    fn drop(&mut self) {
        if let Some(housekeeper) = self.housekeeper.get_mut().take() {
            housekeeper.stop();
        }
    }
}
