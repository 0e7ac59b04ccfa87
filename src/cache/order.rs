//! Insertion Order Module
//!
//! Tracks the order in which names were first inserted, for eviction.

use std::collections::{BTreeMap, HashMap};

// == Insertion Order ==
/// Remembers first-insertion order of cache names.
///
/// Every newly tracked name gets the next sequence number. `by_seq` keeps
/// names ordered by that number (lowest = oldest insertion) and `seq_of`
/// finds a name's number, so recording, removing and evicting are all
/// O(log n).
///
/// Reads never reorder keys, and re-inserting a tracked name keeps its slot.
#[derive(Debug, Default)]
pub struct InsertionOrder {
    by_seq: BTreeMap<u64, String>,
    seq_of: HashMap<String, u64>,
    next_seq: u64,
}

impl InsertionOrder {
    pub fn new() -> Self {
        Self::default()
    }

    // == Record ==
    /// Tracks a name as the newest insertion unless it is already tracked.
    pub fn record(&mut self, name: &str) {
        if self.seq_of.contains_key(name) {
            return;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.by_seq.insert(seq, name.to_string());
        self.seq_of.insert(name.to_string(), seq);
    }

    // == Remove ==
    /// Stops tracking a name.
    pub fn remove(&mut self, name: &str) {
        if let Some(seq) = self.seq_of.remove(name) {
            self.by_seq.remove(&seq);
        }
    }

    // == Evict Oldest ==
    /// Returns and forgets the oldest inserted name.
    ///
    /// Returns None if nothing is tracked.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, name) = self.by_seq.pop_first()?;
        self.seq_of.remove(&name);
        Some(name)
    }

    /// Oldest inserted name without removing it.
    pub fn peek_oldest(&self) -> Option<&String> {
        self.by_seq.first_key_value().map(|(_, name)| name)
    }

    pub fn clear(&mut self) {
        self.by_seq.clear();
        self.seq_of.clear();
    }

    pub fn len(&self) -> usize {
        self.seq_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq_of.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seq_of.contains_key(name)
    }
}
