//! Cache Module
//!
//! Provides the object inventory: a bounded, thread-safe cache with
//! per-entry TTL, oldest-insertion eviction and background housekeeping.

mod entry;
mod inventory;
mod order;
mod stats;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{Entry, EntryInfo};
pub use inventory::Inventory;
pub use order::InsertionOrder;
pub use stats::CacheStats;

pub(crate) use inventory::Shelf;
