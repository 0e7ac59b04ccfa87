//! vConnector - connection manager support for a virtualization management API
//!
//! Provides a bounded, TTL-aware object inventory that memoizes expensive
//! remote lookups, a caching connector front, and an HTTP admin surface.

pub mod api;
pub mod cache;
pub mod config;
pub mod connector;
pub mod error;
pub mod models;
mod tasks;

pub use api::AppState;
pub use cache::{Entry, EntryInfo, Inventory};
pub use config::{CacheConfig, Config};
pub use connector::{cache_key, CachedConnector, ObjectLookup};
pub use error::{CacheError, Result};
