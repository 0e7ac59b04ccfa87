//! Connector Module
//!
//! Caching front for remote managed-object lookups. The remote protocol
//! lives behind the [`ObjectLookup`] trait; this module decides when the
//! inventory can answer instead.

mod lookup;

pub use lookup::{cache_key, CachedConnector, ObjectLookup};
