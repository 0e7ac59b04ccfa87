//! Background Tasks Module
//!
//! Contains background work that runs periodically for the lifetime of
//! its owner.
//!
//! # Tasks
//! - Housekeeper: sweeps expired entries out of a cache inventory
//!
//! Each task runs on the ambient tokio runtime when there is one and on
//! its own named thread otherwise.

mod housekeeper;

pub(crate) use housekeeper::{spawn_housekeeper, Housekeeper};
