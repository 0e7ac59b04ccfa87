//! API Module
//!
//! HTTP admin surface over a shared object inventory, for pollers that
//! share lookups and for monitoring.
//!
//! # Endpoints
//! - `PUT /cache` - Cache a JSON object
//! - `DELETE /cache` - Clear the inventory
//! - `GET /cache/:name` - Retrieve a cached object
//! - `GET /cache/:name/info` - Entry metadata
//! - `GET /stats` - Inventory statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
