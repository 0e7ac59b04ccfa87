//! Error types for the connector and its object cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the connector and cache inventory.
///
/// A cache miss is never an error; lookups report it as `None`.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Invalid inventory limits or housekeeping setup
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Entry rejected by `Inventory::add`
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    /// Name not present in the inventory
    #[error("Not found: {0}")]
    NotFound(String),

    /// Remote object lookup failed
    #[error("Lookup failed: {0}")]
    Lookup(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CacheError::InvalidEntry(_) => StatusCode::BAD_REQUEST,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::Lookup(_) => StatusCode::BAD_GATEWAY,
            CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, CacheError>;
