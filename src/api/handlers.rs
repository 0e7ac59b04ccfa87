//! API Handlers
//!
//! HTTP request handlers for the cache admin endpoints.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::{Entry, EntryInfo, Inventory};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    AddRequest, AddResponse, ClearResponse, GetResponse, HealthResponse, StatsResponse,
};

/// Application state shared across all handlers.
///
/// The inventory does its own locking, so handlers share it through a
/// plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<Inventory<Value>>,
    /// TTL for objects stored without an explicit one
    pub default_ttl: Duration,
}

impl AppState {
    pub fn new(cache: Inventory<Value>, default_ttl: Duration) -> Self {
        Self {
            cache: Arc::new(cache),
            default_ttl,
        }
    }

    /// Builds the inventory and default TTL from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let default_ttl = config.cache.default_ttl()?;
        let cache = Inventory::from_config(&config.cache)?;
        Ok(Self::new(cache, default_ttl))
    }
}

/// Handler for PUT /cache
pub async fn add_handler(
    State(state): State<AppState>,
    Json(req): Json<AddRequest>,
) -> Result<Json<AddResponse>> {
    let ttl = req.ttl_or(state.default_ttl);
    state.cache.add(Entry::new(req.name.clone(), req.value, ttl))?;

    Ok(Json(AddResponse::new(req.name, ttl.as_secs())))
}

/// Handler for GET /cache/:name
///
/// Counts a hit on success; unknown and expired names are 404.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<GetResponse>> {
    let value = state
        .cache
        .get(&name)
        .ok_or_else(|| CacheError::NotFound(name.clone()))?;

    Ok(Json(GetResponse::new(name, value)))
}

/// Handler for GET /cache/:name/info
///
/// Reports stored metadata without checking expiry.
pub async fn info_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<EntryInfo>> {
    state
        .cache
        .info(&name)
        .map(Json)
        .ok_or(CacheError::NotFound(name))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    Json(ClearResponse::new(state.cache.clear()))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats();
    Json(StatsResponse::new(&stats, state.cache.max_size()))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.cache.is_housekeeping()))
}
