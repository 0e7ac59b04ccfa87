//! API Routes
//!
//! Configures the Axum router for the cache admin endpoints.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    add_handler, clear_handler, get_handler, health_handler, info_handler, stats_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `PUT /cache` - Cache a JSON object
/// - `DELETE /cache` - Drop every cached object
/// - `GET /cache/:name` - Fetch a cached object
/// - `GET /cache/:name/info` - Entry metadata (hits, ttl, created_at)
/// - `GET /stats` - Inventory statistics
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/cache", put(add_handler).delete(clear_handler))
        .route("/cache/:name", get(get_handler))
        .route("/cache/:name/info", get(info_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
