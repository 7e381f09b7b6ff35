//! API Routes
//!
//! Configures the Axum router: demo origin routes behind the cache
//! middleware, plus the uncached admin and health endpoints.

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cleanup_handler, clear_handler, delete_entry_handler, demo_echo_handler, demo_greet_handler,
    demo_time_handler, entry_info_handler, health_handler, keys_handler, stats_handler, AppState,
};
use super::middleware::cache_layer;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /demo/time`, `GET /demo/greet/:name`, `POST /demo/echo` -
///   origin routes wrapped by the response cache
/// - `GET /cache/stats` - Statistics snapshot
/// - `GET /cache/keys` - Key listing
/// - `GET|DELETE /cache/entry?method=&uri=` - Entry diagnostics / removal
/// - `DELETE /cache` - Clear the cache
/// - `POST /cache/cleanup` - Sweep expired entries
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Response cache: only on the demo routes; admin routes stay uncached
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let demo_routes = Router::new()
        .route("/demo/time", get(demo_time_handler))
        .route("/demo/greet/:name", get(demo_greet_handler))
        .route("/demo/echo", post(demo_echo_handler))
        .layer(middleware::from_fn_with_state(state.clone(), cache_layer));

    Router::new()
        .merge(demo_routes)
        .route("/cache/stats", get(stats_handler))
        .route("/cache/keys", get(keys_handler))
        .route(
            "/cache/entry",
            get(entry_info_handler).delete(delete_entry_handler),
        )
        .route("/cache", delete(clear_handler))
        .route("/cache/cleanup", post(cleanup_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
