//! API Handlers
//!
//! Origin handlers for the cached demo routes and admin handlers for
//! inspecting and maintaining the response cache.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::{json, Value};

use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    CleanupResponse, ClearResponse, DeleteResponse, EntryInfoResponse, HealthResponse,
    KeysResponse, StatsResponse,
};

use super::middleware::{build_response_cache, RequestDescriptor, ResponseCache};

/// Application state shared across all handlers.
///
/// The cache instance is wrapped in Arc<RwLock<>> so the middleware and
/// the admin handlers serialize access to the single-threaded engine.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe response cache
    pub cache: Arc<RwLock<ResponseCache>>,
}

impl AppState {
    /// Creates a new AppState around an existing cache instance.
    pub fn new(cache: ResponseCache) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(build_response_cache(config.cache_config()))
    }
}

// == Admin Handlers ==

/// Handler for GET /cache/stats
///
/// Returns a statistics snapshot plus the active eviction policy.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::new(&cache.stats(), cache.strategy()))
}

/// Handler for GET /cache/keys
///
/// Lists all cache keys in insertion order.
pub async fn keys_handler(State(state): State<AppState>) -> Json<KeysResponse> {
    let cache = state.cache.read().await;
    Json(KeysResponse::new(cache.keys()))
}

/// Handler for GET /cache/entry?method=GET&uri=/demo/time
///
/// Diagnostic projection of one entry's internal metadata.
pub async fn entry_info_handler(
    State(state): State<AppState>,
    Query(descriptor): Query<RequestDescriptor>,
) -> Result<Json<EntryInfoResponse>> {
    let cache = state.cache.read().await;
    match cache.entry_info(&descriptor)? {
        Some(entry) => Ok(Json(EntryInfoResponse::new(entry))),
        None => Err(CacheError::NotFound(descriptor.cache_key())),
    }
}

/// Handler for DELETE /cache/entry?method=GET&uri=/demo/time
///
/// Explicitly removes one entry; this never counts as an eviction.
pub async fn delete_entry_handler(
    State(state): State<AppState>,
    Query(descriptor): Query<RequestDescriptor>,
) -> Result<Json<DeleteResponse>> {
    let mut cache = state.cache.write().await;
    if cache.delete(&descriptor)? {
        Ok(Json(DeleteResponse { removed: true }))
    } else {
        Err(CacheError::NotFound(descriptor.cache_key()))
    }
}

/// Handler for DELETE /cache
///
/// Empties the cache and resets all statistics.
pub async fn clear_handler(State(state): State<AppState>) -> Json<ClearResponse> {
    let mut cache = state.cache.write().await;
    cache.clear();
    Json(ClearResponse::new())
}

/// Handler for POST /cache/cleanup
///
/// Eagerly sweeps expired entries, returning how many were removed.
pub async fn cleanup_handler(State(state): State<AppState>) -> Json<CleanupResponse> {
    let mut cache = state.cache.write().await;
    Json(CleanupResponse {
        removed: cache.cleanup(),
    })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

// == Demo Origin Handlers ==
// Wrapped by the cache middleware; they stand in for whatever expensive
// upstream a deployment would put behind the cache.

/// Handler for GET /demo/time
///
/// Returns the current server time. Once cached, repeat reads within the
/// TTL observe the first timestamp, which makes hits easy to see.
pub async fn demo_time_handler() -> Json<Value> {
    Json(json!({ "now": chrono::Utc::now().to_rfc3339() }))
}

/// Handler for GET /demo/greet/:name
pub async fn demo_greet_handler(Path(name): Path<String>) -> Json<Value> {
    Json(json!({ "greeting": format!("Hello, {}!", name) }))
}

/// Handler for POST /demo/echo
///
/// Echoes the request body. Never admitted to the cache (non-GET).
pub async fn demo_echo_handler(body: String) -> String {
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::middleware::{compute_etag, CachedResponse};
    use chrono::Utc;

    fn test_state() -> AppState {
        AppState::from_config(&Config::default())
    }

    async fn seed(state: &AppState, method: &str, uri: &str, body: &str) {
        let descriptor = RequestDescriptor::new(method, uri);
        let cached = CachedResponse {
            status: 200,
            content_type: Some("application/json".to_string()),
            etag: compute_etag(body),
            last_modified: Utc::now(),
            body: body.to_string(),
        };
        let mut cache = state.cache.write().await;
        cache.set(&descriptor, cached, None).unwrap();
    }

    #[tokio::test]
    async fn test_stats_handler_empty_cache() {
        let response = stats_handler(State(test_state())).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
        assert_eq!(response.size, 0);
        assert_eq!(response.hit_rate, 0.0);
    }

    #[tokio::test]
    async fn test_keys_handler_lists_seeded_entries() {
        let state = test_state();
        seed(&state, "GET", "/demo/time", "{}").await;

        let response = keys_handler(State(state)).await;
        assert_eq!(response.count, 1);
        assert_eq!(response.keys, vec!["GET /demo/time".to_string()]);
    }

    #[tokio::test]
    async fn test_entry_info_handler() {
        let state = test_state();
        seed(&state, "GET", "/demo/time", "{\"now\":1}").await;

        let descriptor = RequestDescriptor::new("GET", "/demo/time");
        let response = entry_info_handler(State(state.clone()), Query(descriptor))
            .await
            .unwrap();
        assert_eq!(response.hits, 0);
        assert!(!response.expired);

        let missing = RequestDescriptor::new("GET", "/absent");
        let result = entry_info_handler(State(state), Query(missing)).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_entry_handler() {
        let state = test_state();
        seed(&state, "GET", "/demo/time", "{}").await;

        let descriptor = RequestDescriptor::new("GET", "/demo/time");
        let response = delete_entry_handler(State(state.clone()), Query(descriptor.clone()))
            .await
            .unwrap();
        assert!(response.removed);

        let result = delete_entry_handler(State(state), Query(descriptor)).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_clear_handler_resets_stats() {
        let state = test_state();
        seed(&state, "GET", "/demo/time", "{}").await;

        clear_handler(State(state.clone())).await;

        let stats = stats_handler(State(state)).await;
        assert_eq!(stats.size, 0);
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
    }

    #[tokio::test]
    async fn test_cleanup_handler_empty_cache() {
        let response = cleanup_handler(State(test_state())).await;
        assert_eq!(response.removed, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_demo_greet_handler() {
        let response = demo_greet_handler(Path("world".to_string())).await;
        assert_eq!(response["greeting"], "Hello, world!");
    }
}
