//! API Module
//!
//! HTTP surface for the response cache: the caching middleware wrapped
//! around the demo origin routes, and the uncached admin endpoints.
//!
//! # Endpoints
//! - `GET /demo/...` - Origin routes behind the cache (X-Cache, ETag,
//!   Last-Modified, conditional-request handling)
//! - `GET /cache/stats` - Cache statistics
//! - `GET /cache/keys` - Key listing
//! - `GET|DELETE /cache/entry` - Entry diagnostics / removal
//! - `DELETE /cache` - Clear
//! - `POST /cache/cleanup` - Expiry sweep
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::AppState;
pub use middleware::{
    build_response_cache, cache_layer, CachedResponse, RequestDescriptor, ResponseCache,
};
pub use routes::create_router;
