//! Response Cache Middleware
//!
//! Wraps origin handlers with the cache engine: hits are answered from
//! the store with `X-Cache: HIT` and `X-Cache-Age` headers, misses run
//! the inner handler and admit its response. Conditional requests
//! (`If-None-Match`, `If-Modified-Since`) short-circuit to 304 when the
//! cached validators still hold.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cache::{Cache, CacheConfig};

use super::handlers::AppState;

// == Request Descriptor ==
/// What the engine keys cached responses by: method plus full request URI
/// (path and query).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// HTTP method, uppercase
    pub method: String,
    /// Request path including any query string
    pub uri: String,
}

impl RequestDescriptor {
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
        }
    }

    /// The human-readable cache key this descriptor derives to.
    pub fn cache_key(&self) -> String {
        format!("{} {}", self.method, self.uri)
    }
}

// == Cached Response ==
/// The value stored per request: enough to replay the response and to
/// answer conditional requests without it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedResponse {
    /// Origin status code
    pub status: u16,
    /// Origin Content-Type header, if any
    pub content_type: Option<String>,
    /// Buffered response body (UTF-8; other bodies are never admitted)
    pub body: String,
    /// Validator derived from the body at store time, quoted
    pub etag: String,
    /// When the origin produced the response
    pub last_modified: DateTime<Utc>,
}

/// The cache instance the server shares across handlers.
pub type ResponseCache = Cache<RequestDescriptor, CachedResponse>;

/// Builds the server's cache: human-readable `"METHOD uri"` keys, and
/// admission restricted to successful GET responses.
pub fn build_response_cache(config: CacheConfig) -> ResponseCache {
    Cache::new(config)
        .with_key_generator(|request: &RequestDescriptor| Ok(request.cache_key()))
        .with_should_cache(|request: &RequestDescriptor, response: &CachedResponse| {
            request.method == "GET" && response.status == 200
        })
}

// == Middleware ==
/// Axum middleware placing the cache in front of the wrapped routes.
///
/// Engine errors are logged and the request served uncached; a cache
/// problem must never take down the origin path.
pub async fn cache_layer(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let descriptor = RequestDescriptor::new(request.method().as_str(), request.uri().to_string());
    let request_headers = request.headers().clone();

    let lookup = {
        let mut cache = state.cache.write().await;
        match cache.get(&descriptor) {
            Ok(Some(cached)) => {
                let age_secs = cache
                    .entry_info(&descriptor)
                    .ok()
                    .flatten()
                    .map(|entry| entry.age_ms() / 1000)
                    .unwrap_or(0);
                Some((cached, age_secs))
            }
            Ok(None) => None,
            Err(err) => {
                warn!("Cache lookup failed, serving uncached: {}", err);
                None
            }
        }
    };

    if let Some((cached, age_secs)) = lookup {
        if is_not_modified(&request_headers, &cached) {
            return not_modified_response(&cached);
        }
        return hit_response(&cached, age_secs);
    }

    // Miss: run the origin handler and buffer its body for admission.
    let response = next.run(request).await;
    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!("Failed to buffer origin response body: {}", err);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    parts
        .headers
        .insert(x_cache_header(), HeaderValue::from_static("MISS"));

    let text = match String::from_utf8(bytes.to_vec()) {
        Ok(text) => text,
        // Non-UTF-8 bodies pass through uncached.
        Err(_) => return Response::from_parts(parts, Body::from(bytes)),
    };

    let content_type = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string());

    let cached = CachedResponse {
        status: parts.status.as_u16(),
        content_type,
        etag: compute_etag(&text),
        last_modified: Utc::now(),
        body: text,
    };

    // Attach validators to the outgoing miss as well, so clients can
    // revalidate on their next request.
    if let Ok(value) = HeaderValue::from_str(&cached.etag) {
        parts.headers.insert(header::ETAG, value);
    }
    if let Ok(value) = HeaderValue::from_str(&http_date(&cached.last_modified)) {
        parts.headers.insert(header::LAST_MODIFIED, value);
    }

    {
        let mut cache = state.cache.write().await;
        if let Err(err) = cache.set(&descriptor, cached, None) {
            warn!("Cache store failed, serving uncached: {}", err);
        }
    }

    Response::from_parts(parts, Body::from(bytes))
}

// == Conditional Requests ==
/// Whether the client's validators still match the cached entry.
///
/// `If-None-Match` wins when present: any listed tag (or `*`) matching
/// the stored ETag means not modified. Otherwise `If-Modified-Since`
/// applies at second granularity, the resolution of HTTP dates.
pub fn is_not_modified(headers: &HeaderMap, cached: &CachedResponse) -> bool {
    if let Some(tags) = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
    {
        if tags
            .split(',')
            .map(str::trim)
            .any(|tag| tag == "*" || tag == cached.etag)
        {
            return true;
        }
    }

    if let Some(since) = headers
        .get(header::IF_MODIFIED_SINCE)
        .and_then(|value| value.to_str().ok())
    {
        if let Ok(since) = DateTime::parse_from_rfc2822(since) {
            return cached.last_modified.timestamp() <= since.timestamp();
        }
    }

    false
}

// == Response Builders ==
fn hit_response(cached: &CachedResponse, age_secs: u64) -> Response {
    let mut headers = validator_headers(cached);
    headers.insert(x_cache_header(), HeaderValue::from_static("HIT"));
    if let Ok(value) = HeaderValue::from_str(&age_secs.to_string()) {
        headers.insert(HeaderName::from_static("x-cache-age"), value);
    }
    if let Some(content_type) = &cached.content_type {
        if let Ok(value) = HeaderValue::from_str(content_type) {
            headers.insert(header::CONTENT_TYPE, value);
        }
    }

    let status = StatusCode::from_u16(cached.status).unwrap_or(StatusCode::OK);
    (status, headers, cached.body.clone()).into_response()
}

fn not_modified_response(cached: &CachedResponse) -> Response {
    let mut headers = validator_headers(cached);
    headers.insert(x_cache_header(), HeaderValue::from_static("HIT"));
    (StatusCode::NOT_MODIFIED, headers).into_response()
}

fn validator_headers(cached: &CachedResponse) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&cached.etag) {
        headers.insert(header::ETAG, value);
    }
    if let Ok(value) = HeaderValue::from_str(&http_date(&cached.last_modified)) {
        headers.insert(header::LAST_MODIFIED, value);
    }
    headers
}

fn x_cache_header() -> HeaderName {
    HeaderName::from_static("x-cache")
}

// == Validators ==
/// Quoted ETag over the body content. The cache is process-local, so a
/// process-local hash is sufficient as a validator.
pub fn compute_etag(body: &str) -> String {
    let mut hasher = DefaultHasher::new();
    body.hash(&mut hasher);
    format!("\"{:016x}\"", hasher.finish())
}

/// HTTP date formatting (RFC 7231 fixed format, GMT).
pub fn http_date(time: &DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
