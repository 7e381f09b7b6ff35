//! Response DTOs for the cache admin API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheEntry, CacheStats, EvictionStrategy};

/// Response body for the stats endpoint (GET /cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of capacity-driven evictions
    pub evictions: u64,
    /// Current number of entries in cache
    pub size: usize,
    /// Approximate memory footprint in bytes
    pub memory_usage: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Active eviction policy
    pub strategy: EvictionStrategy,
}

impl StatsResponse {
    /// Creates a new StatsResponse from a stats snapshot
    pub fn new(stats: &CacheStats, strategy: EvictionStrategy) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            size: stats.size,
            memory_usage: stats.memory_usage,
            hit_rate: stats.hit_rate(),
            strategy,
        }
    }
}

/// Response body for the key listing endpoint (GET /cache/keys)
#[derive(Debug, Clone, Serialize)]
pub struct KeysResponse {
    /// Number of keys currently held
    pub count: usize,
    /// Cache keys in insertion order
    pub keys: Vec<String>,
}

impl KeysResponse {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            count: keys.len(),
            keys,
        }
    }
}

/// Response body for the entry diagnostic endpoint (GET /cache/entry)
#[derive(Debug, Clone, Serialize)]
pub struct EntryInfoResponse {
    /// Successful reads since the entry was created
    pub hits: u64,
    /// Creation time (Unix milliseconds)
    pub timestamp: u64,
    /// Entry lifetime in milliseconds
    pub ttl_ms: u64,
    /// Milliseconds elapsed since creation
    pub age_ms: u64,
    /// Approximate serialized size in bytes
    pub size: usize,
    /// Whether the TTL has already elapsed
    pub expired: bool,
}

impl EntryInfoResponse {
    /// Projects the internal entry metadata for diagnostic output
    pub fn new<T>(entry: &CacheEntry<T>) -> Self {
        Self {
            hits: entry.hits,
            timestamp: entry.timestamp,
            ttl_ms: entry.ttl,
            age_ms: entry.age_ms(),
            size: entry.size,
            expired: entry.is_expired(),
        }
    }
}

/// Response body for entry removal (DELETE /cache/entry)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Whether an entry was actually removed
    pub removed: bool,
}

/// Response body for the expiry sweep (POST /cache/cleanup)
#[derive(Debug, Clone, Serialize)]
pub struct CleanupResponse {
    /// Number of expired entries removed
    pub removed: usize,
}

/// Response body for the clear endpoint (DELETE /cache)
#[derive(Debug, Clone, Serialize)]
pub struct ClearResponse {
    /// Confirmation message
    pub message: String,
}

impl ClearResponse {
    pub fn new() -> Self {
        Self {
            message: "Cache cleared".to_string(),
        }
    }
}

impl Default for ClearResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheEntry;

    #[test]
    fn test_stats_response_hit_rate() {
        let stats = CacheStats {
            hits: 80,
            misses: 20,
            evictions: 5,
            size: 10,
            memory_usage: 640,
        };
        let resp = StatsResponse::new(&stats, EvictionStrategy::Lru);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);
        assert_eq!(resp.size, 10);
        assert_eq!(resp.memory_usage, 640);
    }

    #[test]
    fn test_stats_response_serializes_strategy() {
        let resp = StatsResponse::new(&CacheStats::new(), EvictionStrategy::Lfu);
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"strategy\":\"lfu\""));
        assert!(json.contains("\"hit_rate\":0.0"));
    }

    #[test]
    fn test_keys_response_counts() {
        let resp = KeysResponse::new(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(resp.count, 2);
    }

    #[test]
    fn test_entry_info_response_projection() {
        let entry = CacheEntry::new("value".to_string(), 60_000, 14);
        let resp = EntryInfoResponse::new(&entry);

        assert_eq!(resp.hits, 0);
        assert_eq!(resp.ttl_ms, 60_000);
        assert_eq!(resp.size, 14);
        assert!(!resp.expired);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("error"));
        assert!(json.contains("Something went wrong"));
    }
}
