//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

use crate::cache::{CacheConfig, EvictionStrategy};

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Default TTL in milliseconds for entries without explicit TTL
    pub default_ttl_ms: u64,
    /// Eviction policy for the response cache
    pub strategy: EvictionStrategy,
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `DEFAULT_TTL_MS` - Default TTL in milliseconds (default: 300000)
    /// - `CACHE_STRATEGY` - Eviction policy: lru, fifo or lfu (default: lru)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 5)
    pub fn from_env() -> Self {
        Self {
            max_entries: env::var("MAX_ENTRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            default_ttl_ms: env::var("DEFAULT_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300_000),
            strategy: env::var("CACHE_STRATEGY")
                .ok()
                .map(|v| EvictionStrategy::parse(&v))
                .unwrap_or_default(),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5),
        }
    }

    /// Engine construction parameters derived from the server config.
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            ttl_ms: self.default_ttl_ms,
            max_size: self.max_entries,
            strategy: self.strategy,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            default_ttl_ms: 300_000,
            strategy: EvictionStrategy::Lru,
            server_port: 3000,
            cleanup_interval: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.default_ttl_ms, 300_000);
        assert_eq!(config.strategy, EvictionStrategy::Lru);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 5);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("MAX_ENTRIES");
        env::remove_var("DEFAULT_TTL_MS");
        env::remove_var("CACHE_STRATEGY");
        env::remove_var("SERVER_PORT");
        env::remove_var("CLEANUP_INTERVAL");

        let config = Config::from_env();
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.default_ttl_ms, 300_000);
        assert_eq!(config.strategy, EvictionStrategy::Lru);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cleanup_interval, 5);
    }

    #[test]
    fn test_cache_config_projection() {
        let config = Config {
            max_entries: 42,
            default_ttl_ms: 1234,
            strategy: EvictionStrategy::Lfu,
            ..Config::default()
        };

        let cache_config = config.cache_config();
        assert_eq!(cache_config.max_size, 42);
        assert_eq!(cache_config.ttl_ms, 1234);
        assert_eq!(cache_config.strategy, EvictionStrategy::Lfu);
    }
}
