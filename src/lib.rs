//! rescache - An in-memory response cache
//!
//! A generic, capacity-bounded cache engine with pluggable eviction
//! (LRU, FIFO, LFU), per-entry TTL and hit/miss accounting, plus an HTTP
//! layer that serves cached responses with X-Cache / X-Cache-Age headers
//! and conditional-request (ETag / Last-Modified) support.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{Cache, CacheConfig, CacheEntry, CacheStats, EvictionStrategy};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_cleanup_task;
