//! Cache Store Module
//!
//! The cache engine: a capacity-bounded associative store mapping request
//! descriptors to previously computed values, with a configurable eviction
//! policy, per-entry TTL and hit/miss accounting.

use std::collections::HashMap;

use serde::Serialize;

use crate::cache::key::{default_key, estimate_size};
use crate::cache::{CacheEntry, CacheStats, EvictionState, EvictionStrategy};
use crate::error::Result;

// == Caller-Supplied Functions ==
/// Derives a string key from a request descriptor.
pub type KeyGenerator<R> = Box<dyn Fn(&R) -> Result<String> + Send + Sync>;

/// Decides whether a request/response pair is eligible for caching.
pub type AdmissionPredicate<R, T> = Box<dyn Fn(&R, &T) -> bool + Send + Sync>;

// == Cache Config ==
/// Engine construction parameters.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Default entry lifetime in milliseconds
    pub ttl_ms: u64,
    /// Maximum number of simultaneously held entries
    pub max_size: usize,
    /// Eviction policy, fixed after construction
    pub strategy: EvictionStrategy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_ms: 300_000,
            max_size: 1000,
            strategy: EvictionStrategy::Lru,
        }
    }
}

// == Cache ==
/// Generic in-memory cache with policy-driven eviction.
///
/// `R` is the request descriptor handed to the key generator and the
/// admission predicate; `T` is the cached value. Both must serialize, for
/// default keying and for size estimation respectively.
///
/// All operations are plain synchronous calls on `&mut self` / `&self`;
/// callers in concurrent hosts serialize access externally (the server
/// wraps one instance in `Arc<RwLock<_>>`).
pub struct Cache<R, T> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<T>>,
    /// Recency, insertion and frequency bookkeeping for the active policy
    eviction: EvictionState,
    /// Cumulative hit/miss/eviction counters
    stats: CacheStats,
    /// Default TTL in milliseconds for entries without an explicit TTL
    default_ttl_ms: u64,
    /// Maximum number of entries allowed
    max_size: usize,
    /// Request-to-key derivation
    key_generator: KeyGenerator<R>,
    /// Cache-admission gate consulted on every write
    should_cache: AdmissionPredicate<R, T>,
}

impl<R, T> Cache<R, T>
where
    R: Serialize,
    T: Serialize + Clone,
{
    // == Constructor ==
    /// Creates a cache with the default key generator (stable JSON
    /// serialization of the request) and an always-true admission
    /// predicate.
    ///
    /// `max_size` is clamped to at least 1 so the capacity bound is
    /// meaningful for every configuration.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            eviction: EvictionState::new(config.strategy),
            stats: CacheStats::new(),
            default_ttl_ms: config.ttl_ms,
            max_size: config.max_size.max(1),
            key_generator: Box::new(|request: &R| default_key(request)),
            should_cache: Box::new(|_, _| true),
        }
    }

    /// Replaces the key generator.
    pub fn with_key_generator(
        mut self,
        key_generator: impl Fn(&R) -> Result<String> + Send + Sync + 'static,
    ) -> Self {
        self.key_generator = Box::new(key_generator);
        self
    }

    /// Replaces the admission predicate.
    pub fn with_should_cache(
        mut self,
        should_cache: impl Fn(&R, &T) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.should_cache = Box::new(should_cache);
        self
    }

    // == Get ==
    /// Looks up the value cached for a request.
    ///
    /// A live entry counts as a hit, bumps the entry's own hit counter and
    /// refreshes recency/frequency bookkeeping. An expired entry is purged
    /// and counts as a miss, exactly like an absent one. A miss has no
    /// side effect beyond the counter; no placeholder entry is created.
    pub fn get(&mut self, request: &R) -> Result<Option<T>> {
        let key = (self.key_generator)(request)?;

        if self.entries.get(&key).is_some_and(|entry| entry.is_expired()) {
            self.entries.remove(&key);
            self.eviction.forget(&key);
            self.stats.record_miss();
            return Ok(None);
        }

        match self.entries.get_mut(&key) {
            Some(entry) => {
                entry.hits += 1;
                let data = entry.data.clone();
                self.eviction.record_access(&key);
                self.stats.record_hit();
                Ok(Some(data))
            }
            None => {
                self.stats.record_miss();
                Ok(None)
            }
        }
    }

    // == Set ==
    /// Stores a response for a request, subject to the admission predicate.
    ///
    /// An existing entry under the same key is removed first, so a
    /// re-insertion is fresh rather than an update in place: its FIFO
    /// position and LFU frequency restart. At capacity, exactly one
    /// policy-chosen victim is evicted before inserting.
    ///
    /// # Arguments
    /// * `request` - The request descriptor to key by
    /// * `response` - The value to cache
    /// * `ttl_ms` - Optional per-entry TTL (uses the cache-wide default if None)
    pub fn set(&mut self, request: &R, response: T, ttl_ms: Option<u64>) -> Result<()> {
        if !(self.should_cache)(request, &response) {
            return Ok(());
        }

        let key = (self.key_generator)(request)?;
        // Estimate before mutating anything, so a serialization failure
        // leaves existing entries and statistics untouched.
        let size = estimate_size(&response)?;

        if self.entries.remove(&key).is_some() {
            self.eviction.forget(&key);
        }

        if self.entries.len() >= self.max_size {
            if let Some(victim) = self.eviction.victim() {
                self.entries.remove(&victim);
                self.eviction.forget(&victim);
                self.stats.record_eviction();
            }
        }

        let ttl = ttl_ms.unwrap_or(self.default_ttl_ms);
        self.entries.insert(key.clone(), CacheEntry::new(response, ttl, size));
        self.eviction.record_insert(&key);

        Ok(())
    }

    // == Has ==
    /// True iff a live (non-expired) entry exists for the request.
    ///
    /// A pure predicate: no counters, recency or frequency are touched,
    /// and an expired entry is left in place for the next access or sweep
    /// to reap.
    pub fn has(&self, request: &R) -> Result<bool> {
        let key = (self.key_generator)(request)?;
        Ok(self.entries.get(&key).is_some_and(|entry| !entry.is_expired()))
    }

    // == Delete ==
    /// Removes the entry for a request, reporting whether one existed.
    ///
    /// Explicit removal is not an eviction; the eviction counter and the
    /// hit/miss counters are unaffected.
    pub fn delete(&mut self, request: &R) -> Result<bool> {
        let key = (self.key_generator)(request)?;
        if self.entries.remove(&key).is_some() {
            self.eviction.forget(&key);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    // == Clear ==
    /// Empties the cache and resets all statistics to zero, including the
    /// cumulative hit/miss counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.eviction.clear();
        self.stats = CacheStats::new();
    }

    // == Cleanup ==
    /// Eagerly removes every expired entry.
    ///
    /// Returns the number removed. Hit, miss and eviction counters are
    /// reserved for access-driven and capacity-driven events and stay
    /// untouched.
    pub fn cleanup(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.eviction.forget(&key);
        }

        count
    }

    // == Projections ==
    /// All cache keys, oldest insertion first.
    pub fn keys(&self) -> Vec<String> {
        self.eviction.insertion_order().cloned().collect()
    }

    /// All (key, value) pairs, oldest insertion first.
    pub fn entries(&self) -> Vec<(String, T)> {
        self.eviction
            .insertion_order()
            .filter_map(|key| {
                self.entries
                    .get(key)
                    .map(|entry| (key.clone(), entry.data.clone()))
            })
            .collect()
    }

    /// The full internal entry for a request, including hit count and
    /// timestamp. Diagnostic use; expired entries are returned as stored.
    pub fn entry_info(&self, request: &R) -> Result<Option<&CacheEntry<T>>> {
        let key = (self.key_generator)(request)?;
        Ok(self.entries.get(&key))
    }

    // == Stats ==
    /// Returns a statistics snapshot with the derived fields filled in.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.size = self.entries.len();
        stats.memory_usage = self
            .entries
            .iter()
            .map(|(key, entry)| 2 * key.len() + entry.size)
            .sum();
        stats
    }

    /// The active eviction policy.
    pub fn strategy(&self) -> EvictionStrategy {
        self.eviction.strategy()
    }

    // == Length ==
    /// Current number of entries, expired ones included until reaped.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
