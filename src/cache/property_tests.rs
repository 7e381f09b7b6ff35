//! Property-Based Tests for the Cache Engine
//!
//! Uses proptest to verify the engine's behavioral properties across
//! randomized operation sequences and all three eviction strategies.

use proptest::prelude::*;

use crate::cache::{Cache, CacheConfig, EvictionStrategy};

// == Test Configuration ==
const TEST_MAX_SIZE: usize = 100;
const TEST_TTL_MS: u64 = 300_000;

fn test_cache(max_size: usize, strategy: EvictionStrategy) -> Cache<String, String> {
    Cache::new(CacheConfig {
        ttl_ms: TEST_TTL_MS,
        max_size,
        strategy,
    })
}

// == Strategies ==
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_]{1,16}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,64}"
}

fn eviction_strategy() -> impl Strategy<Value = EvictionStrategy> {
    prop_oneof![
        Just(EvictionStrategy::Lru),
        Just(EvictionStrategy::Fifo),
        Just(EvictionStrategy::Lfu),
    ]
}

/// One step of a randomized workload.
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any operation sequence, the hit and miss counters equal the
    // number of successful and failed reads, and the snapshot size
    // matches the entry count.
    #[test]
    fn prop_statistics_accuracy(
        ops in prop::collection::vec(cache_op_strategy(), 1..50),
        strategy in eviction_strategy()
    ) {
        let mut cache = test_cache(TEST_MAX_SIZE, strategy);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    cache.set(&key, value, None).unwrap();
                }
                CacheOp::Get { key } => {
                    match cache.get(&key).unwrap() {
                        Some(_) => expected_hits += 1,
                        None => expected_misses += 1,
                    }
                }
                CacheOp::Delete { key } => {
                    cache.delete(&key).unwrap();
                }
            }
        }

        let stats = cache.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.size, cache.len(), "Size mismatch");
    }

    // For any key-value pair, a set followed by a get (before expiry)
    // returns the stored value.
    #[test]
    fn prop_roundtrip_storage(key in key_strategy(), value in value_strategy()) {
        let mut cache = test_cache(TEST_MAX_SIZE, EvictionStrategy::Lru);

        cache.set(&key, value.clone(), None).unwrap();

        let retrieved = cache.get(&key).unwrap();
        prop_assert_eq!(retrieved, Some(value), "Round-trip value mismatch");
    }

    // For any key, storing V1 then V2 leaves exactly one entry holding V2.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut cache = test_cache(TEST_MAX_SIZE, EvictionStrategy::Lru);

        cache.set(&key, value1, None).unwrap();
        cache.set(&key, value2.clone(), None).unwrap();

        let retrieved = cache.get(&key).unwrap();
        prop_assert_eq!(retrieved, Some(value2), "Overwrite should return new value");
        prop_assert_eq!(cache.len(), 1, "Should have exactly one entry after overwrite");
    }

    // For any sequence of sets under any strategy, the entry count never
    // exceeds the capacity bound.
    #[test]
    fn prop_capacity_enforcement(
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..200),
        strategy in eviction_strategy()
    ) {
        let max_size = 50;
        let mut cache = test_cache(max_size, strategy);

        for (key, value) in entries {
            cache.set(&key, value, None).unwrap();
            prop_assert!(
                cache.len() <= max_size,
                "Cache size {} exceeds max {}",
                cache.len(),
                max_size
            );
        }
    }

    // For any existing key, delete removes it without counting as an
    // eviction or an access.
    #[test]
    fn prop_delete_removes_entry(key in key_strategy(), value in value_strategy()) {
        let mut cache = test_cache(TEST_MAX_SIZE, EvictionStrategy::Lru);

        cache.set(&key, value, None).unwrap();
        prop_assert!(cache.has(&key).unwrap(), "Key should exist before delete");

        let removed = cache.delete(&key).unwrap();
        prop_assert!(removed, "Delete should report removal");
        prop_assert!(!cache.has(&key).unwrap(), "Key should not exist after delete");

        let stats = cache.stats();
        prop_assert_eq!(stats.evictions, 0, "Delete must not count as eviction");
    }

    // The keys projection always agrees with the entry map, in a stable
    // insertion order.
    #[test]
    fn prop_keys_match_entries(
        ops in prop::collection::vec(cache_op_strategy(), 1..50),
        strategy in eviction_strategy()
    ) {
        let mut cache = test_cache(TEST_MAX_SIZE, strategy);

        for op in ops {
            match op {
                CacheOp::Set { key, value } => { cache.set(&key, value, None).unwrap(); }
                CacheOp::Get { key } => { cache.get(&key).unwrap(); }
                CacheOp::Delete { key } => { cache.delete(&key).unwrap(); }
            }
        }

        let keys = cache.keys();
        prop_assert_eq!(keys.len(), cache.len(), "Keys projection out of sync");
        for key in &keys {
            let unquoted: String = serde_json::from_str(key).unwrap();
            prop_assert!(
                cache.entry_info(&unquoted).unwrap().is_some(),
                "Projected key '{}' has no entry",
                key
            );
        }
    }
}
