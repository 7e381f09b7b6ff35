//! Eviction Strategy Module
//!
//! Implements the bookkeeping behind the three eviction policies:
//! least-recently-used, first-in-first-out and least-frequently-used.

use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

// == Eviction Strategy ==
/// Eviction policy, fixed for the lifetime of a cache instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionStrategy {
    /// Evict the least recently accessed entry
    #[default]
    Lru,
    /// Evict the oldest inserted entry, regardless of access
    Fifo,
    /// Evict the entry with the lowest access count
    Lfu,
}

impl EvictionStrategy {
    /// Parses a strategy name, defaulting to LRU for unknown input.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "fifo" => Self::Fifo,
            "lfu" => Self::Lfu,
            _ => Self::Lru,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lru => "lru",
            Self::Fifo => "fifo",
            Self::Lfu => "lfu",
        }
    }
}

// == Eviction State ==
/// Access bookkeeping for victim selection.
///
/// Three structures are maintained:
/// - `recency`: access order, back = most recently used (LRU)
/// - `insertion`: insert order, front = oldest (FIFO, and the scan order
///   that makes LFU tie-breaking deterministic)
/// - `frequency`: access counts, starting at 1 on insert (LFU)
#[derive(Debug, Default)]
pub struct EvictionState {
    strategy: EvictionStrategy,
    recency: VecDeque<String>,
    insertion: VecDeque<String>,
    frequency: HashMap<String, u64>,
}

impl EvictionState {
    // == Constructor ==
    /// Creates empty bookkeeping for the given strategy.
    pub fn new(strategy: EvictionStrategy) -> Self {
        Self {
            strategy,
            recency: VecDeque::new(),
            insertion: VecDeque::new(),
            frequency: HashMap::new(),
        }
    }

    /// The policy this state selects victims for.
    pub fn strategy(&self) -> EvictionStrategy {
        self.strategy
    }

    // == Record Insert ==
    /// Registers a freshly inserted key.
    ///
    /// The caller removes any previous occurrence first, so insertion
    /// position and frequency always restart from scratch here.
    pub fn record_insert(&mut self, key: &str) {
        self.touch_recency(key);
        self.insertion.push_back(key.to_string());
        self.frequency.insert(key.to_string(), 1);
    }

    // == Record Access ==
    /// Registers a read hit: refreshes recency and bumps the access count.
    ///
    /// Insertion order is deliberately left alone; FIFO never reacts to
    /// reads.
    pub fn record_access(&mut self, key: &str) {
        self.touch_recency(key);
        if let Some(count) = self.frequency.get_mut(key) {
            *count += 1;
        }
    }

    fn touch_recency(&mut self, key: &str) {
        self.recency.retain(|k| k != key);
        self.recency.push_back(key.to_string());
    }

    // == Forget ==
    /// Drops all bookkeeping for a key (delete, expiry, eviction).
    pub fn forget(&mut self, key: &str) {
        self.recency.retain(|k| k != key);
        self.insertion.retain(|k| k != key);
        self.frequency.remove(key);
    }

    // == Victim Selection ==
    /// Picks the entry the active policy would evict next.
    ///
    /// LFU ties are broken by insertion order: scanning front-to-back and
    /// keeping the first minimum means the oldest inserted key among
    /// equals loses.
    pub fn victim(&self) -> Option<String> {
        match self.strategy {
            EvictionStrategy::Lru => self.recency.front().cloned(),
            EvictionStrategy::Fifo => self.insertion.front().cloned(),
            EvictionStrategy::Lfu => {
                let mut victim: Option<(&String, u64)> = None;
                for key in &self.insertion {
                    let count = self.frequency.get(key).copied().unwrap_or(0);
                    if victim.map_or(true, |(_, best)| count < best) {
                        victim = Some((key, count));
                    }
                }
                victim.map(|(key, _)| key.clone())
            }
        }
    }

    // == Clear ==
    /// Empties all bookkeeping.
    pub fn clear(&mut self) {
        self.recency.clear();
        self.insertion.clear();
        self.frequency.clear();
    }

    // == Insertion Order ==
    /// Keys in insertion order, oldest first.
    pub fn insertion_order(&self) -> impl Iterator<Item = &String> {
        self.insertion.iter()
    }

    /// Access count for a key, if tracked.
    #[allow(dead_code)]
    pub fn frequency_of(&self, key: &str) -> Option<u64> {
        self.frequency.get(key).copied()
    }
}
