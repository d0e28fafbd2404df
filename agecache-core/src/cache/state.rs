//! State shared by both cache variants
//!
//! A `CacheState` is the value map plus its recency index and limits. It is
//! not synchronised on its own; each cache wraps one in a mutex and holds
//! the lock for the full length of an operation.

use crate::cache::eviction::{EvictionPolicy, EvictionStats};
use crate::cache::recency::RecencyIndex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;
use std::time::Instant;

#[derive(Debug)]
pub(crate) struct CacheState<K, V> {
    values: HashMap<K, V>,
    index: RecencyIndex<K>,
    policy: EvictionPolicy,
    hits: u64,
    misses: u64,
    sets: u64,
    evictions: EvictionStats,
}

impl<K, V> CacheState<K, V>
where
    K: Eq + Hash + Clone,
{
    pub(crate) fn new(policy: EvictionPolicy) -> Self {
        Self {
            values: HashMap::new(),
            index: RecencyIndex::new(),
            policy,
            hits: 0,
            misses: 0,
            sets: 0,
            evictions: EvictionStats::default(),
        }
    }

    pub(crate) fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    /// Store a value, mark it most recent, then enforce the limits.
    pub(crate) fn store(&mut self, key: K, value: V, now: Instant) {
        self.values.insert(key.clone(), value);
        self.index.touch(key, now);
        self.sets += 1;
        self.enforce(now);
    }

    /// Mark `key` as used without storing anything.
    pub(crate) fn touch(&mut self, key: K, now: Instant) {
        self.index.touch(key, now);
    }

    fn enforce(&mut self, now: Instant) {
        let outcome = self.policy.enforce(&mut self.values, &mut self.index, now);
        self.evictions.record(&outcome);
    }

    /// Look up a value, counting the hit or miss
    pub(crate) fn lookup(&mut self, key: &K) -> Option<&V> {
        let value = self.values.get(key);
        if value.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        value
    }

    /// Look up a value without counting it
    pub(crate) fn peek(&self, key: &K) -> Option<&V> {
        self.values.get(key)
    }

    pub(crate) fn contains(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn index(&self) -> &RecencyIndex<K> {
        &self.index
    }

    pub(crate) fn clear(&mut self) {
        self.values.clear();
        self.index.clear();
    }

    pub(crate) fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            sets: self.sets,
            entries: self.values.len(),
            tracked_keys: self.index.len(),
            evictions: self.evictions.clone(),
        }
    }
}

/// Point-in-time cache statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Reads that found a value
    pub hits: u64,
    /// Reads that found nothing
    pub misses: u64,
    /// Writes
    pub sets: u64,
    /// Entries holding a value
    pub entries: usize,
    /// Keys in the recency order, including any without a value
    pub tracked_keys: usize,
    /// Eviction statistics
    pub evictions: EvictionStats,
}

impl CacheStats {
    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
