//! Least Recently Written cache
//!
//! Bounded by number of values and/or maximum time since last write. Only
//! writes count as use; reads never change which entry is evicted next.

use crate::cache::eviction::EvictionPolicy;
use crate::cache::state::{CacheState, CacheStats};
use crate::cache::traits::BoundedCache;
use crate::config::{CacheConfig, ConfigError};
use parking_lot::Mutex;
use std::hash::Hash;
use std::time::{Duration, Instant};
use tracing::debug;

/// Cache where only writes refresh an entry's position
#[derive(Debug)]
pub struct LrwCache<K, V> {
    state: Mutex<CacheState<K, V>>,
}

impl<K, V> LrwCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Create a new cache.
    ///
    /// A `max_size` of zero leaves the entry count unbounded and a zero
    /// `max_age` leaves age unbounded. Setting neither is an error.
    pub fn new(max_size: usize, max_age: Duration) -> Result<Self, ConfigError> {
        EvictionPolicy::new(max_size, max_age).map(Self::with_policy)
    }

    /// Create a cache from a configuration. The miss policy does not apply.
    pub fn with_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        EvictionPolicy::from_config(config).map(Self::with_policy)
    }

    fn with_policy(policy: EvictionPolicy) -> Self {
        debug!(
            max_size = policy.max_size(),
            max_age = ?policy.max_age(),
            "Created LRW cache"
        );
        Self {
            state: Mutex::new(CacheState::new(policy)),
        }
    }

    /// Set cached value for `key`
    pub fn set(&self, key: K, value: V) {
        self.set_at(key, value, Instant::now());
    }

    /// Like [`set`](Self::set), using `now` as the current time
    pub fn set_at(&self, key: K, value: V, now: Instant) {
        self.state.lock().store(key, value, now);
    }

    /// Get cached value for `key`. Recency is unaffected.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.state.lock().lookup(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.state.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.state.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys in the recency order. Always equal to `len()` for this cache.
    pub fn tracked_keys(&self) -> usize {
        self.state.lock().index().len()
    }

    /// Keys from most to least recently written, with their write time
    pub fn recency_order(&self) -> Vec<(K, Instant)> {
        self.state.lock().index().entries_by_recency()
    }

    pub fn max_size(&self) -> usize {
        self.state.lock().policy().max_size()
    }

    pub fn max_age(&self) -> Duration {
        self.state.lock().policy().max_age()
    }

    /// Drop every entry. Statistics are kept.
    pub fn clear(&self) {
        self.state.lock().clear();
    }

    pub fn stats(&self) -> CacheStats {
        self.state.lock().stats()
    }
}

impl<K, V> BoundedCache<K, V> for LrwCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn set(&self, key: K, value: V) {
        LrwCache::set(self, key, value)
    }

    fn get(&self, key: &K) -> Option<V> {
        LrwCache::get(self, key)
    }

    fn len(&self) -> usize {
        LrwCache::len(self)
    }

    fn stats(&self) -> CacheStats {
        LrwCache::stats(self)
    }
}
