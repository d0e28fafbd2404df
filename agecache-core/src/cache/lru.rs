//! Least Recently Used cache
//!
//! Bounded by number of values and/or maximum time since last use. Both
//! reads and writes count as use. Eviction happens as part of every write.

use crate::cache::eviction::EvictionPolicy;
use crate::cache::state::{CacheState, CacheStats};
use crate::cache::traits::BoundedCache;
use crate::config::{CacheConfig, ConfigError, MissPolicy};
use parking_lot::Mutex;
use std::hash::Hash;
use std::time::{Duration, Instant};
use tracing::debug;

/// Cache where reads and writes both refresh an entry's position.
///
/// By default a read of an absent key is still recorded in the recency
/// order (`MissPolicy::Touch`). That key holds a slot with no value until it
/// ages out or reaches the tail, so it can push a real entry out early.
/// Build with `MissPolicy::Skip` to leave the order untouched on a miss.
#[derive(Debug)]
pub struct LruCache<K, V> {
    state: Mutex<CacheState<K, V>>,
    miss_policy: MissPolicy,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Create a new cache.
    ///
    /// A `max_size` of zero leaves the entry count unbounded and a zero
    /// `max_age` leaves age unbounded. Setting neither is an error.
    pub fn new(max_size: usize, max_age: Duration) -> Result<Self, ConfigError> {
        let policy = EvictionPolicy::new(max_size, max_age)?;
        Ok(Self::with_policy(policy, MissPolicy::Touch))
    }

    /// Create a cache from a configuration
    pub fn with_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        let policy = EvictionPolicy::from_config(config)?;
        Ok(Self::with_policy(policy, config.miss_policy))
    }

    fn with_policy(policy: EvictionPolicy, miss_policy: MissPolicy) -> Self {
        debug!(
            max_size = policy.max_size(),
            max_age = ?policy.max_age(),
            ?miss_policy,
            "Created LRU cache"
        );
        Self {
            state: Mutex::new(CacheState::new(policy)),
            miss_policy,
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

    /// Get cached value for `key`, marking it as used
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.get_at(key, Instant::now())
    }

    /// Like [`get`](Self::get), using `now` as the current time
    pub fn get_at(&self, key: &K, now: Instant) -> Option<V>
    where
        V: Clone,
    {
        let mut state = self.state.lock();

        match self.miss_policy {
            MissPolicy::Touch => state.touch(key.clone(), now),
            MissPolicy::Skip if state.contains(key) => state.touch(key.clone(), now),
            MissPolicy::Skip => {}
        }

        state.lookup(key).cloned()
    }

    /// Get a value without marking it as used
    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.state.lock().peek(key).cloned()
    }

    /// Check for a value without marking it as used
    pub fn contains(&self, key: &K) -> bool {
        self.state.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.state.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Keys in the recency order, including keys read while absent
    pub fn tracked_keys(&self) -> usize {
        self.state.lock().index().len()
    }

    /// Keys from most to least recently used, with their last touch time
    pub fn recency_order(&self) -> Vec<(K, Instant)> {
        self.state.lock().index().entries_by_recency()
    }

    pub fn max_size(&self) -> usize {
        self.state.lock().policy().max_size()
    }

    pub fn max_age(&self) -> Duration {
        self.state.lock().policy().max_age()
    }

    pub fn miss_policy(&self) -> MissPolicy {
        self.miss_policy
    }

    /// Drop every entry. Statistics are kept.
    pub fn clear(&self) {
        self.state.lock().clear();
    }

    pub fn stats(&self) -> CacheStats {
        self.state.lock().stats()
    }
}

impl<K, V> BoundedCache<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn set(&self, key: K, value: V) {
        LruCache::set(self, key, value)
    }

    fn get(&self, key: &K) -> Option<V> {
        LruCache::get(self, key)
    }

    fn len(&self) -> usize {
        LruCache::len(self)
    }

    fn stats(&self) -> CacheStats {
        LruCache::stats(self)
    }
}
