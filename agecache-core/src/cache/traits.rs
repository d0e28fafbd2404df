//! Common surface of the bounded caches

use crate::cache::state::CacheStats;

/// A cache bounded by entry count and/or time since last touch.
///
/// Implementations are safe to share between threads; every method takes
/// `&self` and serialises on an internal lock.
pub trait BoundedCache<K, V> {
    /// Store `value` under `key`, evicting as needed.
    fn set(&self, key: K, value: V);

    /// Return a clone of the value stored under `key`.
    fn get(&self, key: &K) -> Option<V>;

    /// Number of stored values
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn stats(&self) -> CacheStats;
}
