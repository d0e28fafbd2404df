//! Integration tests for the bounded caches
//!
//! Covers wall-clock ageing, sharing a cache between threads, and building
//! caches from configuration files.

use agecache_core::{BoundedCache, CacheConfig, ConfigError, LruCache, LrwCache, MissPolicy};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

// =========================================================================
// Test Helpers
// =========================================================================

/// Two writes, a pause past the age limit, then a third write.
fn age_out_scenario<C: BoundedCache<i32, String>>(cache: &C) {
    cache.set(10, "ten".to_string());
    assert_eq!(cache.len(), 1);
    cache.set(20, "twenty".to_string());
    assert_eq!(cache.len(), 2);

    thread::sleep(Duration::from_millis(1100));

    cache.set(30, "thirty".to_string());
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&30), Some("thirty".to_string()));
    assert_eq!(cache.get(&10), None);
    assert_eq!(cache.get(&20), None);
}

fn hammer<C>(cache: Arc<C>, threads: u64, per_thread: u64)
where
    C: BoundedCache<u64, u64> + Send + Sync + 'static,
{
    let handles: Vec<_> = (0..threads)
        .map(|thread_id| {
            let cache = cache.clone();
            thread::spawn(move || {
                for i in 0..per_thread {
                    let key = thread_id * per_thread + i;
                    cache.set(key, key * 2);
                    if let Some(value) = cache.get(&key) {
                        assert_eq!(value, key * 2);
                    }
                    let _ = cache.get(&(key / 2));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

// =========================================================================
// Ageing with the real clock
// =========================================================================

#[test]
fn test_lru_entries_age_out() {
    let cache = LruCache::new(5, Duration::from_secs(1)).unwrap();
    age_out_scenario(&cache);
    assert_eq!(cache.stats().evictions.evictions_by_age, 2);
}

#[test]
fn test_lrw_entries_age_out() {
    let cache = LrwCache::new(5, Duration::from_secs(1)).unwrap();
    age_out_scenario(&cache);
    assert_eq!(cache.stats().evictions.evictions_by_age, 2);
}

#[test]
fn test_lru_empty_get_returns_none() {
    let cache: LruCache<i32, String> = LruCache::new(5, Duration::from_secs(1)).unwrap();

    assert_eq!(cache.get(&99), None);
    assert!(cache.is_empty());
    assert_eq!(cache.tracked_keys(), 1);
}

// =========================================================================
// Concurrency
// =========================================================================

#[test]
fn test_lru_concurrent_access_respects_size() {
    let cache = Arc::new(LruCache::new(64, Duration::ZERO).unwrap());
    hammer(cache.clone(), 8, 500);

    assert!(cache.len() <= 64);
    let stats = cache.stats();
    assert_eq!(stats.sets, 8 * 500);
    assert_eq!(stats.hits + stats.misses, 2 * 8 * 500);
    assert_eq!(cache.recency_order().len(), cache.tracked_keys());
}

#[test]
fn test_lrw_concurrent_access_respects_size() {
    let cache = Arc::new(LrwCache::new(64, Duration::ZERO).unwrap());
    hammer(cache.clone(), 8, 500);

    assert_eq!(cache.len(), 64);
    assert_eq!(cache.tracked_keys(), 64);
    assert_eq!(cache.stats().evictions.total_evictions, 8 * 500 - 64);
}

#[test]
fn test_caches_are_independent() {
    let first = LrwCache::new(1, Duration::ZERO).unwrap();
    let second = LrwCache::new(1, Duration::ZERO).unwrap();

    first.set("a", 1);
    second.set("b", 2);

    assert_eq!(first.get(&"a"), Some(1));
    assert_eq!(first.get(&"b"), None);
    assert_eq!(second.get(&"b"), Some(2));
}

// =========================================================================
// Configuration
// =========================================================================

#[test]
fn test_caches_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cache.toml");
    std::fs::write(&path, "max_entries = 2\nmiss_policy = \"skip\"\n").unwrap();

    let config = CacheConfig::load(&path).unwrap();
    let lru: LruCache<i32, i32> = LruCache::with_config(&config).unwrap();
    let lrw: LrwCache<i32, i32> = LrwCache::with_config(&config).unwrap();

    assert_eq!(lru.miss_policy(), MissPolicy::Skip);
    assert_eq!(lru.max_size(), 2);
    assert_eq!(lrw.max_age(), Duration::ZERO);

    assert_eq!(lru.get(&7), None);
    assert_eq!(lru.tracked_keys(), 0);
}

#[test]
fn test_unbounded_config_file_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("cache.toml");
    std::fs::write(&path, "max_entries = 0\nmax_age_ms = 0\n").unwrap();

    let err = CacheConfig::load(&path).unwrap_err();
    assert_eq!(err.root_cause().to_string(), ConfigError::Unbounded.to_string());
}
