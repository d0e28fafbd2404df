//! Example demonstrating the bounded caches
//!
//! This example shows how to:
//! - Initialize logging
//! - Build caches from code and from a TOML configuration
//! - Watch reads refresh an LRU cache but not an LRW cache

use agecache_core::{init_logging, CacheConfig, LoggingConfig, LruCache, LrwCache};
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    init_logging(&LoggingConfig {
        level: "DEBUG".to_string(),
        json_format: false,
    })?;

    let config = CacheConfig::from_toml_str("max_entries = 3\nmax_age_ms = 500\n")?;

    let lru = LruCache::with_config(&config)?;
    let lrw = LrwCache::with_config(&config)?;

    for (key, value) in [("a", 1), ("b", 2), ("c", 3)] {
        lru.set(key, value);
        lrw.set(key, value);
    }

    // Only the LRU cache moves "a" away from the eviction end
    let _ = lru.get(&"a");
    let _ = lrw.get(&"a");

    lru.set("d", 4);
    lrw.set("d", 4);

    println!("LRU keeps a: {}", lru.contains(&"a"));
    println!("LRW keeps a: {}", lrw.contains(&"a"));

    std::thread::sleep(Duration::from_millis(600));
    lru.set("e", 5);
    println!("LRU entries after ageing: {}", lru.len());
    println!("LRU stats: {:?}", lru.stats());

    // Neither limit set
    match LruCache::<&str, i32>::new(0, Duration::ZERO) {
        Ok(_) => println!("unexpected: unbounded cache accepted"),
        Err(e) => println!("rejected: {e}"),
    }

    Ok(())
}
