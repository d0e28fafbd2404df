//! agecache core - bounded, thread-safe key/value caches
//!
//! This crate provides:
//! - An LRU cache (reads and writes refresh entries)
//! - An LRW cache (only writes refresh entries)
//! - Eviction by entry count and by time since last touch
//! - Configuration loading and logging setup

pub mod cache;
pub mod config;
pub mod monitoring;

pub use cache::*;
pub use config::*;
pub use monitoring::*;
