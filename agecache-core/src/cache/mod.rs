//! Bounded in-memory caches
//!
//! Two variants share one eviction engine:
//! - [`LruCache`] counts reads and writes as use
//! - [`LrwCache`] counts only writes as use

pub mod eviction;
pub mod lru;
pub mod lrw;
pub mod recency;
mod state;
pub mod traits;

pub use eviction::*;
pub use lru::*;
pub use lrw::*;
pub use recency::*;
pub use state::CacheStats;
pub use traits::*;
