//! Cache eviction policies
//!
//! Both cache variants bound their contents the same way: entries older
//! than the age limit go first, then the oldest entries go until the count
//! limit holds. Both passes drain from the tail of the recency index.

use crate::cache::recency::RecencyIndex;
use crate::config::{CacheConfig, ConfigError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Count and age limits for a cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvictionPolicy {
    max_size: usize,
    max_age: Duration,
}

impl EvictionPolicy {
    /// Create a policy. `max_size == 0` means no count limit and a zero
    /// `max_age` means no age limit; at least one must be set.
    pub fn new(max_size: usize, max_age: Duration) -> Result<Self, ConfigError> {
        if max_size == 0 && max_age.is_zero() {
            return Err(ConfigError::Unbounded);
        }
        Ok(Self { max_size, max_age })
    }

    pub fn from_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        Self::new(config.max_entries, config.max_age())
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn max_age(&self) -> Duration {
        self.max_age
    }

    pub fn is_size_bounded(&self) -> bool {
        self.max_size > 0
    }

    pub fn is_age_bounded(&self) -> bool {
        !self.max_age.is_zero()
    }

    /// Evict from the tail of `index` until both limits hold at `now`.
    ///
    /// Evicted keys are removed from `values` as well. A key tracked by the
    /// index without a value still counts as an eviction and is reported as
    /// a phantom.
    pub fn enforce<K, V>(
        &self,
        values: &mut HashMap<K, V>,
        index: &mut RecencyIndex<K>,
        now: Instant,
    ) -> EnforceOutcome
    where
        K: Eq + Hash + Clone,
    {
        let mut outcome = EnforceOutcome::default();

        if self.is_age_bounded() {
            while !index.is_empty() && index.age_since(now) >= self.max_age {
                let Some(key) = index.evict_oldest() else {
                    break;
                };
                trace!("Evicting aged-out key");
                outcome.by_age += 1;
                if values.remove(&key).is_none() {
                    outcome.phantoms += 1;
                }
            }
        }

        if self.is_size_bounded() {
            while values.len() > self.max_size {
                let Some(key) = index.evict_oldest() else {
                    break;
                };
                trace!("Evicting key over size limit");
                outcome.by_size += 1;
                if values.remove(&key).is_none() {
                    outcome.phantoms += 1;
                }
            }
        }

        if outcome.total() > 0 {
            debug!(
                by_age = outcome.by_age,
                by_size = outcome.by_size,
                phantoms = outcome.phantoms,
                remaining = values.len(),
                "Eviction pass finished"
            );
        }

        outcome
    }
}

/// Result of one enforcement pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnforceOutcome {
    /// Keys evicted for exceeding the age limit
    pub by_age: usize,
    /// Keys evicted to get under the count limit
    pub by_size: usize,
    /// Evicted keys that had no value
    pub phantoms: usize,
}

impl EnforceOutcome {
    pub fn total(&self) -> usize {
        self.by_age + self.by_size
    }
}

/// Eviction statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvictionStats {
    /// Total number of evictions
    pub total_evictions: u64,
    /// Evictions by age limit
    pub evictions_by_age: u64,
    /// Evictions by size limit
    pub evictions_by_size: u64,
    /// Evictions of keys that were tracked without a value
    pub phantom_evictions: u64,
}

impl EvictionStats {
    /// Record an enforcement pass
    pub fn record(&mut self, outcome: &EnforceOutcome) {
        self.total_evictions += outcome.total() as u64;
        self.evictions_by_age += outcome.by_age as u64;
        self.evictions_by_size += outcome.by_size as u64;
        self.phantom_evictions += outcome.phantoms as u64;
    }
}
