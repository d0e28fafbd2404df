//! Cache configuration
//!
//! A `CacheConfig` describes the two eviction limits and how reads of
//! missing keys are treated. Configurations can be built in code or loaded
//! from a TOML file; missing fields fall back to the defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Configuration errors, raised only when a cache is being built
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Incorrectly specified cache: neither a size limit nor an age limit is set")]
    Unbounded,
}

/// What a read of an absent key does to the recency order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissPolicy {
    /// Record the key in the recency order even though no value exists.
    /// The key then occupies a slot until it is evicted.
    #[default]
    Touch,
    /// Leave the recency order alone on a miss
    Skip,
}

/// Cache limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries (0 = unbounded)
    pub max_entries: usize,
    /// Maximum time since last touch in milliseconds (0 = unbounded)
    pub max_age_ms: u64,
    /// Read-miss behaviour for caches that count reads as usage
    pub miss_policy: MissPolicy,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1024,
            max_age_ms: 0,
            miss_policy: MissPolicy::Touch,
        }
    }
}

impl CacheConfig {
    /// Build a configuration from explicit limits.
    ///
    /// `max_age` is rounded up to whole milliseconds, so a nonzero age never
    /// turns into "no age limit".
    pub fn new(max_entries: usize, max_age: Duration) -> Self {
        Self {
            max_entries,
            max_age_ms: u64::try_from(max_age.as_nanos().div_ceil(1_000_000)).unwrap_or(u64::MAX),
            miss_policy: MissPolicy::Touch,
        }
    }

    /// Set the read-miss behaviour
    pub fn with_miss_policy(mut self, miss_policy: MissPolicy) -> Self {
        self.miss_policy = miss_policy;
        self
    }

    pub fn max_age(&self) -> Duration {
        Duration::from_millis(self.max_age_ms)
    }

    /// Reject a configuration with no limit at all
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_entries == 0 && self.max_age_ms == 0 {
            return Err(ConfigError::Unbounded);
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CacheConfig =
            toml::from_str(content).context("Failed to parse cache configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        debug!(
            path = %path.display(),
            max_entries = config.max_entries,
            max_age_ms = config.max_age_ms,
            "Loaded cache configuration"
        );

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}
