//! Structured logging system with tracing
//!
//! Caches emit `debug` events when built and after eviction passes, and a
//! `trace` event per evicted key. Nothing is printed unless the embedding
//! process installs a subscriber, for example with [`init_logging`].

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (ERROR, WARN, INFO, DEBUG, TRACE)
    pub level: String,

    /// Enable JSON format output
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Parse log level from string
    pub fn parse_level(&self) -> Level {
        match self.level.to_uppercase().as_str() {
            "ERROR" => Level::ERROR,
            "WARN" => Level::WARN,
            "INFO" => Level::INFO,
            "DEBUG" => Level::DEBUG,
            "TRACE" => Level::TRACE,
            _ => Level::INFO,
        }
    }
}

/// Install a global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Fails if a global
/// subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.parse_level().to_string()));

    let subscriber = Registry::default().with(env_filter);

    if config.json_format {
        let json_layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true);

        subscriber.with(json_layer).try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .compact();

        subscriber.with(fmt_layer).try_init()?;
    }

    tracing::info!(
        "Logging initialized: level={}, json={}",
        config.level,
        config.json_format
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        let mut config = LoggingConfig::default();
        assert_eq!(config.parse_level(), Level::INFO);

        config.level = "trace".to_string();
        assert_eq!(config.parse_level(), Level::TRACE);

        config.level = "bogus".to_string();
        assert_eq!(config.parse_level(), Level::INFO);
    }

    #[test]
    fn test_init_logging_only_once() {
        let config = LoggingConfig {
            level: "DEBUG".to_string(),
            json_format: false,
        };

        // Another test may have installed a subscriber already
        let _ = init_logging(&config);
        assert!(init_logging(&config).is_err());
    }

    #[test]
    fn test_config_from_toml() {
        let config: LoggingConfig = toml::from_str("json_format = true").unwrap();
        assert!(config.json_format);
        assert_eq!(config.level, "INFO");
    }
}
