//! Configuration types for the file watcher

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Immutable configuration for the file watcher
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// Maximum number of events in queue (default: 10000)
    pub max_queue_size: usize,
    /// Whether to watch subdirectories (default: true)
    pub recursive: bool,
    /// Poll interval for polling backends in milliseconds (default: 1000ms)
    pub poll_interval_ms: u64,
    /// Recovery behavior when the platform watcher fails to start
    pub recovery: RecoveryConfig,
}

impl WatcherConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create configuration from builder
    pub fn builder() -> WatcherConfigBuilder {
        WatcherConfigBuilder::default()
    }

    /// Build a watcher configuration from the application configuration
    pub fn from_app_config(config: &docsync_core::WatcherConfig) -> Self {
        Self::builder()
            .max_queue_size(config.max_queue_size)
            .poll_interval_ms(config.poll_interval_ms)
            .build()
    }

    /// Get the poll interval duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            max_queue_size: 10_000,
            recursive: true,
            poll_interval_ms: 1000,
            recovery: RecoveryConfig::default(),
        }
    }
}

/// Builder for WatcherConfig
#[derive(Debug, Default)]
pub struct WatcherConfigBuilder {
    config: WatcherConfig,
}

impl WatcherConfigBuilder {
    /// Set maximum queue size
    pub fn max_queue_size(mut self, size: usize) -> Self {
        self.config.max_queue_size = size;
        self
    }

    /// Set whether subdirectories are watched
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.config.recursive = recursive;
        self
    }

    /// Set the poll interval in milliseconds
    pub fn poll_interval_ms(mut self, ms: u64) -> Self {
        self.config.poll_interval_ms = ms;
        self
    }

    /// Set the recovery configuration
    pub fn recovery(mut self, recovery: RecoveryConfig) -> Self {
        self.config.recovery = recovery;
        self
    }

    /// Build the configuration
    pub fn build(self) -> WatcherConfig {
        self.config
    }
}

/// Configuration for watcher initialization retries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// Maximum attempts for watcher initialization
    pub max_init_retries: u32,
    /// Delay between retry attempts in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            max_init_retries: 3,
            retry_delay_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watcher_config_builder() {
        let config = WatcherConfig::builder()
            .max_queue_size(64)
            .recursive(false)
            .poll_interval_ms(250)
            .recovery(RecoveryConfig {
                max_init_retries: 5,
                retry_delay_ms: 10,
            })
            .build();

        assert_eq!(config.max_queue_size, 64);
        assert!(!config.recursive);
        assert_eq!(config.poll_interval(), Duration::from_millis(250));
        assert_eq!(config.recovery.max_init_retries, 5);
    }

    #[test]
    fn test_from_app_config() {
        let app = docsync_core::WatcherConfig {
            max_queue_size: 42,
            poll_interval_ms: 500,
        };
        let config = WatcherConfig::from_app_config(&app);
        assert_eq!(config.max_queue_size, 42);
        assert_eq!(config.poll_interval_ms, 500);
        assert!(config.recursive);
    }
}
