//! Configuration module for docsync
//!
//! This module provides configuration structures and loading mechanisms.
//! Configuration can be loaded from TOML files and/or environment variables.
//! The debounce window and the designated documentation paths are fixed and
//! cannot be configured.

mod defaults;
mod loading;

#[cfg(test)]
mod tests;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use defaults::*;

/// Returns the path to the global configuration file
///
/// The global config is stored at `~/.docsync/config.toml`.
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".docsync").join("config.toml"))
}

/// Main configuration structure for docsync
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Session server configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// File watcher configuration
    #[serde(default)]
    pub watcher: WatcherConfig,

    /// Toast notification configuration
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

/// Connection settings for the session server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Base URL of the session server (default: http://127.0.0.1:4096)
    #[serde(default = "default_session_base_url")]
    pub base_url: String,

    /// Project directory the server should scope requests to
    #[serde(default)]
    pub directory: Option<String>,

    /// TCP connect timeout in seconds. Requests themselves have no timeout.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

/// Configuration for file watching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// Capacity of the event channel between the watcher and the aggregator
    #[serde(default = "default_max_queue_size")]
    pub max_queue_size: usize,

    /// Poll interval in milliseconds for polling backends
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

/// Configuration for toast notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Show a toast when a documentation update starts
    #[serde(default = "default_toast_enabled")]
    pub toast_enabled: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: default_session_base_url(),
            directory: None,
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            max_queue_size: default_max_queue_size(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            toast_enabled: default_toast_enabled(),
        }
    }
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        let base_url = self.session.base_url.trim();
        if base_url.is_empty() {
            return Err(Error::config("session.base_url must not be empty"));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(Error::config(format!(
                "Invalid session.base_url '{base_url}'. Must start with http:// or https://"
            )));
        }

        if self.session.connect_timeout_secs == 0 {
            return Err(Error::config(
                "session.connect_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.watcher.max_queue_size == 0 {
            return Err(Error::config(
                "watcher.max_queue_size must be greater than 0".to_string(),
            ));
        }

        if self.watcher.poll_interval_ms == 0 {
            return Err(Error::config(
                "watcher.poll_interval_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
