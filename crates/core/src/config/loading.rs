//! Configuration loading from files and environment variables

use crate::error::{Error, Result};
use config::{Config as ConfigLib, ConfigBuilder as LibConfigBuilder, Environment, File};
use std::path::Path;

use super::defaults::*;
use super::{global_config_path, Config};

/// Helper to set a config default with consistent error mapping
fn set_config_default<T: Into<config::Value>>(
    builder: LibConfigBuilder<config::builder::DefaultState>,
    key: &str,
    value: T,
) -> Result<LibConfigBuilder<config::builder::DefaultState>> {
    builder
        .set_default(key, value)
        .map_err(|e| Error::config(format!("Failed to set {key} default: {e}")))
}

impl Config {
    /// Loads configuration from a TOML file with environment variable overrides
    ///
    /// Environment variables are prefixed with `DOCSYNC_` and use double underscores
    /// for nested values. For example:
    /// - `DOCSYNC_SESSION__BASE_URL=http://localhost:4096`
    ///
    /// `DOCSYNC_SERVER_URL` is accepted as a shorthand for the session base URL.
    pub fn from_file(path: &Path) -> Result<Self> {
        let builder = ConfigLib::builder();

        // config doesn't apply serde defaults for missing sections
        let builder = set_config_default(builder, "session.base_url", default_session_base_url())?;
        let builder = set_config_default(
            builder,
            "session.connect_timeout_secs",
            default_connect_timeout_secs() as i64,
        )?;
        let builder = set_config_default(
            builder,
            "watcher.max_queue_size",
            default_max_queue_size() as i64,
        )?;
        let builder = set_config_default(
            builder,
            "watcher.poll_interval_ms",
            default_poll_interval_ms() as i64,
        )?;
        let mut builder = set_config_default(
            builder,
            "notifications.toast_enabled",
            default_toast_enabled(),
        )?;

        // Add the config file if it exists
        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        // Add environment variables with DOCSYNC_ prefix
        builder = builder.add_source(
            Environment::with_prefix("DOCSYNC")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Ok(url) = std::env::var("DOCSYNC_SERVER_URL") {
            builder = builder
                .set_override("session.base_url", url)
                .map_err(|e| Error::config(format!("Failed to set DOCSYNC_SERVER_URL: {e}")))?;
        }

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize config: {e}")))
    }

    /// Creates a config from a TOML string (useful for testing)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from a single file
    ///
    /// Precedence (lowest to highest):
    /// 1. Hardcoded defaults
    /// 2. Config file (~/.docsync/config.toml or custom --config path)
    /// 3. Environment variables (DOCSYNC_*)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => global_config_path()?,
        };
        Self::from_file(&path)
    }
}
