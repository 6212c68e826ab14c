//! Tests for configuration module

use super::*;
use crate::error::{Error, Result};
use std::io::Write;
use tempfile::NamedTempFile;

fn create_temp_config_file(content: &str) -> Result<NamedTempFile> {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .map_err(|e| Error::config(format!("Failed to create temp file: {e}")))?;
    file.write_all(content.as_bytes())
        .map_err(|e| Error::config(format!("Failed to write temp file: {e}")))?;
    file.flush()
        .map_err(|e| Error::config(format!("Failed to flush temp file: {e}")))?;
    Ok(file)
}

fn with_env_var<F, T>(key: &str, value: &str, f: F) -> T
where
    F: FnOnce() -> T,
{
    std::env::set_var(key, value);
    let result = f();
    std::env::remove_var(key);
    result
}

#[test]
fn test_from_toml_str_valid() {
    let toml = r#"
        [session]
        base_url = "http://localhost:5000"
        directory = "/work/project"

        [watcher]
        max_queue_size = 256
    "#;

    let config = Config::from_toml_str(toml).expect("Failed to parse valid TOML");
    assert_eq!(config.session.base_url, "http://localhost:5000");
    assert_eq!(config.session.directory.as_deref(), Some("/work/project"));
    assert_eq!(config.watcher.max_queue_size, 256);
}

#[test]
fn test_from_toml_str_empty_uses_defaults() {
    let config = Config::from_toml_str("").expect("Failed to parse empty TOML");
    assert_eq!(config.session.base_url, "http://127.0.0.1:4096");
    assert_eq!(config.session.connect_timeout_secs, 10);
    assert_eq!(config.watcher.max_queue_size, 10_000);
    assert!(config.notifications.toast_enabled);
    assert!(config.session.directory.is_none());
}

#[test]
fn test_from_toml_str_invalid_syntax() {
    let toml = r#"
        [session
        base_url = "http://localhost"
    "#;

    let result = Config::from_toml_str(toml);
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Failed to parse TOML"));
}

#[test]
fn test_validate_default_config() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_validate_rejects_non_http_url() {
    let mut config = Config::default();
    config.session.base_url = "ftp://example.com".to_string();
    let result = config.validate();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("Invalid session.base_url"));
}

#[test]
fn test_validate_rejects_empty_url() {
    let mut config = Config::default();
    config.session.base_url = "  ".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_zero_sizes() {
    let mut config = Config::default();
    config.watcher.max_queue_size = 0;
    assert!(config
        .validate()
        .unwrap_err()
        .to_string()
        .contains("max_queue_size"));

    let mut config = Config::default();
    config.session.connect_timeout_secs = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.watcher.poll_interval_ms = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_from_file_reads_values() {
    let file = create_temp_config_file(
        r#"
        [session]
        directory = "/srv/repo"

        [watcher]
        poll_interval_ms = 250
        "#,
    )
    .expect("test setup failed");

    let config = Config::from_file(file.path()).expect("Failed to load config");
    assert_eq!(config.session.directory.as_deref(), Some("/srv/repo"));
    assert_eq!(config.watcher.poll_interval_ms, 250);
    assert_eq!(config.watcher.max_queue_size, 10_000);
}

#[test]
fn test_from_file_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().expect("test setup failed");
    let config =
        Config::from_file(&dir.path().join("absent.toml")).expect("Failed to load config");
    assert_eq!(config.watcher.poll_interval_ms, 1000);
}

#[test]
fn test_env_override() {
    let file = create_temp_config_file("[notifications]\ntoast_enabled = true\n")
        .expect("test setup failed");

    let config = with_env_var("DOCSYNC_NOTIFICATIONS__TOAST_ENABLED", "false", || {
        Config::from_file(file.path())
    })
    .expect("Failed to load config");

    assert!(!config.notifications.toast_enabled);
}
