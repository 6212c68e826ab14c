//! Library interface for the docsync CLI
//!
//! The command implementations live here so integration tests can drive them
//! without spawning the binary.

pub mod commands;

pub use anyhow::Result;

use anyhow::Context;
use std::env;
use std::path::{Path, PathBuf};

/// Resolve the project root to watch
///
/// Defaults to the current directory. An existing root is canonicalized so
/// event paths reported by the watcher compare equal to the layout paths.
pub fn resolve_root(root: Option<&Path>) -> Result<PathBuf> {
    let root = match root {
        Some(root) => root.to_path_buf(),
        None => env::current_dir().context("Failed to get current directory")?,
    };

    root.canonicalize()
        .with_context(|| format!("Project root {} is not accessible", root.display()))
}

/// Make `path` absolute relative to `root`
pub fn absolutize(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
