#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

//! File system watching for documentation updates
//!
//! This crate delivers host file events to the aggregator:
//! - Recursive cross-platform watching through the notify crate
//! - Retry on watcher initialization failure
//! - Conversion of raw notify events into [`FileChange`] values
//!
//! # Example
//!
//! ```no_run
//! use docsync_watcher::{FileWatcher, WatcherConfig};
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = WatcherConfig::default();
//! let mut watcher = FileWatcher::new(config)?;
//!
//! let mut events = watcher.watch(PathBuf::from("/path/to/project")).await?;
//!
//! while let Some(event) = events.recv().await {
//!     println!("File changed: {:?}", event);
//! }
//! # Ok(())
//! # }
//! ```

// Private implementation modules
mod config;
mod events;
mod watcher;

// Public exports - minimal API surface
pub use config::{RecoveryConfig, WatcherConfig, WatcherConfigBuilder};
pub use events::FileChange;
pub use watcher::FileWatcher;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::WatcherConfig;
    pub use crate::events::FileChange;
    pub use crate::watcher::FileWatcher;
}
