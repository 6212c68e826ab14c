//! Core types for the docsync documentation batching trigger
//!
//! This crate provides the foundational pieces shared by every other docsync
//! crate:
//!
//! - **Configuration**: layered loading from TOML files and environment variables
//! - **Layout**: the designated documentation paths of a project
//! - **Error handling**: unified error types
//!

pub mod config;
pub mod error;
pub mod layout;

// Re-export main types for convenience
pub use config::{Config, NotificationsConfig, SessionConfig, WatcherConfig};
pub use error::{Error, Result, ResultExt};
pub use layout::DocLayout;

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Result, ResultExt};
    pub use crate::layout::DocLayout;
}
