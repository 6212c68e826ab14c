//! Subcommand implementations

mod check;
mod preview;
mod watch;

pub use check::{check_paths, format_report};
pub use preview::preview;
pub use watch::{forward_changes, watch};
