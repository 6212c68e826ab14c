//! docsync CLI - batches documentation changes into summary updates
//!
//! This binary provides the command-line interface for docsync.

#![deny(warnings)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use docsync::commands::{check_paths, format_report, preview, watch};
use docsync::{absolutize, resolve_root};
use docsync_core::config::Config;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser)]
#[command(name = "docsync")]
#[command(about = "Batch documentation changes into a single summary update")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch a project and send documentation updates to the session server
    Watch {
        /// Project root (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },
    /// Show whether paths count as documentation changes
    Check {
        /// Paths to classify, relative to the project root
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Project root (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },
    /// Print the session title and prompt a flush of these paths would send
    Preview {
        /// Changed paths
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Watch { root } => {
            let root = resolve_root(root.as_deref())?;
            let config = load_config(cli.config.as_deref())?;
            watch(&root, &config).await
        }
        Commands::Check { paths, root } => {
            let root = resolve_root(root.as_deref())?;
            println!("{}", format_report(&check_paths(&root, &paths)));
            Ok(())
        }
        Commands::Preview { paths } => {
            let cwd = env::current_dir()?;
            let paths = paths.iter().map(|p| absolutize(&cwd, p)).collect();
            let payload = preview(paths, Utc::now().date_naive());
            println!("Session: {}\n", payload.session_title);
            println!("{}", payload.prompt());
            Ok(())
        }
    }
}

/// Initialize logging system
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "docsync={level},docsync_core={level},docsync_watcher={level},\
             docsync_session={level},docsync_aggregator={level}"
        ))
        .init();

    Ok(())
}

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load(config_path)?;
    config.validate()?;
    debug!("Session server: {}", config.session.base_url);
    Ok(config)
}
