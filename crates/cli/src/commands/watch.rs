//! `docsync watch`: the long-running trigger

use anyhow::{Context, Result};
use docsync_aggregator::{AggregatorConfig, ChangeAggregator};
use docsync_core::{Config, DocLayout};
use docsync_session::create_session_client;
use docsync_watcher::{FileChange, FileWatcher, WatcherConfig};
use std::future::Future;
use std::path::Path;
use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};

/// Watch `root` and feed documentation changes to the aggregator until Ctrl+C
pub async fn watch(root: &Path, config: &Config) -> Result<()> {
    let api = create_session_client(&config.session)?;
    let aggregator = ChangeAggregator::new(
        DocLayout::new(root),
        api,
        AggregatorConfig {
            toast_enabled: config.notifications.toast_enabled,
            ..AggregatorConfig::default()
        },
    );

    let mut watcher = FileWatcher::new(WatcherConfig::from_app_config(&config.watcher))?;
    let changes = watcher
        .watch(root)
        .await
        .with_context(|| format!("Failed to watch {}", root.display()))?;

    info!(
        "Watching {} (session server {})",
        root.display(),
        config.session.base_url
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };
    let accepted = forward_changes(&aggregator, changes, shutdown).await;
    info!("Shutting down after {accepted} accepted changes");

    watcher.stop().await?;

    let pending = aggregator.pending_count().await;
    if pending > 0 {
        warn!("Discarding {pending} pending documentation changes");
    }
    Ok(())
}

/// Hand every change to the aggregator until `shutdown` resolves or the
/// channel closes. Returns the number of accepted changes.
pub async fn forward_changes(
    aggregator: &ChangeAggregator,
    mut changes: mpsc::Receiver<FileChange>,
    shutdown: impl Future<Output = ()>,
) -> usize {
    tokio::pin!(shutdown);
    let mut accepted = 0;

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                debug!("Shutdown requested");
                break;
            }
            change = changes.recv() => {
                let Some(change) = change else {
                    debug!("Change channel closed");
                    break;
                };
                let verdict = aggregator.handle_event(&change).await;
                if verdict.is_accepted() {
                    accepted += 1;
                } else {
                    trace!("{} {}: {verdict}", change.kind(), change.path().display());
                }
            }
        }
    }

    accepted
}
