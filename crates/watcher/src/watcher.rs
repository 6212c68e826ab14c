//! Core file system watcher implementation
//!
//! This module provides the main file watcher using the notify crate
//! with cross-platform support and initialization retries.

use crate::{
    config::{RecoveryConfig, WatcherConfig},
    events::FileChange,
};
use docsync_core::error::{Error, Result};
use notify::{
    event::{ModifyKind, RenameMode},
    Config as NotifyConfig, Event as NotifyEvent, EventKind, RecommendedWatcher, RecursiveMode,
    Watcher as NotifyWatcher,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

/// Main file system watcher
pub struct FileWatcher {
    /// Configuration
    config: Arc<WatcherConfig>,
    /// Active notify watcher
    watcher: Option<Arc<RwLock<RecommendedWatcher>>>,
    /// Paths being watched
    watched_paths: Arc<RwLock<Vec<PathBuf>>>,
    /// Cancellation token for stopping background tasks
    cancellation_token: CancellationToken,
}

impl FileWatcher {
    /// Create a new file watcher
    pub fn new(config: WatcherConfig) -> Result<Self> {
        if config.max_queue_size == 0 {
            return Err(Error::watcher("max_queue_size must be greater than 0"));
        }

        Ok(Self {
            config: Arc::new(config),
            watcher: None,
            watched_paths: Arc::new(RwLock::new(Vec::new())),
            cancellation_token: CancellationToken::new(),
        })
    }

    /// Start watching a path
    ///
    /// The returned receiver yields one [`FileChange`] per affected file. It
    /// closes once [`FileWatcher::stop`] is called.
    pub async fn watch(&mut self, path: impl AsRef<Path>) -> Result<mpsc::Receiver<FileChange>> {
        let path = path.as_ref().to_path_buf();

        let (notify_tx, notify_rx) = mpsc::channel(self.config.max_queue_size);
        let (change_tx, change_rx) = mpsc::channel(self.config.max_queue_size);

        self.start_event_processor(notify_rx, change_tx);

        let mut watcher = self.init_watcher_with_retry(notify_tx).await?;
        self.add_watch_path(&mut watcher, &path)?;

        self.watcher = Some(Arc::new(RwLock::new(watcher)));
        self.watched_paths.write().await.push(path);

        Ok(change_rx)
    }

    /// Initialize notify watcher with retry logic
    async fn init_watcher_with_retry(
        &self,
        tx: mpsc::Sender<NotifyEvent>,
    ) -> Result<RecommendedWatcher> {
        let RecoveryConfig {
            max_init_retries,
            retry_delay_ms,
        } = self.config.recovery;
        let mut attempts = 0;

        loop {
            attempts += 1;

            match self.create_notify_watcher(tx.clone()) {
                Ok(watcher) => {
                    info!("File watcher initialized successfully");
                    return Ok(watcher);
                }
                Err(e) if attempts < max_init_retries => {
                    warn!(
                        "Failed to initialize watcher (attempt {}/{}): {}",
                        attempts, max_init_retries, e
                    );
                    tokio::time::sleep(Duration::from_millis(retry_delay_ms)).await;
                }
                Err(e) => {
                    error!("Failed to initialize watcher after {} attempts", attempts);
                    return Err(Error::watcher(format!(
                        "Watcher initialization failed: {e}"
                    )));
                }
            }
        }
    }

    /// Create a notify watcher
    fn create_notify_watcher(&self, tx: mpsc::Sender<NotifyEvent>) -> Result<RecommendedWatcher> {
        let config = NotifyConfig::default()
            .with_poll_interval(self.config.poll_interval())
            .with_compare_contents(false);

        let watcher = RecommendedWatcher::new(
            move |res: std::result::Result<NotifyEvent, notify::Error>| match res {
                Ok(event) => {
                    if let Err(e) = tx.try_send(event) {
                        error!("Failed to send notify event: {}", e);
                    }
                }
                Err(e) => {
                    error!("Notify error: {}", e);
                }
            },
            config,
        )
        .map_err(|e| Error::watcher(format!("Failed to create watcher: {e}")))?;

        Ok(watcher)
    }

    /// Add a path to watch
    fn add_watch_path(&self, watcher: &mut RecommendedWatcher, path: &Path) -> Result<()> {
        let recursive = if self.config.recursive {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };

        watcher
            .watch(path, recursive)
            .map_err(|e| Error::watcher(format!("Failed to watch path {path:?}: {e}")))?;

        info!(
            "Watching path: {:?} (recursive: {})",
            path,
            matches!(recursive, RecursiveMode::Recursive)
        );
        Ok(())
    }

    /// Start the event processor
    fn start_event_processor(
        &self,
        mut notify_rx: mpsc::Receiver<NotifyEvent>,
        change_tx: mpsc::Sender<FileChange>,
    ) {
        let cancel_token = self.cancellation_token.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel_token.cancelled() => break,
                    event = notify_rx.recv() => {
                        let Some(event) = event else { break };
                        trace!("Received notify event: {:?}", event);

                        for change in Self::convert_notify_event(event).await {
                            if change_tx.send(change).await.is_err() {
                                debug!("Change receiver dropped");
                                return;
                            }
                        }
                    }
                }
            }
            debug!("Event processor stopped");
        });
    }

    /// Convert a notify event into file changes
    ///
    /// Access and metadata-only events are dropped, as are events for
    /// directories that still exist.
    async fn convert_notify_event(event: NotifyEvent) -> Vec<FileChange> {
        match event.kind {
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)) if event.paths.len() == 2 => {
                vec![FileChange::Renamed {
                    from: event.paths[0].clone(),
                    to: event.paths[1].clone(),
                }]
            }
            EventKind::Modify(ModifyKind::Name(RenameMode::From)) | EventKind::Remove(_) => event
                .paths
                .into_iter()
                .map(FileChange::Deleted)
                .collect(),
            EventKind::Modify(ModifyKind::Name(_)) | EventKind::Create(_) => {
                let mut changes = Vec::new();
                for path in event.paths {
                    if !Self::is_directory(&path).await {
                        changes.push(FileChange::Created(path));
                    }
                }
                changes
            }
            EventKind::Modify(ModifyKind::Metadata(_)) => Vec::new(),
            EventKind::Modify(_) => {
                let mut changes = Vec::new();
                for path in event.paths {
                    if !Self::is_directory(&path).await {
                        changes.push(FileChange::Modified(path));
                    }
                }
                changes
            }
            _ => Vec::new(),
        }
    }

    async fn is_directory(path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false)
    }

    /// Stop watching all paths
    pub async fn stop(&mut self) -> Result<()> {
        self.cancellation_token.cancel();
        if let Some(_watcher) = self.watcher.take() {
            self.watched_paths.write().await.clear();
            info!("File watcher stopped");
        }
        Ok(())
    }

    /// Get currently watched paths
    pub async fn watched_paths(&self) -> Vec<PathBuf> {
        self.watched_paths.read().await.clone()
    }

    /// Check if a path is being watched
    pub async fn is_watching(&self, path: &Path) -> bool {
        self.watched_paths
            .read()
            .await
            .iter()
            .any(|p| path.starts_with(p))
    }
}
