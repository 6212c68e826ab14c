//! The debounce and batch-accumulation state machine
//!
//! ```text
//!            accept                   accept (re-arm)
//!   Idle ------------> Armed <-----------------+
//!    ^                   |                     |
//!    |      expiry       +---------------------+
//!    +-------------------+
//! ```
//!
//! All state sits behind one mutex and every transition happens while holding
//! it, so "cancel the old timer, arm the new one" is atomic with respect to a
//! timer that is just expiring. The lock is never held across a session
//! server call.

use crate::filter::{PathFilter, Verdict};
use crate::payload::{FlushPayload, DEFAULT_SESSION_LABEL};
use crate::pending::PendingSet;
use crate::scheduler::{Scheduler, TaskHandle, TokioScheduler};
use chrono::Utc;
use docsync_core::error::Result;
use docsync_core::DocLayout;
use docsync_session::{notify_best_effort, Session, SessionApi, ToastVariant};
use docsync_watcher::FileChange;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info, trace, warn};

/// Quiet period after the last accepted change before a flush fires
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_secs(10 * 60);

/// Aggregator settings
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Inactivity required before flushing
    pub quiet_period: Duration,
    /// Label appended to the date in the session title
    pub session_label: String,
    /// Whether a toast announces each update
    pub toast_enabled: bool,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            quiet_period: DEFAULT_QUIET_PERIOD,
            session_label: DEFAULT_SESSION_LABEL.to_string(),
            toast_enabled: true,
        }
    }
}

/// What a flush cycle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Nothing was pending; no downstream calls were made
    Empty,
    /// The expiring timer had already been replaced by a newer one
    Superseded,
    /// The session could not be resolved and the batch was discarded
    Dropped { files: Vec<PathBuf>, reason: String },
    /// The prompt was submitted
    Delivered {
        session_id: String,
        files: Vec<PathBuf>,
        created_session: bool,
    },
}

/// The armed debounce timer
struct ArmedTimer {
    generation: u64,
    handle: TaskHandle,
}

#[derive(Default)]
struct AggregatorState {
    pending: PendingSet,
    timer: Option<ArmedTimer>,
    next_generation: u64,
}

struct Inner {
    filter: PathFilter,
    config: AggregatorConfig,
    api: Arc<dyn SessionApi>,
    scheduler: Arc<dyn Scheduler>,
    state: Mutex<AggregatorState>,
}

/// Accumulates documentation changes and flushes them as one request
///
/// Cloning is cheap and every clone shares the same state.
#[derive(Clone)]
pub struct ChangeAggregator {
    inner: Arc<Inner>,
}

impl ChangeAggregator {
    /// Create an aggregator using the tokio timer
    pub fn new(layout: DocLayout, api: Arc<dyn SessionApi>, config: AggregatorConfig) -> Self {
        Self::with_scheduler(layout, api, config, Arc::new(TokioScheduler))
    }

    /// Create an aggregator with a custom scheduler
    pub fn with_scheduler(
        layout: DocLayout,
        api: Arc<dyn SessionApi>,
        config: AggregatorConfig,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                filter: PathFilter::new(layout),
                config,
                api,
                scheduler,
                state: Mutex::new(AggregatorState::default()),
            }),
        }
    }

    pub fn filter(&self) -> &PathFilter {
        &self.inner.filter
    }

    /// Handle a host file event
    pub async fn handle_event(&self, change: &FileChange) -> Verdict {
        trace!("{} event for {}", change.kind(), change.path().display());
        self.on_file_changed(change.path()).await
    }

    /// Record a changed file
    ///
    /// Accepted paths join the pending set and restart the quiet period from
    /// zero. The verdict is returned for logging only.
    pub async fn on_file_changed(&self, path: impl AsRef<Path>) -> Verdict {
        let path = path.as_ref();
        let verdict = self.inner.filter.classify(path);
        if !verdict.is_accepted() {
            trace!("Ignoring {}: {verdict}", path.display());
            return verdict;
        }

        let mut state = self.inner.state.lock().await;
        if state.pending.insert(path.to_path_buf()) {
            debug!("Queued {} ({verdict})", path.display());
        }

        if let Some(timer) = state.timer.take() {
            timer.handle.cancel();
        }

        state.next_generation += 1;
        let generation = state.next_generation;
        let this = self.clone();
        let handle = self.inner.scheduler.schedule(
            self.inner.config.quiet_period,
            Box::pin(async move { this.on_timer_expired(generation).await }),
        );
        state.timer = Some(ArmedTimer { generation, handle });

        debug!(
            "Debounce timer armed for {:?} with {} pending file(s)",
            self.inner.config.quiet_period,
            state.pending.len()
        );
        verdict
    }

    /// Flush immediately, cancelling the armed timer
    pub async fn flush_now(&self) -> Result<FlushOutcome> {
        let files = {
            let mut state = self.inner.state.lock().await;
            if let Some(timer) = state.timer.take() {
                timer.handle.cancel();
            }
            state.pending.drain()
        };
        self.deliver(files).await
    }

    /// Snapshot of the pending paths in insertion order
    pub async fn pending_files(&self) -> Vec<PathBuf> {
        self.inner.state.lock().await.pending.iter().cloned().collect()
    }

    pub async fn pending_count(&self) -> usize {
        self.inner.state.lock().await.pending.len()
    }

    /// Whether a debounce timer is outstanding
    pub async fn is_armed(&self) -> bool {
        self.inner.state.lock().await.timer.is_some()
    }

    /// Timer callback; prompt failures end up here
    async fn on_timer_expired(&self, generation: u64) {
        match self.fire(generation).await {
            Ok(FlushOutcome::Delivered {
                session_id, files, ..
            }) => info!(
                "Submitted documentation update for {} file(s) to session {session_id}",
                files.len()
            ),
            Ok(outcome) => debug!("Flush finished: {outcome:?}"),
            Err(e) => error!("Documentation update failed: {e}"),
        }
    }

    /// Drain the batch if `generation` is still the armed timer
    async fn fire(&self, generation: u64) -> Result<FlushOutcome> {
        let files = {
            let mut state = self.inner.state.lock().await;
            match &state.timer {
                Some(timer) if timer.generation == generation => {}
                _ => {
                    trace!("Timer generation {generation} superseded");
                    return Ok(FlushOutcome::Superseded);
                }
            }
            state.timer = None;
            state.pending.drain()
        };
        self.deliver(files).await
    }

    /// Send a drained batch to the session server
    async fn deliver(&self, files: Vec<PathBuf>) -> Result<FlushOutcome> {
        if files.is_empty() {
            debug!("Flush with nothing pending");
            return Ok(FlushOutcome::Empty);
        }

        let payload = FlushPayload::new(
            files,
            Utc::now().date_naive(),
            &self.inner.config.session_label,
        );
        info!(
            "Flushing {} changed file(s) to \"{}\"",
            payload.files.len(),
            payload.session_title
        );

        let api = self.inner.api.as_ref();
        if self.inner.config.toast_enabled {
            notify_best_effort(api, &payload.toast_message(), ToastVariant::Info).await;
        }

        let (session, created_session) = match self.resolve_session(&payload.session_title).await
        {
            Ok(Some(resolved)) => resolved,
            Ok(None) => {
                warn!(
                    "Session server returned no session; dropping {} file(s)",
                    payload.files.len()
                );
                return Ok(FlushOutcome::Dropped {
                    files: payload.files,
                    reason: "no session returned".to_string(),
                });
            }
            Err(e) => {
                warn!(
                    "Failed to resolve session \"{}\"; dropping {} file(s): {e}",
                    payload.session_title,
                    payload.files.len()
                );
                return Ok(FlushOutcome::Dropped {
                    files: payload.files,
                    reason: e.to_string(),
                });
            }
        };

        api.prompt_session(&session.id, &payload.prompt()).await?;

        Ok(FlushOutcome::Delivered {
            session_id: session.id,
            files: payload.files,
            created_session,
        })
    }

    /// Find the session by exact title, creating it when absent
    async fn resolve_session(&self, title: &str) -> Result<Option<(Session, bool)>> {
        let api = self.inner.api.as_ref();
        let existing = api
            .list_sessions()
            .await?
            .into_iter()
            .find(|session| session.title == title);

        if let Some(session) = existing {
            debug!("Reusing session {} for \"{title}\"", session.id);
            return Ok(Some((session, false)));
        }

        info!("Creating session \"{title}\"");
        Ok(api.create_session(title).await?.map(|session| (session, true)))
    }
}
