//! Cancellable delayed tasks
//!
//! The debounce timer is expressed through [`Scheduler`]. The aggregator owns
//! the returned [`TaskHandle`] and cancels it before arming a replacement.

use futures::future::BoxFuture;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Runs a task once after a delay unless cancelled first
pub trait Scheduler: Send + Sync {
    /// Schedule `task` to run after `delay`
    fn schedule(&self, delay: Duration, task: BoxFuture<'static, ()>) -> TaskHandle;
}

/// Handle to a scheduled task
///
/// Cancelling before the delay elapses prevents the task from ever running.
/// Once the task has started, cancellation has no effect on it. Dropping the
/// handle does not cancel.
#[derive(Debug, Clone)]
pub struct TaskHandle {
    token: CancellationToken,
}

impl TaskHandle {
    pub fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Scheduler backed by the tokio timer
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: BoxFuture<'static, ()>) -> TaskHandle {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        tokio::spawn(async move {
            // The losing branch is dropped before the winning handler runs,
            // so a started task can no longer be cancelled.
            tokio::select! {
                _ = cancelled.cancelled() => trace!("Scheduled task cancelled"),
                _ = tokio::time::sleep(delay) => task.await,
            }
        });

        TaskHandle::new(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counting_task(counter: &Arc<AtomicUsize>) -> BoxFuture<'static, ()> {
        let counter = Arc::clone(counter);
        Box::pin(async move {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_runs_after_delay() {
        let counter = Arc::new(AtomicUsize::new(0));
        let _handle = TokioScheduler.schedule(Duration::from_secs(60), counting_task(&counter));

        tokio::time::sleep(Duration::from_secs(59)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_task_never_runs() {
        let counter = Arc::new(AtomicUsize::new(0));
        let handle = TokioScheduler.schedule(Duration::from_secs(60), counting_task(&counter));

        tokio::time::sleep(Duration::from_secs(30)).await;
        handle.cancel();
        assert!(handle.is_cancelled());

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_start_does_not_abort() {
        let counter = Arc::new(AtomicUsize::new(0));
        let task_counter = Arc::clone(&counter);
        let handle = TokioScheduler.schedule(
            Duration::from_secs(10),
            Box::pin(async move {
                tokio::time::sleep(Duration::from_secs(10)).await;
                task_counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        tokio::time::sleep(Duration::from_secs(15)).await;
        handle.cancel();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_keeps_task() {
        let counter = Arc::new(AtomicUsize::new(0));
        drop(TokioScheduler.schedule(Duration::from_secs(5), counting_task(&counter)));

        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
