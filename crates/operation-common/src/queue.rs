//! Bounded queue that runs operations and hands out completion handles.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{Semaphore, oneshot, watch};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::context::OperationContext;
use crate::operation::Operation;
use crate::outcome::Outcome;
use crate::state::OperationState;

/// Configuration for an operation queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Maximum operations executing at once. Submissions beyond this wait in
    /// `Pending` until a slot frees up.
    pub max_concurrent: usize,
    /// How long a cancelled operation is driven to let its cleanup finish
    /// before its future is dropped.
    pub cancel_grace_ms: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 4,
            cancel_grace_ms: 5_000,
        }
    }
}

/// Handle to one submitted operation.
///
/// Supports cancellation from any thread and a one-shot `join` that resolves
/// with the terminal [`Outcome`]. Dropping the handle detaches it; the
/// operation keeps running.
pub struct OperationHandle<T, E> {
    id: Uuid,
    name: &'static str,
    token: CancellationToken,
    state: watch::Receiver<OperationState>,
    outcome: oneshot::Receiver<Outcome<T, E>>,
}

impl<T, E> OperationHandle<T, E> {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current lifecycle state.
    pub fn state(&self) -> OperationState {
        *self.state.borrow()
    }

    /// Watch receiver for state transitions, for callers that want to wait
    /// for `Executing` or a terminal state.
    pub fn state_changes(&self) -> watch::Receiver<OperationState> {
        self.state.clone()
    }

    /// Request cancellation. Safe to call from any thread, any number of
    /// times, in any state; it has no effect once the operation finished.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancel_requested(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait for the terminal outcome. If the runtime tore the operation down
    /// without delivering one, this resolves to `Cancelled`.
    pub async fn join(self) -> Outcome<T, E> {
        self.outcome.await.unwrap_or(Outcome::Cancelled)
    }

    /// Handle that is already terminal, for failures detected before any
    /// work is worth scheduling.
    pub fn settled(name: &'static str, outcome: Outcome<T, E>) -> Self {
        let state = if outcome.is_cancelled() {
            OperationState::Cancelled
        } else {
            OperationState::Finished
        };
        let (_state_tx, state_rx) = watch::channel(state);
        let (out_tx, out_rx) = oneshot::channel();
        let _ = out_tx.send(outcome);
        Self {
            id: Uuid::new_v4(),
            name,
            token: CancellationToken::new(),
            state: state_rx,
            outcome: out_rx,
        }
    }
}

/// A queue that executes operations with bounded concurrency.
///
/// Each submission gets a child token of the queue's shutdown token, so
/// `shutdown` cancels everything in flight while individual handles cancel
/// only their own operation.
pub struct OperationQueue {
    config: QueueConfig,
    semaphore: Arc<Semaphore>,
    shutdown_token: CancellationToken,
    active: Arc<AtomicUsize>,
    tasks: parking_lot::Mutex<Option<JoinSet<()>>>,
}

impl OperationQueue {
    pub fn new() -> Self {
        Self::with_config(QueueConfig::default())
    }

    pub fn with_config(config: QueueConfig) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
            config,
            shutdown_token: CancellationToken::new(),
            active: Arc::new(AtomicUsize::new(0)),
            tasks: parking_lot::Mutex::new(Some(JoinSet::new())),
        }
    }

    /// Submit an operation for execution.
    ///
    /// The returned handle observes `Pending` until a slot is acquired. After
    /// [`shutdown`](Self::shutdown) the queue accepts nothing; submissions
    /// resolve immediately as `Cancelled`.
    pub fn submit<O: Operation>(&self, op: O) -> OperationHandle<O::Output, O::Error> {
        let id = Uuid::new_v4();
        let name = op.name();

        let mut tasks = self.tasks.lock();
        let Some(join_set) = tasks.as_mut() else {
            debug!(op = %name, "queue already shut down, refusing submission");
            return OperationHandle::settled(name, Outcome::Cancelled);
        };

        // Reap tasks that finished since the last submission.
        while join_set.try_join_next().is_some() {}

        let token = self.shutdown_token.child_token();
        let (state_tx, state_rx) = watch::channel(OperationState::Pending);
        let (out_tx, out_rx) = oneshot::channel();

        let ctx = OperationContext::new(id, name, token.clone());
        let semaphore = self.semaphore.clone();
        let active = self.active.clone();
        let cancel_grace = Duration::from_millis(self.config.cancel_grace_ms);

        join_set.spawn(async move {
            let outcome = run_operation(Box::new(op), ctx, semaphore, active, cancel_grace).await;
            let terminal = if outcome.is_cancelled() {
                OperationState::Cancelled
            } else {
                OperationState::Finished
            };
            let _ = state_tx.send(terminal);
            // The handle may have been dropped; that only detaches delivery.
            let _ = out_tx.send(outcome);
        });

        OperationHandle {
            id,
            name,
            token,
            state: state_rx,
            outcome: out_rx,
        }
    }

    /// Cancel everything in flight and wait for all operation tasks to
    /// settle. Subsequent submissions resolve as `Cancelled`.
    pub async fn shutdown(&self) {
        info!("Shutting down operation queue");
        self.shutdown_token.cancel();

        // Take the join set out of the mutex before awaiting
        let join_set = {
            let mut tasks = self.tasks.lock();
            tasks.take()
        };

        if let Some(mut join_set) = join_set {
            while join_set.join_next().await.is_some() {}
        }

        info!("Operation queue stopped");
    }

    /// Number of operations currently executing (not counting pending ones).
    pub fn active_count(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    pub fn is_running(&self) -> bool {
        !self.shutdown_token.is_cancelled()
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }
}

impl Default for OperationQueue {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_operation<O: Operation>(
    op: Box<O>,
    ctx: OperationContext,
    semaphore: Arc<Semaphore>,
    active: Arc<AtomicUsize>,
    cancel_grace: Duration,
) -> Outcome<O::Output, O::Error> {
    let id = ctx.id;
    let name = ctx.name.clone();
    let token = ctx.token.clone();

    // Wait for a slot; a cancel while pending means the operation never runs.
    let permit = tokio::select! {
        _ = token.cancelled() => {
            debug!(op = %name, id = %id, "cancelled while pending");
            return Outcome::Cancelled;
        }
        permit = semaphore.acquire_owned() => match permit {
            Ok(permit) => permit,
            Err(_) => return Outcome::Cancelled,
        },
    };

    debug!(op = %name, id = %id, "operation executing");
    active.fetch_add(1, Ordering::SeqCst);

    let mut fut = std::pin::pin!(op.execute(ctx));
    let outcome = tokio::select! {
        result = &mut fut => {
            if token.is_cancelled() {
                // The cancel raced a natural completion; the cancel wins and
                // any produced value is dropped.
                debug!(op = %name, id = %id, "completion raced a cancel request");
                Outcome::Cancelled
            } else {
                Outcome::from_result(result)
            }
        }
        _ = token.cancelled() => {
            // Keep driving the operation so capability aborts and drop guards
            // run, bounded by the grace period.
            if tokio::time::timeout(cancel_grace, &mut fut).await.is_err() {
                warn!(op = %name, id = %id, "operation did not settle within cancel grace period");
            }
            Outcome::Cancelled
        }
    };

    active.fetch_sub(1, Ordering::SeqCst);
    drop(permit);
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    }

    struct Immediate(u32);

    #[async_trait]
    impl Operation for Immediate {
        type Output = u32;
        type Error = String;

        fn name(&self) -> &'static str {
            "immediate"
        }

        async fn execute(self: Box<Self>, _ctx: OperationContext) -> Result<u32, String> {
            Ok(self.0)
        }
    }

    struct Failing;

    #[async_trait]
    impl Operation for Failing {
        type Output = u32;
        type Error = String;

        fn name(&self) -> &'static str {
            "failing"
        }

        async fn execute(self: Box<Self>, _ctx: OperationContext) -> Result<u32, String> {
            Err("it broke".to_string())
        }
    }

    /// Runs until its token fires, then bails out.
    struct WaitsForCancel;

    #[async_trait]
    impl Operation for WaitsForCancel {
        type Output = u32;
        type Error = String;

        fn name(&self) -> &'static str {
            "waits-for-cancel"
        }

        async fn execute(self: Box<Self>, ctx: OperationContext) -> Result<u32, String> {
            ctx.token.cancelled().await;
            Err("stopped".to_string())
        }
    }

    /// Sleeps for a bit, ignores its token, then succeeds.
    struct Sleeper(Duration);

    #[async_trait]
    impl Operation for Sleeper {
        type Output = u32;
        type Error = String;

        fn name(&self) -> &'static str {
            "sleeper"
        }

        async fn execute(self: Box<Self>, _ctx: OperationContext) -> Result<u32, String> {
            tokio::time::sleep(self.0).await;
            Ok(99)
        }
    }

    struct Tracking {
        current: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Operation for Tracking {
        type Output = u32;
        type Error = String;

        fn name(&self) -> &'static str {
            "tracking"
        }

        async fn execute(self: Box<Self>, _ctx: OperationContext) -> Result<u32, String> {
            let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(30)).await;
            self.current.fetch_sub(1, Ordering::SeqCst);
            Ok(0)
        }
    }

    #[test]
    fn test_queue_config_default() {
        let config = QueueConfig::default();
        assert_eq!(config.max_concurrent, 4);
        assert_eq!(config.cancel_grace_ms, 5_000);
    }

    #[tokio::test]
    async fn test_submit_delivers_success() {
        let queue = OperationQueue::new();
        let handle = queue.submit(Immediate(42));
        let id = handle.id();

        let outcome = handle.join().await;
        assert_eq!(outcome.completed(), Some(42));
        assert!(!id.is_nil());
        queue.shutdown().await;
    }

    #[tokio::test]
    async fn test_submit_delivers_failure() {
        let queue = OperationQueue::new();
        let handle = queue.submit(Failing);

        let outcome = handle.join().await;
        assert_eq!(outcome.failed(), Some("it broke".to_string()));
        queue.shutdown().await;
    }

    #[tokio::test]
    async fn test_terminal_state_is_finished_after_success() {
        let queue = OperationQueue::new();
        let handle = queue.submit(Immediate(1));

        let mut states = handle.state_changes();
        handle.join().await;
        let state = *states
            .wait_for(|s| s.is_terminal())
            .await
            .expect("state channel closed early");
        assert_eq!(state, OperationState::Finished);
        queue.shutdown().await;
    }

    #[tokio::test]
    async fn test_cancel_while_pending_never_executes() {
        let queue = OperationQueue::with_config(QueueConfig {
            max_concurrent: 1,
            ..QueueConfig::default()
        });

        let blocker = queue.submit(WaitsForCancel);
        let mut blocker_states = blocker.state_changes();
        blocker_states
            .wait_for(|s| *s == OperationState::Executing)
            .await
            .expect("state channel closed early");

        let queued = queue.submit(Immediate(5));
        assert_eq!(queued.state(), OperationState::Pending);

        queued.cancel();
        let outcome = queued.join().await;
        assert!(outcome.is_cancelled());

        blocker.cancel();
        assert!(blocker.join().await.is_cancelled());
        queue.shutdown().await;
    }

    #[tokio::test]
    async fn test_cancel_during_execution_discards_success() {
        init_tracing();
        let queue = OperationQueue::new();
        let handle = queue.submit(Sleeper(Duration::from_millis(50)));

        let mut states = handle.state_changes();
        states
            .wait_for(|s| *s == OperationState::Executing)
            .await
            .expect("state channel closed early");

        handle.cancel();
        // The sleeper ignores its token and returns Ok after the sleep, but
        // the cancel must still win.
        let outcome = handle.join().await;
        assert!(outcome.is_cancelled());
        queue.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_cancels_in_flight_operations() {
        init_tracing();
        let queue = OperationQueue::new();
        let handle = queue.submit(WaitsForCancel);

        let mut states = handle.state_changes();
        states
            .wait_for(|s| *s == OperationState::Executing)
            .await
            .expect("state channel closed early");

        queue.shutdown().await;
        assert!(handle.join().await.is_cancelled());
        assert!(!queue.is_running());
    }

    #[tokio::test]
    async fn test_submit_after_shutdown_resolves_cancelled() {
        let queue = OperationQueue::new();
        queue.shutdown().await;

        let handle = queue.submit(Immediate(1));
        assert_eq!(handle.state(), OperationState::Cancelled);
        assert!(handle.join().await.is_cancelled());
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let queue = OperationQueue::with_config(QueueConfig {
            max_concurrent: 2,
            ..QueueConfig::default()
        });
        let current = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..6)
            .map(|_| {
                queue.submit(Tracking {
                    current: current.clone(),
                    peak: peak.clone(),
                })
            })
            .collect();

        for handle in handles {
            assert!(handle.join().await.is_completed());
        }
        assert!(peak.load(Ordering::SeqCst) <= 2);
        queue.shutdown().await;
    }

    #[tokio::test]
    async fn test_settled_handle_is_terminal() {
        let handle: OperationHandle<u32, String> =
            OperationHandle::settled("precheck", Outcome::Failed("bad input".to_string()));
        assert_eq!(handle.state(), OperationState::Finished);
        assert_eq!(handle.join().await.failed(), Some("bad input".to_string()));
    }
}
