//! Latest-wins guard for overlapping asynchronous operations.
//!
//! Every started operation takes a token from a generation counter. When it
//! settles, its result is applied only if its token is still the newest one;
//! otherwise it is dropped without any observable effect. In-flight requests are
//! never aborted, only ignored.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::ApiError;

/// Token identifying one started operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OperationToken(u64);

impl OperationToken {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Observable state of a coordinated operation stream.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationState<T> {
    /// Token of the most recently started operation (0 before the first one).
    pub generation: u64,
    /// True while the most recently started operation has not settled.
    pub in_progress: bool,
    /// Last value applied by a current operation.
    pub value: Option<T>,
    /// Error reported by the current operation, cleared when a new one starts.
    pub error: Option<ApiError>,
}

impl<T> Default for OperationState<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            in_progress: false,
            value: None,
            error: None,
        }
    }
}

/// Coordinates a single latest-wins operation stream.
///
/// Clones share the same counter and state.
pub struct RequestCoordinator<T> {
    state: Arc<watch::Sender<OperationState<T>>>,
}

impl<T> Clone for RequestCoordinator<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T> Default for RequestCoordinator<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RequestCoordinator<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create a coordinator with its counter at 0.
    pub fn new() -> Self {
        let (sender, _) = watch::channel(OperationState::default());
        Self {
            state: Arc::new(sender),
        }
    }

    /// Start an operation: bump the counter, mark in progress, clear the error.
    pub fn begin(&self) -> OperationToken {
        let mut generation = 0;
        self.state.send_modify(|state| {
            state.generation += 1;
            state.in_progress = true;
            state.error = None;
            generation = state.generation;
        });
        OperationToken(generation)
    }

    /// Apply `result` if `token` is still current. Returns whether it was applied.
    pub fn settle(&self, token: OperationToken, result: Result<T, ApiError>) -> bool {
        let applied = self.state.send_if_modified(|state| {
            if state.generation != token.0 {
                return false;
            }
            match result {
                Ok(value) => state.value = Some(value),
                Err(error) => state.error = Some(error),
            }
            state.in_progress = false;
            true
        });

        if !applied {
            debug!(
                "Discarding stale result for operation {} (current: {})",
                token.0,
                self.current_generation()
            );
        }
        applied
    }

    /// Start an operation built by `task_factory` and settle it when it completes.
    ///
    /// The factory runs synchronously after the token is taken; the returned
    /// future is driven on a spawned task. The join handle yields whether the
    /// result was applied.
    pub fn start_operation<F, Fut>(&self, task_factory: F) -> JoinHandle<bool>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let token = self.begin();
        let task = task_factory();
        let coordinator = self.clone();

        tokio::spawn(async move {
            let result = task.await;
            coordinator.settle(token, result)
        })
    }

    pub fn is_current(&self, token: OperationToken) -> bool {
        self.state.borrow().generation == token.0
    }

    pub fn current_generation(&self) -> u64 {
        self.state.borrow().generation
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> OperationState<T> {
        self.state.borrow().clone()
    }

    /// Receiver notified on every applied change.
    pub fn subscribe(&self) -> watch::Receiver<OperationState<T>> {
        self.state.subscribe()
    }
}
