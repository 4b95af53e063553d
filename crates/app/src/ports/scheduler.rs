//! Scheduler port: one-shot delayed actions.

use std::time::Duration;

use tokio::task::AbortHandle;

/// A boxed action run once when a timer fires.
pub type TimerAction = Box<dyn FnOnce() + Send + 'static>;

/// Runs an action once after a delay, without blocking the caller.
pub trait Scheduler: Send + Sync {
    /// Schedule `action` to run after `delay`.
    ///
    /// The returned handle cancels the action if it has not started yet.
    fn schedule(&self, delay: Duration, action: TimerAction) -> TimerHandle;
}

/// Cancellation handle for one scheduled action.
#[derive(Debug)]
pub struct TimerHandle {
    abort: AbortHandle,
}

impl TimerHandle {
    #[must_use]
    pub fn new(abort: AbortHandle) -> Self {
        Self { abort }
    }

    /// Best-effort cancellation; a no-op once the action has run.
    pub fn cancel(&self) {
        self.abort.abort();
    }
}
