//! Timers backed by tokio tasks.
//!
//! [`TokioScheduler`] implements the [`Scheduler`] port by spawning one task
//! per scheduled action. [`TimerSlot`] layers the "one pending timer per
//! owner" rule on top: arming a slot supersedes its previous timer, and a
//! firing timer and a concurrent [`disarm`](TimerSlot::disarm) race for the
//! same claim so exactly one of them wins.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use homesim_domain::error::HomeError;
use tokio::runtime::Handle;
use tokio::time::Instant;

use crate::ports::scheduler::TimerAction;
use crate::ports::{Scheduler, TimerHandle};

/// Scheduler that runs each action in its own tokio task.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    /// Spawn timers on the given runtime.
    #[must_use]
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Spawn timers on the runtime the caller is running in.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::SchedulerUnavailable`] when called outside of a
    /// tokio runtime.
    pub fn current() -> Result<Self, HomeError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|err| HomeError::SchedulerUnavailable(Box::new(err)))
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, action: TimerAction) -> TimerHandle {
        tracing::debug!(delay_ms = delay.as_millis(), "timer scheduled");
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            action();
        });
        TimerHandle::new(task.abort_handle())
    }
}

struct Pending {
    deadline: Instant,
    handle: TimerHandle,
}

#[derive(Default)]
struct SlotState {
    generation: u64,
    pending: Option<Pending>,
}

/// At most one pending timer, owned by a single decorator instance.
///
/// Dropping the slot leaves its pending timer running; only
/// [`arm`](Self::arm) and [`disarm`](Self::disarm) cancel it.
pub struct TimerSlot {
    scheduler: Arc<dyn Scheduler>,
    state: Arc<Mutex<SlotState>>,
}

impl TimerSlot {
    #[must_use]
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            scheduler,
            state: Arc::default(),
        }
    }

    /// Run `action` after `delay`, cancelling whatever this slot had pending.
    ///
    /// A superseded timer never runs its action, even if it was already
    /// waking up when the slot was re-armed.
    pub fn arm(&self, delay: Duration, action: impl FnOnce() + Send + 'static) {
        let mut state = lock(&self.state);
        if let Some(previous) = state.pending.take() {
            previous.handle.cancel();
        }
        state.generation += 1;
        let generation = state.generation;

        let shared = Arc::clone(&self.state);
        let handle = self.scheduler.schedule(
            delay,
            Box::new(move || {
                if claim(&shared, generation) {
                    action();
                }
            }),
        );
        state.pending = Some(Pending {
            deadline: Instant::now() + delay,
            handle,
        });
    }

    /// Cancel the pending timer. Returns `true` if one was pending and has
    /// now been cancelled, `false` if there was nothing to cancel (including
    /// when the timer already fired).
    pub fn disarm(&self) -> bool {
        match lock(&self.state).pending.take() {
            Some(pending) => {
                pending.handle.cancel();
                true
            }
            None => false,
        }
    }

    /// Whether a timer is armed and has not fired yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        lock(&self.state).pending.is_some()
    }

    /// When the pending timer is due, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        lock(&self.state).pending.as_ref().map(|p| p.deadline)
    }
}

impl std::fmt::Debug for TimerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerSlot")
            .field("deadline", &self.deadline())
            .finish_non_exhaustive()
    }
}

/// Take the pending timer if it still belongs to `generation`.
fn claim(state: &Mutex<SlotState>, generation: u64) -> bool {
    let mut state = lock(state);
    if state.generation == generation && state.pending.is_some() {
        state.pending = None;
        true
    } else {
        false
    }
}

fn lock(state: &Mutex<SlotState>) -> MutexGuard<'_, SlotState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn slot() -> TimerSlot {
        TimerSlot::new(Arc::new(TokioScheduler::current().unwrap()))
    }

    fn counter() -> (Arc<AtomicUsize>, impl FnOnce() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = Arc::clone(&count);
        (count, move || {
            inner.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn should_fail_outside_a_runtime() {
        assert!(matches!(
            TokioScheduler::current(),
            Err(HomeError::SchedulerUnavailable(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn should_run_action_once_after_delay() {
        let slot = slot();
        let (count, action) = counter();

        slot.arm(Duration::from_secs(60), action);
        assert!(slot.is_pending());

        tokio::time::sleep(Duration::from_secs(59)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert!(!slot.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn should_supersede_previous_timer_when_rearmed() {
        let slot = slot();
        let (first, first_action) = counter();
        let (second, second_action) = counter();

        slot.arm(Duration::from_secs(60), first_action);
        slot.arm(Duration::from_secs(300), second_action);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert!(slot.is_pending());

        tokio::time::sleep(Duration::from_secs(200)).await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn should_not_run_action_when_disarmed() {
        let slot = slot();
        let (count, action) = counter();

        slot.arm(Duration::from_secs(60), action);
        assert!(slot.disarm());

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn should_report_nothing_to_disarm_after_firing() {
        let slot = slot();
        let (_, action) = counter();

        slot.arm(Duration::from_secs(1), action);
        tokio::time::sleep(Duration::from_secs(2)).await;

        assert!(!slot.disarm());
    }

    #[tokio::test(start_paused = true)]
    async fn should_expose_deadline_while_pending() {
        let slot = slot();
        assert!(slot.deadline().is_none());

        let start = Instant::now();
        slot.arm(Duration::from_secs(90), || {});
        assert_eq!(slot.deadline(), Some(start + Duration::from_secs(90)));
    }

    #[tokio::test(start_paused = true)]
    async fn should_still_fire_when_slot_dropped() {
        let (count, action) = counter();
        {
            let slot = slot();
            slot.arm(Duration::from_secs(1), action);
        }
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
