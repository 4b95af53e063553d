//! Timed shutoff: turns the device off after a countdown.

use std::sync::Arc;
use std::time::Duration;

use homesim_domain::device::{Command, DeviceKind};
use homesim_domain::error::HomeError;
use tokio::time::Instant;

use crate::device::SmartDevice;
use crate::event_bus::NotificationHub;
use crate::ports::Scheduler;
use crate::scheduler::TimerSlot;

/// Real length of one countdown minute.
pub const MINUTE: Duration = Duration::from_secs(60);

/// Adds a one-shot auto-off timer to the wrapped device.
///
/// Only one countdown is pending at a time: [`set_timer`](Self::set_timer)
/// replaces the previous one. When a countdown races with
/// [`cancel_timer`](Self::cancel_timer), exactly one of them takes effect;
/// listeners never see both the shutoff and the cancellation. A countdown
/// outlives the decorator that started it.
pub struct TimedShutoff<D: ?Sized = dyn SmartDevice> {
    inner: Arc<D>,
    hub: Arc<NotificationHub>,
    shutoff: TimerSlot,
    minute: Duration,
}

impl<D: SmartDevice + ?Sized + 'static> TimedShutoff<D> {
    #[must_use]
    pub fn new(inner: Arc<D>, hub: Arc<NotificationHub>, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            inner,
            hub,
            shutoff: TimerSlot::new(scheduler),
            minute: MINUTE,
        }
    }

    /// Override the real duration of one countdown minute.
    #[must_use]
    pub fn with_minute_length(mut self, minute: Duration) -> Self {
        self.minute = minute;
        self
    }

    /// The wrapped value, one level down.
    #[must_use]
    pub fn inner(&self) -> &Arc<D> {
        &self.inner
    }

    /// Turn the device off in `minutes`, replacing any pending countdown.
    pub fn set_timer(&self, minutes: u32) {
        self.shutoff.disarm();
        self.hub.notify(format!(
            "{} set to turn off in {minutes} minutes",
            self.describe()
        ));

        let inner = Arc::clone(&self.inner);
        self.shutoff.arm(self.minute.saturating_mul(minutes), move || {
            tracing::debug!(device = %inner.describe(), "shutoff timer fired");
            inner.turn_off();
        });
    }

    /// Whether a countdown is pending and its deadline is still ahead.
    #[must_use]
    pub fn is_timer_active(&self) -> bool {
        self.shutoff
            .deadline()
            .is_some_and(|deadline| Instant::now() < deadline)
    }

    /// Time left before the pending countdown fires.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        self.shutoff
            .deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Cancel the pending countdown. Does nothing when none is pending.
    pub fn cancel_timer(&self) {
        if self.shutoff.disarm() {
            let message = format!("Timer cancelled for {}", self.describe());
            self.hub.notify(message);
        }
    }
}

impl<D: SmartDevice + ?Sized + 'static> SmartDevice for TimedShutoff<D> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn room(&self) -> &str {
        self.inner.room()
    }

    fn is_on(&self) -> bool {
        self.inner.is_on()
    }

    fn kind(&self) -> DeviceKind {
        self.inner.kind()
    }

    fn turn_on(&self) {
        self.inner.turn_on();
    }

    fn turn_off(&self) {
        self.inner.turn_off();
    }

    fn describe(&self) -> String {
        format!("Timer-Enabled {}", self.inner.describe())
    }

    fn configure(&self, command: Command) -> Result<(), HomeError> {
        self.inner.configure(command)
    }
}
