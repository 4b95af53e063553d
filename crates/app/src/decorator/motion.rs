//! Motion sensing: turns the device on when motion is seen.

use std::sync::Arc;
use std::time::Duration;

use homesim_domain::device::{Command, DeviceKind};
use homesim_domain::error::HomeError;

use crate::device::SmartDevice;
use crate::event_bus::NotificationHub;
use crate::ports::Scheduler;
use crate::scheduler::TimerSlot;

/// How long the motion flag stays raised after the last detection.
pub const MOTION_QUIET_PERIOD: Duration = Duration::from_secs(5 * 60);

/// Adds a motion sensor to the wrapped device.
///
/// Notification order for [`detect_motion`](Self::detect_motion) on a device
/// that is off:
/// 1. `Motion detected near <description>`
/// 2. `<inner description> turned ON` (from the wrapped device)
/// 3. `Motion sensor for <description> activated`
///
/// The flag reset after the quiet period is silent.
pub struct MotionSensing<D: ?Sized = dyn SmartDevice> {
    inner: Arc<D>,
    hub: Arc<NotificationHub>,
    reset: TimerSlot,
    quiet_period: Duration,
}

impl<D: SmartDevice + ?Sized> MotionSensing<D> {
    #[must_use]
    pub fn new(inner: Arc<D>, hub: Arc<NotificationHub>, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            inner,
            hub,
            reset: TimerSlot::new(scheduler),
            quiet_period: MOTION_QUIET_PERIOD,
        }
    }

    /// Override how long the motion flag stays raised.
    #[must_use]
    pub fn with_quiet_period(mut self, quiet_period: Duration) -> Self {
        self.quiet_period = quiet_period;
        self
    }

    /// The wrapped value, one level down.
    #[must_use]
    pub fn inner(&self) -> &Arc<D> {
        &self.inner
    }

    /// Whether motion was seen within the last quiet period.
    #[must_use]
    pub fn is_motion_detected(&self) -> bool {
        self.reset.is_pending()
    }

    /// Register motion: raise the flag, announce it, and switch the device
    /// on if it is off. Each detection restarts the quiet period.
    pub fn detect_motion(&self) {
        self.reset.arm(self.quiet_period, || {
            tracing::debug!("motion flag cleared");
        });
        let message = format!("Motion detected near {}", self.describe());
        self.hub.notify(message);

        if !self.is_on() {
            self.turn_on();
        }
    }
}

impl<D: SmartDevice + ?Sized> SmartDevice for MotionSensing<D> {
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
        let was_on = self.inner.is_on();
        self.inner.turn_on();
        if !was_on && self.inner.is_on() {
            let message = format!("Motion sensor for {} activated", self.describe());
            self.hub.notify(message);
        }
    }

    fn turn_off(&self) {
        let was_on = self.inner.is_on();
        self.inner.turn_off();
        if was_on && !self.inner.is_on() {
            let message = format!("Motion sensor for {} deactivated", self.describe());
            self.hub.notify(message);
        }
    }

    fn describe(&self) -> String {
        format!("Motion-Sensing {}", self.inner.describe())
    }

    fn configure(&self, command: Command) -> Result<(), HomeError> {
        self.inner.configure(command)
    }
}
