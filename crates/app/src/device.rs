//! Live devices: the capability surface shared by devices and decorators.
//!
//! [`Device`] owns the state machine from the domain and reports every
//! observable change to the [`NotificationHub`] before returning. Decorators
//! implement the same [`SmartDevice`] trait by delegating to the value they
//! wrap, so a room can hold a bare device or a whole decoration chain.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use homesim_domain::device::{Change, Command, DeviceKind, DeviceState, DeviceType};
use homesim_domain::error::HomeError;

use crate::event_bus::NotificationHub;

/// Operations every device and every decorator exposes.
pub trait SmartDevice: Send + Sync {
    /// Device name, unique within its room.
    fn name(&self) -> &str;

    /// Name of the room the device belongs to.
    fn room(&self) -> &str;

    fn is_on(&self) -> bool;

    /// Snapshot of the type-specific attributes.
    fn kind(&self) -> DeviceKind;

    fn turn_on(&self);

    fn turn_off(&self);

    fn toggle(&self) {
        if self.is_on() {
            self.turn_off();
        } else {
            self.turn_on();
        }
    }

    /// Human-readable label used in notifications.
    fn describe(&self) -> String;

    /// Apply an attribute command (brightness, temperature, lock, recording).
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::UnsupportedCommand`] when the command does not
    /// apply to this kind of device.
    fn configure(&self, command: Command) -> Result<(), HomeError>;

    /// Apply any command, routing power commands through
    /// [`turn_on`](Self::turn_on) / [`turn_off`](Self::turn_off) so
    /// decorators see them.
    ///
    /// # Errors
    ///
    /// Same as [`configure`](Self::configure).
    fn apply(&self, command: Command) -> Result<(), HomeError> {
        match command {
            Command::TurnOn => {
                self.turn_on();
                Ok(())
            }
            Command::TurnOff => {
                self.turn_off();
                Ok(())
            }
            other => self.configure(other),
        }
    }
}

/// A base device owning its state and the hub it reports to.
pub struct Device {
    name: String,
    room: String,
    state: Mutex<DeviceState>,
    hub: Arc<NotificationHub>,
}

impl Device {
    /// Build a powered-off device with the default attributes of its type.
    #[must_use]
    pub fn new(
        device_type: DeviceType,
        name: impl Into<String>,
        room: impl Into<String>,
        hub: Arc<NotificationHub>,
    ) -> Self {
        Self {
            name: name.into(),
            room: room.into(),
            state: Mutex::new(DeviceState::new(device_type)),
            hub,
        }
    }

    #[must_use]
    pub fn device_type(&self) -> DeviceType {
        self.lock_state().kind.device_type()
    }

    /// Set brightness in percent; levels outside `0..=100` are ignored.
    ///
    /// # Errors
    ///
    /// Fails with [`HomeError::UnsupportedCommand`] unless this is a light.
    pub fn set_brightness(&self, level: i32) -> Result<(), HomeError> {
        self.configure(Command::SetBrightness(level))
    }

    /// # Errors
    ///
    /// Fails with [`HomeError::UnsupportedCommand`] unless this is a thermostat.
    pub fn set_temperature(&self, celsius: f32) -> Result<(), HomeError> {
        self.configure(Command::SetTemperature(celsius))
    }

    /// # Errors
    ///
    /// Fails with [`HomeError::UnsupportedCommand`] unless this is a door.
    pub fn lock(&self) -> Result<(), HomeError> {
        self.configure(Command::Lock)
    }

    /// # Errors
    ///
    /// Fails with [`HomeError::UnsupportedCommand`] unless this is a door.
    pub fn unlock(&self) -> Result<(), HomeError> {
        self.configure(Command::Unlock)
    }

    /// # Errors
    ///
    /// Fails with [`HomeError::UnsupportedCommand`] unless this is a camera.
    pub fn start_recording(&self) -> Result<(), HomeError> {
        self.configure(Command::StartRecording)
    }

    /// # Errors
    ///
    /// Fails with [`HomeError::UnsupportedCommand`] unless this is a camera.
    pub fn stop_recording(&self) -> Result<(), HomeError> {
        self.configure(Command::StopRecording)
    }

    // Both helpers release the state lock before notifying so listeners may
    // query the device.

    fn execute(&self, command: Command) -> Result<(), HomeError> {
        let change = self.lock_state().apply(command)?;
        self.report(change);
        Ok(())
    }

    fn switch(&self, on: bool) {
        let change = self.lock_state().set_power(on);
        self.report(change);
    }

    fn report(&self, change: Option<Change>) {
        if let Some(change) = change {
            self.hub.notify(format!("{} {change}", self.describe()));
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, DeviceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SmartDevice for Device {
    fn name(&self) -> &str {
        &self.name
    }

    fn room(&self) -> &str {
        &self.room
    }

    fn is_on(&self) -> bool {
        self.lock_state().is_on
    }

    fn kind(&self) -> DeviceKind {
        self.lock_state().kind
    }

    fn turn_on(&self) {
        self.switch(true);
    }

    fn turn_off(&self) {
        self.switch(false);
    }

    fn describe(&self) -> String {
        format!("{} {}", self.room, self.name)
    }

    fn configure(&self, command: Command) -> Result<(), HomeError> {
        self.execute(command).inspect_err(|err| {
            tracing::warn!(device = %self.describe(), error = %err, "command rejected");
        })
    }
}

impl std::fmt::Debug for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device")
            .field("name", &self.name)
            .field("room", &self.room)
            .field("state", &*self.lock_state())
            .finish_non_exhaustive()
    }
}
