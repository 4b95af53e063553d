//! Home controller: the registry tying rooms, modes, listeners and timers
//! together.
//!
//! The controller is constructed explicitly and handed to whoever needs it;
//! there is no global instance. It owns the [`NotificationHub`] (and with it
//! the listener list), the [`AutomationEngine`], the room map, and the
//! [`Scheduler`] used by the decorators it builds.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use std::time::Duration;

use homesim_domain::automation::AutomationStrategy;
use homesim_domain::device::DeviceType;
use homesim_domain::error::HomeError;
use homesim_domain::id::ListenerId;

use crate::automation_engine::AutomationEngine;
use crate::decorator::{MINUTE, MOTION_QUIET_PERIOD, MotionSensing, TimedShutoff};
use crate::device::{Device, SmartDevice};
use crate::event_bus::NotificationHub;
use crate::ports::{EventListener, Scheduler};
use crate::room::Room;

/// Real-time lengths used by the decorators the controller builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// How long one countdown minute lasts.
    pub minute: Duration,
    /// How long the motion flag stays raised.
    pub motion_quiet_period: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            minute: MINUTE,
            motion_quiet_period: MOTION_QUIET_PERIOD,
        }
    }
}

/// Owner of every room, device, mode and listener in a simulated home.
pub struct HomeController {
    hub: Arc<NotificationHub>,
    scheduler: Arc<dyn Scheduler>,
    timing: Timing,
    rooms: HashMap<String, Room>,
    engine: AutomationEngine,
}

impl HomeController {
    #[must_use]
    pub fn new(scheduler: Arc<dyn Scheduler>) -> Self {
        let hub = Arc::new(NotificationHub::new());
        Self {
            engine: AutomationEngine::new(Arc::clone(&hub)),
            hub,
            scheduler,
            timing: Timing::default(),
            rooms: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// The hub every device of this home reports to.
    #[must_use]
    pub fn hub(&self) -> &Arc<NotificationHub> {
        &self.hub
    }

    pub fn add_listener(&self, listener: Arc<dyn EventListener>) -> ListenerId {
        self.hub.add_listener(listener)
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.hub.remove_listener(id)
    }

    /// Create an empty room, replacing any room with the same name.
    pub fn add_room(&mut self, name: impl Into<String>) -> &mut Room {
        let name = name.into();
        tracing::info!(room = %name, "room added");
        self.hub.notify(format!("Room added: {name}"));
        let room = Room::new(name.clone());
        match self.rooms.entry(name) {
            Entry::Occupied(mut entry) => {
                entry.insert(room);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(room),
        }
    }

    #[must_use]
    pub fn get_room(&self, name: &str) -> Option<&Room> {
        self.rooms.get(name)
    }

    pub fn get_room_mut(&mut self, name: &str) -> Option<&mut Room> {
        self.rooms.get_mut(name)
    }

    /// All rooms, in no particular order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    /// Look a device up by room and device name.
    #[must_use]
    pub fn find_device(&self, room: &str, device: &str) -> Option<Arc<dyn SmartDevice>> {
        self.rooms.get(room)?.get_device(device)
    }

    /// Build a device and place it in `room_name`, creating the room first
    /// if needed.
    pub fn create_device(
        &mut self,
        room_name: &str,
        device_type: DeviceType,
        name: &str,
    ) -> Arc<Device> {
        if !self.rooms.contains_key(room_name) {
            self.add_room(room_name);
        }
        let device = Arc::new(Device::new(
            device_type,
            name,
            room_name,
            Arc::clone(&self.hub),
        ));
        self.rooms
            .entry(room_name.to_string())
            .or_insert_with(|| Room::new(room_name))
            .add_device(device.clone());
        tracing::info!(room = room_name, device = name, %device_type, "device created");
        self.hub.notify(format!(
            "Device created: {name} ({device_type}) in {room_name}"
        ));
        device
    }

    /// Like [`create_device`](Self::create_device), with the type given as a
    /// textual tag such as `"LIGHT"` or `"security-camera"`.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::UnknownDeviceType`] when the tag is not
    /// recognized; nothing is created in that case.
    pub fn create_device_from_tag(
        &mut self,
        room_name: &str,
        tag: &str,
        name: &str,
    ) -> Result<Arc<Device>, HomeError> {
        let device_type: DeviceType = tag.parse()?;
        Ok(self.create_device(room_name, device_type, name))
    }

    /// Wrap `device` in a motion sensor wired to this home.
    #[must_use]
    pub fn motion_sensing<D: SmartDevice + ?Sized>(&self, device: Arc<D>) -> MotionSensing<D> {
        MotionSensing::new(device, Arc::clone(&self.hub), Arc::clone(&self.scheduler))
            .with_quiet_period(self.timing.motion_quiet_period)
    }

    /// Wrap `device` in a shutoff timer wired to this home.
    #[must_use]
    pub fn timed_shutoff<D: SmartDevice + ?Sized + 'static>(
        &self,
        device: Arc<D>,
    ) -> TimedShutoff<D> {
        TimedShutoff::new(device, Arc::clone(&self.hub), Arc::clone(&self.scheduler))
            .with_minute_length(self.timing.minute)
    }

    pub fn register_mode(
        &mut self,
        key: impl Into<String>,
        strategy: Arc<dyn AutomationStrategy>,
    ) {
        self.engine.register_mode(key, strategy);
    }

    /// Select a registered mode; unknown keys are ignored.
    pub fn set_mode(&mut self, key: &str) -> bool {
        self.engine.set_mode(key)
    }

    #[must_use]
    pub fn current_mode(&self) -> Option<&dyn AutomationStrategy> {
        self.engine.current_mode()
    }

    #[must_use]
    pub fn mode_keys(&self) -> Vec<&str> {
        self.engine.mode_keys()
    }

    /// Run the current mode over every room.
    ///
    /// # Errors
    ///
    /// Propagates [`HomeError::UnsupportedCommand`] from
    /// [`AutomationEngine::execute`].
    pub fn execute_current_mode(&self) -> Result<Option<&str>, HomeError> {
        self.engine.execute(self.rooms.values())
    }
}

impl std::fmt::Debug for HomeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomeController")
            .field("rooms", &self.rooms)
            .field("engine", &self.engine)
            .field("timing", &self.timing)
            .finish_non_exhaustive()
    }
}
