//! Room: a named collection of devices.

use std::collections::HashMap;
use std::sync::Arc;

use crate::device::SmartDevice;

/// A room holding devices keyed by name.
///
/// A room may hold bare devices or decorated chains; re-adding a device under
/// an existing name replaces the previous entry.
pub struct Room {
    name: String,
    devices: HashMap<String, Arc<dyn SmartDevice>>,
}

impl Room {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            devices: HashMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a device, replacing any device with the same name.
    pub fn add_device(&mut self, device: Arc<dyn SmartDevice>) {
        self.devices.insert(device.name().to_string(), device);
    }

    #[must_use]
    pub fn get_device(&self, name: &str) -> Option<Arc<dyn SmartDevice>> {
        self.devices.get(name).cloned()
    }

    /// All devices, in no particular order.
    #[must_use]
    pub fn list_devices(&self) -> Vec<Arc<dyn SmartDevice>> {
        self.devices.values().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn turn_all_on(&self) {
        for device in self.devices.values() {
            device.turn_on();
        }
    }

    pub fn turn_all_off(&self) {
        for device in self.devices.values() {
            device.turn_off();
        }
    }
}

impl std::fmt::Debug for Room {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.devices.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("Room")
            .field("name", &self.name)
            .field("devices", &names)
            .finish()
    }
}
