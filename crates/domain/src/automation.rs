//! Automation: named bulk policies applied to every device in the home.
//!
//! A strategy is stateless: for each device it is shown, it returns the
//! commands that bring that device in line with the mode. It never holds
//! device references and never assumes an iteration order, so running the
//! same strategy twice converges on the same state.

use crate::device::{Command, DeviceKind};

/// A named automation policy.
pub trait AutomationStrategy: Send + Sync {
    /// Human-readable name used in notifications (e.g. `"Night Mode"`).
    fn name(&self) -> &str;

    /// Commands to apply to one device, given its name and current attributes.
    fn plan(&self, device_name: &str, kind: &DeviceKind) -> Vec<Command>;
}

/// Target temperatures per mode, in degrees Celsius.
pub const NIGHT_TEMPERATURE: f32 = 19.0;
pub const MORNING_TEMPERATURE: f32 = 22.0;
pub const VACATION_TEMPERATURE: f32 = 17.0;
/// Brightness lights are set to in the morning.
pub const MORNING_BRIGHTNESS: i32 = 50;

/// Lights off, thermostats lowered, every door locked.
#[derive(Debug, Default, Clone, Copy)]
pub struct NightMode;

impl AutomationStrategy for NightMode {
    fn name(&self) -> &str {
        "Night Mode"
    }

    fn plan(&self, _device_name: &str, kind: &DeviceKind) -> Vec<Command> {
        match kind {
            DeviceKind::Light { .. } => vec![Command::TurnOff],
            DeviceKind::Thermostat { .. } => vec![Command::SetTemperature(NIGHT_TEMPERATURE)],
            DeviceKind::Door { .. } => vec![Command::Lock],
            DeviceKind::SecurityCamera { .. } => Vec::new(),
        }
    }
}

/// Dimmed lights, comfortable temperature, front doors unlocked.
#[derive(Debug, Default, Clone, Copy)]
pub struct MorningMode;

impl AutomationStrategy for MorningMode {
    fn name(&self) -> &str {
        "Morning Mode"
    }

    fn plan(&self, device_name: &str, kind: &DeviceKind) -> Vec<Command> {
        match kind {
            DeviceKind::Light { .. } => {
                vec![Command::TurnOn, Command::SetBrightness(MORNING_BRIGHTNESS)]
            }
            DeviceKind::Thermostat { .. } => vec![Command::SetTemperature(MORNING_TEMPERATURE)],
            DeviceKind::Door { .. } if is_front_door(device_name) => vec![Command::Unlock],
            DeviceKind::Door { .. } | DeviceKind::SecurityCamera { .. } => Vec::new(),
        }
    }
}

/// Energy-saving temperature and every door locked; lights are left alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct VacationMode;

impl AutomationStrategy for VacationMode {
    fn name(&self) -> &str {
        "Vacation Mode"
    }

    fn plan(&self, _device_name: &str, kind: &DeviceKind) -> Vec<Command> {
        match kind {
            DeviceKind::Thermostat { .. } => vec![Command::SetTemperature(VACATION_TEMPERATURE)],
            DeviceKind::Door { .. } => vec![Command::Lock],
            DeviceKind::Light { .. } | DeviceKind::SecurityCamera { .. } => Vec::new(),
        }
    }
}

fn is_front_door(name: &str) -> bool {
    name.to_lowercase().contains("front")
}
