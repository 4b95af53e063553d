//! Device: the on/off state machine shared by every simulated device.
//!
//! A device is either on or off and carries one set of type-specific
//! attributes, modelled as the closed [`DeviceKind`] sum type. All mutations
//! are expressed as a [`Command`]; applying one yields the [`Change`] it
//! caused, or `None` when the device was already in the requested state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HomeError, UnknownDeviceType};

/// Brightness a new light starts with.
pub const DEFAULT_BRIGHTNESS: u8 = 100;
/// Upper bound accepted by [`Command::SetBrightness`].
pub const MAX_BRIGHTNESS: u8 = 100;
/// Temperature a new thermostat starts with, in degrees Celsius.
pub const DEFAULT_TEMPERATURE: f32 = 22.0;

/// Tag naming one of the supported device types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeviceType {
    Light,
    Thermostat,
    Door,
    SecurityCamera,
}

impl DeviceType {
    /// Every supported tag, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Light,
        Self::Thermostat,
        Self::Door,
        Self::SecurityCamera,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Light => "LIGHT",
            Self::Thermostat => "THERMOSTAT",
            Self::Door => "DOOR",
            Self::SecurityCamera => "SECURITY_CAMERA",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceType {
    type Err = UnknownDeviceType;

    /// Parse a tag case-insensitively; `-`, `_` and spaces are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownDeviceType(s.to_string()))
    }
}

/// Type-specific attributes of a device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeviceKind {
    Light { brightness: u8 },
    Thermostat { temperature: f32 },
    Door { locked: bool },
    SecurityCamera { recording: bool },
}

impl DeviceKind {
    /// Attributes of a freshly installed device of the given type.
    #[must_use]
    pub fn initial(device_type: DeviceType) -> Self {
        match device_type {
            DeviceType::Light => Self::Light {
                brightness: DEFAULT_BRIGHTNESS,
            },
            DeviceType::Thermostat => Self::Thermostat {
                temperature: DEFAULT_TEMPERATURE,
            },
            DeviceType::Door => Self::Door { locked: true },
            DeviceType::SecurityCamera => Self::SecurityCamera { recording: false },
        }
    }

    #[must_use]
    pub fn device_type(&self) -> DeviceType {
        match self {
            Self::Light { .. } => DeviceType::Light,
            Self::Thermostat { .. } => DeviceType::Thermostat,
            Self::Door { .. } => DeviceType::Door,
            Self::SecurityCamera { .. } => DeviceType::SecurityCamera,
        }
    }

    /// Brightness in percent, for lights.
    #[must_use]
    pub fn brightness(&self) -> Option<u8> {
        match *self {
            Self::Light { brightness } => Some(brightness),
            _ => None,
        }
    }

    /// Target temperature in degrees Celsius, for thermostats.
    #[must_use]
    pub fn temperature(&self) -> Option<f32> {
        match *self {
            Self::Thermostat { temperature } => Some(temperature),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_locked(&self) -> Option<bool> {
        match *self {
            Self::Door { locked } => Some(locked),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_recording(&self) -> Option<bool> {
        match *self {
            Self::SecurityCamera { recording } => Some(recording),
            _ => None,
        }
    }
}

/// A request to mutate a device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "value", rename_all = "snake_case")]
pub enum Command {
    TurnOn,
    TurnOff,
    /// Percent; levels outside `0..=100` are ignored.
    SetBrightness(i32),
    SetTemperature(f32),
    Lock,
    Unlock,
    StartRecording,
    StopRecording,
}

/// One observable state change, rendered as the tail of a notification
/// (`"<description> <change>"`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Change {
    TurnedOn,
    TurnedOff,
    BrightnessChanged { from: u8, to: u8 },
    TemperatureChanged { from: f32, to: f32 },
    Locked,
    Unlocked,
    RecordingStarted,
    RecordingStopped,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TurnedOn => f.write_str("turned ON"),
            Self::TurnedOff => f.write_str("turned OFF"),
            Self::BrightnessChanged { from, to } => {
                write!(f, "brightness changed from {from}% to {to}%")
            }
            Self::TemperatureChanged { from, to } => {
                write!(
                    f,
                    "temperature changed from {from:?}\u{b0}C to {to:?}\u{b0}C"
                )
            }
            Self::Locked => f.write_str("locked"),
            Self::Unlocked => f.write_str("unlocked"),
            Self::RecordingStarted => f.write_str("started recording"),
            Self::RecordingStopped => f.write_str("stopped recording"),
        }
    }
}

/// Mutable state of a single device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceState {
    pub is_on: bool,
    pub kind: DeviceKind,
}

impl DeviceState {
    /// A powered-off device with default attributes.
    #[must_use]
    pub fn new(device_type: DeviceType) -> Self {
        Self {
            is_on: false,
            kind: DeviceKind::initial(device_type),
        }
    }

    /// Switch the device on or off. Returns `None` when it already was.
    pub fn set_power(&mut self, on: bool) -> Option<Change> {
        if self.is_on == on {
            return None;
        }
        self.is_on = on;
        Some(if on { Change::TurnedOn } else { Change::TurnedOff })
    }

    /// Apply `command`, returning the change it produced.
    ///
    /// `Ok(None)` means nothing observable happened: the device was already
    /// in the requested state, or the brightness was outside `0..=100`.
    /// Brightness and temperature updates always report a change, even when
    /// the value is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`HomeError::UnsupportedCommand`] when the command targets an
    /// attribute this kind of device does not have.
    pub fn apply(&mut self, command: Command) -> Result<Option<Change>, HomeError> {
        match command {
            Command::TurnOn => return Ok(self.set_power(true)),
            Command::TurnOff => return Ok(self.set_power(false)),
            _ => {}
        }
        let change = match (command, &mut self.kind) {
            (Command::SetBrightness(level), DeviceKind::Light { brightness }) => {
                u8::try_from(level)
                    .ok()
                    .filter(|level| *level <= MAX_BRIGHTNESS)
                    .map(|level| {
                        let from = std::mem::replace(brightness, level);
                        Change::BrightnessChanged { from, to: level }
                    })
            }
            (Command::SetTemperature(value), DeviceKind::Thermostat { temperature }) => {
                let from = std::mem::replace(temperature, value);
                Some(Change::TemperatureChanged { from, to: value })
            }
            (Command::Lock, DeviceKind::Door { locked }) => flip(locked, true, Change::Locked),
            (Command::Unlock, DeviceKind::Door { locked }) => flip(locked, false, Change::Unlocked),
            (Command::StartRecording, DeviceKind::SecurityCamera { recording }) => {
                flip(recording, true, Change::RecordingStarted)
            }
            (Command::StopRecording, DeviceKind::SecurityCamera { recording }) => {
                flip(recording, false, Change::RecordingStopped)
            }
            (command, kind) => {
                return Err(HomeError::UnsupportedCommand {
                    device_type: kind.device_type(),
                    command,
                });
            }
        };
        Ok(change)
    }
}

fn flip(flag: &mut bool, target: bool, change: Change) -> Option<Change> {
    (*flag != target).then(|| {
        *flag = target;
        change
    })
}
