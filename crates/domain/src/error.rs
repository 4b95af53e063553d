//! Common error types used across the workspace.
//!
//! Only genuine failures are errors. Out-of-policy requests (brightness out of
//! range, unknown mode name) and no-ops are modelled as successful calls that
//! leave state untouched.

use crate::device::{Command, DeviceType};

/// Top-level error for the homesim core.
#[derive(Debug, thiserror::Error)]
pub enum HomeError {
    /// A device type tag did not name any known device type.
    #[error("unknown device type: {0}")]
    UnknownDeviceType(#[from] UnknownDeviceType),

    /// The command does not apply to this kind of device.
    #[error("command {command:?} is not supported by {device_type} devices")]
    UnsupportedCommand {
        device_type: DeviceType,
        command: Command,
    },

    /// Timers were requested outside of an async runtime.
    #[error("no timer runtime available")]
    SchedulerUnavailable(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Raised when parsing a device type tag that is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0:?}")]
pub struct UnknownDeviceType(pub String);
