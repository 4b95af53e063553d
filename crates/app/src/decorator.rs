//! Decorators: behaviour layered on top of a device without changing its
//! surface.
//!
//! Each decorator holds the value one level down (a
//! [`Device`](crate::device::Device) or another decorator) behind an `Arc`,
//! forwards every [`SmartDevice`](crate::device::SmartDevice) operation to
//! it, and never caches its state: `is_on` and `kind` always
//! query through. Decorators are generic over what they wrap, so
//! [`inner`](MotionSensing::inner) gives typed access one level down, e.g.
//! `timed.inner().detect_motion()` on a `TimedShutoff<MotionSensing<Device>>`.
//!
//! A pending timer keeps running after its decorator is dropped.

mod motion;
mod timer;

pub use motion::{MOTION_QUIET_PERIOD, MotionSensing};
pub use timer::{MINUTE, TimedShutoff};
