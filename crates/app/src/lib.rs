//! # homesim-app
//!
//! Application layer: live devices and the machinery that reacts to them.
//!
//! ## Responsibilities
//! - Define **port traits** at the seams to the outside world:
//!   - `EventListener`: receives every notification published by the hub
//!   - `Scheduler`: runs a one-shot action after a delay, cancellable
//! - Provide **in-process infrastructure** that doesn't need IO:
//!   - `NotificationHub`: synchronous fan-out of events to listeners
//!   - `TokioScheduler` / `TimerSlot`: timers backed by tokio tasks
//! - Provide the **device graph**: the `SmartDevice` capability, the base
//!   `Device`, the `MotionSensing` and `TimedShutoff` decorators, `Room`
//! - Orchestrate automation modes through the `AutomationEngine` and the
//!   `HomeController` registry
//!
//! ## Dependency rule
//! Depends on `homesim-domain` only (plus `tokio` for timers).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod automation_engine;
pub mod controller;
pub mod decorator;
pub mod device;
pub mod event_bus;
pub mod ports;
pub mod room;
pub mod scheduler;

#[cfg(test)]
pub(crate) mod test_support;
