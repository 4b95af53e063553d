//! # homesim-domain
//!
//! Pure domain model for the homesim home automation simulator.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, events
//! - Define the **device state machine** (on/off plus type-specific attributes)
//!   and the typed [`Command`](device::Command) / [`Change`](device::Change)
//!   vocabulary used to drive and report it
//! - Define **automation strategies** (night, morning, vacation) as pure
//!   per-device-kind policies
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or a runtime.
//! Notification fan-out and timers live in the `app` crate.

pub mod error;
pub mod id;

pub mod automation;
pub mod device;
pub mod event;
