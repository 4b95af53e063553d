//! # homesim-adapter-console
//!
//! Listener adapters that subscribe to the notification hub and present
//! events to a human.
//!
//! | Sink | Output |
//! |------|--------|
//! | [`ConsoleDisplay`] | `[DISPLAY] <message>` lines on any writer (stdout by default) |
//! | [`EventLog`] | in-memory `YYYY-MM-DD HH:MM:SS - <message>` entries, in local time, optionally echoed as `[LOG] <entry>` |
//! | [`TracingSink`] | one `tracing` event per notification |
//!
//! ## Dependency rule
//!
//! Depends on `homesim-app` (the `EventListener` port) and `homesim-domain` only.

mod display;
mod log;
mod tracing_sink;

#[cfg(test)]
mod test_support;

pub use display::ConsoleDisplay;
pub use log::EventLog;
pub use tracing_sink::TracingSink;
