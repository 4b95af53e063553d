//! Event: one human-readable notification describing a state change.
//!
//! The message is free text meant for display sinks; nothing in the core
//! parses it back.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::EventId;

/// UTC timestamp attached to every event.
pub type Timestamp = DateTime<Utc>;

/// An immutable notification published through the hub.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub message: String,
    pub timestamp: Timestamp,
}

impl Event {
    /// Create an event stamped with the current time.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            id: EventId::new(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
