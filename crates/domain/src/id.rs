//! Typed UUID handles.
//!
//! [`Id<T>`] tags a UUID with the kind of thing it names, so an event id can
//! never be passed where a listener handle is expected.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::event::Event;

/// Marker for subscriptions to the notification hub.
#[derive(Debug)]
pub enum Subscription {}

/// Unique identifier of an [`Event`].
pub type EventId = Id<Event>;

/// Handle returned when a listener subscribes to the notification hub.
pub type ListenerId = Id<Subscription>;

#[derive(Serialize, Deserialize)]
#[serde(transparent, bound = "")]
pub struct Id<T> {
    uuid: Uuid,
    #[serde(skip)]
    marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// A fresh random (v4) identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            marker: PhantomData,
        }
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.uuid
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Manual impls: derives would demand the same traits from the marker type.

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl<T> Eq for Id<T> {}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.uuid)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.uuid, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_generate_unique_ids_when_called_twice() {
        assert_ne!(ListenerId::new(), ListenerId::new());
    }

    #[test]
    fn should_serialize_as_bare_uuid_string() {
        let uuid = Uuid::new_v4();
        let id = EventId::from_uuid(uuid);

        let json = serde_json::to_string(&id).unwrap();

        assert_eq!(json, format!("\"{uuid}\""));
        let parsed: EventId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.as_uuid(), &uuid);
    }

    #[test]
    fn should_display_inner_uuid() {
        let uuid = Uuid::nil();
        assert_eq!(
            ListenerId::from_uuid(uuid).to_string(),
            "00000000-0000-0000-0000-000000000000"
        );
    }
}
