//! Observer interface for preference mutations.

use crate::key::KeyDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Receives a callback for every mutation applied through a [`Prefs`](crate::Prefs).
///
/// Callbacks run synchronously on the thread that performed the mutation,
/// after the mutation has been persisted. Implementations must not assume
/// anything about which thread that is. Mutations on one store are
/// delivered one at a time in the order they were applied; a callback may
/// read the store or (un)register listeners, but must not `put` or
/// `remove` on the store that notified it.
pub trait EventListener: Send + Sync {
    /// Called after `key` was written. `value` is the serialized form that
    /// was persisted.
    fn on_put(&self, key: &KeyDescriptor, value: &serde_json::Value);

    /// Called after `key` was removed, whether or not a value was stored.
    fn on_remove(&self, key: &KeyDescriptor);
}

/// Handle returned by [`Prefs::add_listener`](crate::Prefs::add_listener).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListenerId(Uuid);

impl ListenerId {
    /// Creates a new listener ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
