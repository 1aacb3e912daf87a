//! In-memory user profile.

use crate::client::AnalyticsClient;
use crate::error::{AnalyticsError, AnalyticsResult};
use crate::properties::UserProperties;
use serde_json::{Map, Value};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct ProfileState {
    properties: Map<String, Value>,
    updates: Vec<UserProperties>,
}

/// A client that merges updates into a local profile.
///
/// Besides the merged profile it keeps every accepted update in arrival
/// order, which is what tests usually want to assert on.
#[derive(Debug, Default)]
pub struct InMemoryProfile {
    state: Mutex<ProfileState>,
}

impl InMemoryProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current value of a property.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.state().properties.get(name).cloned()
    }

    /// Returns true if the profile has a value for `name`.
    pub fn has(&self, name: &str) -> bool {
        self.state().properties.contains_key(name)
    }

    /// Returns a snapshot of the merged profile.
    pub fn properties(&self) -> UserProperties {
        UserProperties::from(self.state().properties.clone())
    }

    /// Returns every accepted update, oldest first.
    pub fn updates(&self) -> Vec<UserProperties> {
        self.state().updates.clone()
    }

    /// Returns the number of accepted updates.
    pub fn update_count(&self) -> usize {
        self.state().updates.len()
    }

    /// Drops the profile and the update log.
    pub fn clear(&self) {
        let mut state = self.state();
        state.properties.clear();
        state.updates.clear();
    }

    fn state(&self) -> MutexGuard<'_, ProfileState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AnalyticsClient for InMemoryProfile {
    fn set_user_properties(&self, properties: UserProperties) -> AnalyticsResult<()> {
        if properties.names().any(|name| name.trim().is_empty()) {
            return Err(AnalyticsError::InvalidProperty(
                "property name must not be empty".to_string(),
            ));
        }

        let mut state = self.state();
        for (name, value) in properties.iter() {
            state.properties.insert(name.clone(), value.clone());
        }
        state.updates.push(properties);
        Ok(())
    }
}
