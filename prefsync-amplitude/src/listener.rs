//! Preference listener that mirrors tagged keys into user properties.

use crate::config::{AmplitudeSyncConfig, DEFAULT_SYNC_TAG};
use prefsync_analytics::{AnalyticsClient, UserProperties};
use prefsync_prefs::{EventListener, KeyDescriptor, ValueType};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Forwards writes and removals of tagged preference keys to an
/// [`AnalyticsClient`].
///
/// Stateless: every notification is translated independently into at most
/// one single-entry [`UserProperties`] update.
pub struct AmplitudeSyncListener {
    client: Arc<dyn AnalyticsClient>,
    tag: String,
}

impl AmplitudeSyncListener {
    /// Creates a listener watching [`DEFAULT_SYNC_TAG`].
    pub fn new(client: Arc<dyn AnalyticsClient>) -> Self {
        Self::with_tag(client, DEFAULT_SYNC_TAG)
    }

    /// Creates a listener watching `tag`.
    pub fn with_tag(client: Arc<dyn AnalyticsClient>, tag: impl Into<String>) -> Self {
        Self {
            client,
            tag: tag.into(),
        }
    }

    pub fn from_config(client: Arc<dyn AnalyticsClient>, config: &AmplitudeSyncConfig) -> Self {
        Self::with_tag(client, config.tag.clone())
    }

    /// Returns the tag this listener watches.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    // A failed update must never fail the preference mutation that caused it.
    fn forward(&self, properties: UserProperties) {
        let _ = self.client.set_user_properties(properties);
    }
}

impl EventListener for AmplitudeSyncListener {
    fn on_put(&self, key: &KeyDescriptor, value: &Value) {
        if !key.has_tag(&self.tag) {
            return;
        }
        self.forward(UserProperties::single(key.name(), value.clone()));
    }

    fn on_remove(&self, key: &KeyDescriptor) {
        if !key.has_tag(&self.tag) {
            return;
        }
        // Only booleans have a natural "cleared" value; other properties keep
        // their last synced value.
        if key.value_type() == ValueType::Bool {
            self.forward(UserProperties::single(key.name(), false));
        }
    }
}

impl fmt::Debug for AmplitudeSyncListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AmplitudeSyncListener")
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}
