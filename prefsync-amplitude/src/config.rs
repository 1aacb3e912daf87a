use serde::{Deserialize, Serialize};

/// Tag that marks a preference key for Amplitude sync unless configured otherwise.
pub const DEFAULT_SYNC_TAG: &str = "amplitude";

/// Configuration for [`AmplitudeSyncListener`](crate::AmplitudeSyncListener).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmplitudeSyncConfig {
    /// Keys carrying this tag are mirrored.
    pub tag: String,
}

impl Default for AmplitudeSyncConfig {
    fn default() -> Self {
        Self {
            tag: DEFAULT_SYNC_TAG.to_string(),
        }
    }
}
