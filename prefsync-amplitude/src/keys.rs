use crate::config::DEFAULT_SYNC_TAG;
use prefsync_prefs::{PrefValue, PrefsKey};

/// Declares a key that a default-configured listener keeps in sync with
/// the Amplitude user property of the same name.
pub fn amplitude_synced<T: PrefValue>(name: impl Into<String>) -> PrefsKey<T> {
    PrefsKey::new(name).with_tag(DEFAULT_SYNC_TAG)
}

/// Like [`amplitude_synced`], for listeners configured with a custom tag.
pub fn amplitude_synced_with_tag<T: PrefValue>(
    name: impl Into<String>,
    tag: impl Into<String>,
) -> PrefsKey<T> {
    PrefsKey::new(name).with_tag(tag)
}
