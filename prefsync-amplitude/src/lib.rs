//! Amplitude user-property sync for prefsync preferences.
//!
//! Register an [`AmplitudeSyncListener`] with a [`Prefs`](prefsync_prefs::Prefs)
//! store and every key tagged with the sync tag is mirrored into the
//! analytics profile as a user property of the same name:
//!
//! - writing a tagged key sets the property to the written value
//! - removing a tagged `bool` key sets the property to `false`
//! - removing a tagged key of any other type leaves the property as it was
//!
//! Forwarding failures are dropped; they never fail the preference write.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use prefsync_amplitude::{amplitude_synced, AmplitudeSyncListener};
//! use prefsync_analytics::InMemoryProfile;
//! use prefsync_prefs::Prefs;
//!
//! let profile = Arc::new(InMemoryProfile::new());
//! let prefs = Prefs::in_memory();
//! prefs.add_listener(Arc::new(AmplitudeSyncListener::new(profile.clone())));
//!
//! let notifications = amplitude_synced::<bool>("notifications");
//! prefs.put(&notifications, &true).unwrap();
//! assert_eq!(profile.get("notifications"), Some(serde_json::json!(true)));
//!
//! prefs.remove(&notifications).unwrap();
//! assert_eq!(profile.get("notifications"), Some(serde_json::json!(false)));
//! ```

mod config;
mod keys;
mod listener;

pub use config::{AmplitudeSyncConfig, DEFAULT_SYNC_TAG};
pub use keys::{amplitude_synced, amplitude_synced_with_tag};
pub use listener::AmplitudeSyncListener;
