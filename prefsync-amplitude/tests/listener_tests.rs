//! Tests for AmplitudeSyncListener driven directly through EventListener.

use pretty_assertions::assert_eq;
use prefsync_amplitude::{
    amplitude_synced, amplitude_synced_with_tag, AmplitudeSyncConfig, AmplitudeSyncListener,
    DEFAULT_SYNC_TAG,
};
use prefsync_analytics::{
    AnalyticsClient, AnalyticsError, AnalyticsResult, InMemoryProfile, UserProperties,
};
use prefsync_prefs::{EventListener, KeyDescriptor, ValueType};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const TAG: &str = "amplitudeSynced";

fn listener_with_profile() -> (AmplitudeSyncListener, Arc<InMemoryProfile>) {
    let profile = Arc::new(InMemoryProfile::new());
    let listener = AmplitudeSyncListener::with_tag(profile.clone(), TAG);
    (listener, profile)
}

fn tagged(name: &str, value_type: ValueType) -> KeyDescriptor {
    KeyDescriptor::new(name, value_type).with_tag(TAG)
}

#[derive(Default)]
struct FailingClient {
    calls: AtomicUsize,
}

impl AnalyticsClient for FailingClient {
    fn set_user_properties(&self, _properties: UserProperties) -> AnalyticsResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AnalyticsError::Rejected("no session".into()))
    }
}

// ── Construction and configuration ──────────────────────────────

#[test]
fn default_tag_is_amplitude() {
    let listener = AmplitudeSyncListener::new(Arc::new(InMemoryProfile::new()));
    assert_eq!(listener.tag(), "amplitude");
    assert_eq!(DEFAULT_SYNC_TAG, "amplitude");
}

#[test]
fn config_default_uses_default_tag() {
    assert_eq!(AmplitudeSyncConfig::default().tag, DEFAULT_SYNC_TAG);
}

#[test]
fn config_deserializes_with_missing_fields() {
    let config: AmplitudeSyncConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, AmplitudeSyncConfig::default());

    let config: AmplitudeSyncConfig = serde_json::from_str(r#"{"tag":"analytics"}"#).unwrap();
    let listener = AmplitudeSyncListener::from_config(Arc::new(InMemoryProfile::new()), &config);
    assert_eq!(listener.tag(), "analytics");
}

#[test]
fn debug_shows_tag() {
    let (listener, _) = listener_with_profile();
    assert!(format!("{listener:?}").contains(TAG));
}

#[test]
fn synced_key_helpers_apply_tags() {
    let key = amplitude_synced::<String>("sync");
    assert!(key.has_tag(DEFAULT_SYNC_TAG));

    let custom = amplitude_synced_with_tag::<bool>("bool", TAG);
    assert!(custom.has_tag(TAG));
    assert!(!custom.has_tag(DEFAULT_SYNC_TAG));
    assert_eq!(custom.descriptor().value_type(), ValueType::Bool);
}

// ── on_put ──────────────────────────────────────────────────────

#[test]
fn put_on_tagged_key_forwards_single_entry() {
    let (listener, profile) = listener_with_profile();
    listener.on_put(&tagged("sync", ValueType::Text), &json!("test"));

    assert_eq!(profile.updates(), vec![UserProperties::single("sync", "test")]);
}

#[test]
fn put_on_untagged_key_is_ignored() {
    let (listener, profile) = listener_with_profile();
    listener.on_put(&KeyDescriptor::new("nosync", ValueType::Text), &json!("test"));

    assert_eq!(profile.update_count(), 0);
    assert!(!profile.has("nosync"));
}

#[test]
fn put_with_other_tags_only_is_ignored() {
    let (listener, profile) = listener_with_profile();
    let key = KeyDescriptor::new("other", ValueType::Text)
        .with_tag("amplitude")
        .with_tag("backup");
    listener.on_put(&key, &json!("x"));
    assert_eq!(profile.update_count(), 0);
}

#[test]
fn put_forwards_value_unchanged() {
    let (listener, profile) = listener_with_profile();
    listener.on_put(&tagged("key2", ValueType::Integer), &json!(4));
    listener.on_put(&tagged("ratio", ValueType::Float), &json!(0.25));
    listener.on_put(
        &tagged("bag", ValueType::Object),
        &json!({"apples": 2, "oranges": 3}),
    );

    assert_eq!(profile.get("key2"), Some(json!(4)));
    assert!(profile.get("key2").unwrap().is_u64());
    assert_eq!(profile.get("ratio"), Some(json!(0.25)));
    assert_eq!(profile.get("bag"), Some(json!({"apples": 2, "oranges": 3})));
}

#[test]
fn repeated_puts_are_not_coalesced() {
    let (listener, profile) = listener_with_profile();
    let key = tagged("count", ValueType::Integer);
    listener.on_put(&key, &json!(1));
    listener.on_put(&key, &json!(1));
    listener.on_put(&key, &json!(2));

    assert_eq!(profile.update_count(), 3);
    assert!(profile.updates().iter().all(|u| u.len() == 1));
}

// ── on_remove ───────────────────────────────────────────────────

#[test]
fn remove_on_tagged_bool_forwards_false() {
    let (listener, profile) = listener_with_profile();
    listener.on_remove(&tagged("bool", ValueType::Bool));

    assert_eq!(profile.updates(), vec![UserProperties::single("bool", false)]);
}

#[test]
fn remove_on_tagged_non_bool_is_ignored() {
    let (listener, profile) = listener_with_profile();
    for value_type in [
        ValueType::Integer,
        ValueType::Float,
        ValueType::Text,
        ValueType::Sequence,
        ValueType::Object,
    ] {
        listener.on_remove(&tagged("key", value_type));
    }
    assert_eq!(profile.update_count(), 0);
}

#[test]
fn remove_on_untagged_bool_is_ignored() {
    let (listener, profile) = listener_with_profile();
    listener.on_remove(&KeyDescriptor::new("bool", ValueType::Bool));
    assert_eq!(profile.update_count(), 0);
}

// ── Failure isolation ───────────────────────────────────────────

#[test]
fn client_errors_are_swallowed() {
    let client = Arc::new(FailingClient::default());
    let listener = AmplitudeSyncListener::with_tag(client.clone(), TAG);

    listener.on_put(&tagged("sync", ValueType::Text), &json!("test"));
    listener.on_remove(&tagged("bool", ValueType::Bool));

    assert_eq!(client.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn client_validation_failure_is_swallowed() {
    let (listener, profile) = listener_with_profile();
    listener.on_put(&tagged("", ValueType::Text), &json!("empty name"));
    assert_eq!(profile.update_count(), 0);
}
