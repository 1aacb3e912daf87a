use crate::error::AnalyticsResult;
use crate::properties::UserProperties;
use std::sync::Arc;

/// A client that merges user properties into a remote analytics profile.
///
/// Calls are fire-and-forget from the caller's point of view: a returned
/// `Ok` means the client accepted the update, not that it was delivered.
/// Implementations must be safe to call concurrently.
pub trait AnalyticsClient: Send + Sync {
    /// Merges `properties` into the current user's profile. Names already
    /// present on the profile are overwritten; other names are untouched.
    fn set_user_properties(&self, properties: UserProperties) -> AnalyticsResult<()>;
}

impl<C: AnalyticsClient + ?Sized> AnalyticsClient for Arc<C> {
    fn set_user_properties(&self, properties: UserProperties) -> AnalyticsResult<()> {
        (**self).set_user_properties(properties)
    }
}
