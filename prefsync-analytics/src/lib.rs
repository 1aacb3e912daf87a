//! Analytics user-property clients for prefsync.
//!
//! The analytics service is modeled as a single operation: merge a flat
//! map of property names to JSON values into the current user's remote
//! profile ([`AnalyticsClient::set_user_properties`]).
//!
//! ## Components
//!
//! - [`UserProperties`]: the property bag handed to a client
//! - [`InMemoryProfile`]: a client that merges into a local profile
//! - [`LoggingClient`]: decorator that traces every forwarded update
//! - [`QueuedClient`]: decorator that moves delivery onto a tokio task

mod client;
mod error;
mod logging;
mod profile;
mod properties;
mod queued;

pub use client::AnalyticsClient;
pub use error::{AnalyticsError, AnalyticsResult};
pub use logging::LoggingClient;
pub use profile::InMemoryProfile;
pub use properties::UserProperties;
pub use queued::{QueuedClient, DEFAULT_QUEUE_CAPACITY};
