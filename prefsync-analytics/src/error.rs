//! Error types for analytics clients.

use thiserror::Error;

/// Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Errors that can occur while forwarding user properties.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// A property failed client-side validation.
    #[error("invalid property: {0}")]
    InvalidProperty(String),

    /// The client refused the update.
    #[error("update rejected: {0}")]
    Rejected(String),

    /// The delivery queue is at capacity.
    #[error("delivery queue is full")]
    QueueFull,

    /// The delivery task has stopped.
    #[error("channel closed")]
    ChannelClosed,
}
