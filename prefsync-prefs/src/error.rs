//! Error types for the preference store.

use thiserror::Error;

/// Result type for preference operations.
pub type PrefsResult<T> = Result<T, PrefsError>;

/// Errors that can occur in preference operations.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific storage failure.
    #[error("storage error: {0}")]
    Storage(String),
}
