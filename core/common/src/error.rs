//! Common error types for FileDock.

use thiserror::Error;

/// Top-level error type for FileDock operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Provider credentials or endpoint are missing.
    ///
    /// Raised before any network I/O is attempted.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The provider rejected an upload.
    #[error("Upload failed: {0}")]
    Upload(String),

    /// The provider could not list its objects.
    #[error("Listing failed: {0}")]
    List(String),

    /// The provider rejected a delete.
    #[error("Delete failed: {0}")]
    Delete(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Resource already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Transport-level failure talking to a provider.
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Result type alias using the common Error.
pub type Result<T> = std::result::Result<T, Error>;
