//! Storage error types.

use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// No entry with the given id exists.
    #[error("entry not found: {0}")]
    NotFound(String),

    /// The store rejected the operation and said why. The message is safe
    /// to show to callers.
    #[error("{0}")]
    Backend(String),

    /// Transport, decoding, or any other failure. Details are for logs only.
    #[error("unexpected storage failure: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unexpected(err.to_string())
    }
}
