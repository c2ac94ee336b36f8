//! # API Errors
//!
//! Error types for API operations.

use thiserror::Error;

/// Shown when the node answers with something other than JSON, which
/// usually means the backend is misconfigured.
pub const INVALID_RESPONSE_MESSAGE: &str =
    "Server returned an invalid response. Check the guestbook backend configuration.";

/// Errors that can occur during API operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Network or HTTP error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response was not JSON.
    #[error("{}", INVALID_RESPONSE_MESSAGE)]
    InvalidResponse,

    /// Node returned an error response.
    #[error("{message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the node, or a per-operation fallback.
        message: String,
    },

    /// The JSON body did not have the expected shape.
    #[error("Server returned malformed data: {0}")]
    Decode(String),
}

impl ClientError {
    /// Returns true for errors caused by the node's configuration rather
    /// than by the request.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::InvalidResponse)
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ClientError>;
