//! Network-related error types.

use std::error::Error as StdError;
use thiserror::Error;

/// Transport failures, kept free of `reqwest` types in the public API.
///
/// `Timeout` and `ConnectionFailed` are reported as retryable by
/// [`Error::is_retryable`](crate::error::Error::is_retryable).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum NetworkError {
    /// Request failed with HTTP status code.
    #[error("Request failed with status {status}: {message}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },

    /// Request timed out.
    #[error("Request timeout")]
    Timeout,

    /// Connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Opaque transport error for underlying issues.
    #[error("Transport error")]
    Transport(#[source] Box<dyn StdError + Send + Sync + 'static>),
}
