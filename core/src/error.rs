//! Error types for the endpoint client.
//!
//! # Design
//! Every failure this crate surfaces is exactly one of the three
//! `NetworkError` kinds: the transport could not complete the round-trip,
//! the body could not be decoded into the requested type, or the server
//! answered with a non-2xx status and a (best-effort) extracted message.
//! Nothing is recovered or retried locally; callers see the first failure
//! unchanged.

use serde::Deserialize;
use thiserror::Error;

/// Boxed error used at the transport and decoder seams.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error payload the API returns alongside non-2xx statuses.
///
/// Decoded from `{"message": "..."}` bodies, or carried verbatim when the
/// failure body is `text/plain`. [`ApiError::unknown`] is the fallback when
/// the body yields no message at all.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiError {
    pub message: String,
}

impl ApiError {
    pub fn unknown() -> Self {
        Self {
            message: "Unknown".to_string(),
        }
    }
}

/// Errors surfaced by request building, execution, and decoding.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The URL was malformed or the transport failed at the I/O level.
    #[error("network failure: {0}")]
    Network(String),

    /// The response body could not be decoded into the requested type for
    /// its declared content type.
    #[error("decoding failure: {0}")]
    Decoding(String),

    /// The server answered with a non-2xx status.
    #[error("API error: {}", .0.message)]
    Api(ApiError),
}
