//! Error types for the v1 transport.
//!
//! Every failure in this crate is a [`TransportError`]. There is no internal
//! recovery: errors are surfaced to the caller as-is, never retried.

use thiserror::Error;

/// The single error type of the v1 transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// A v1 API call failed, either before a response was obtained
    /// (connection failure, timeout, protocol error) or with a non-success
    /// HTTP status on a completed response.
    ///
    /// `status_code` is `None` when the failure happened before any HTTP
    /// response existed. `content` carries the raw response body, or the
    /// literal `b"No content"` when there was none.
    #[error("v1 api request failed: {message}")]
    Request {
        message: String,
        status_code: Option<u16>,
        content: Vec<u8>,
    },

    /// The caller violated the v1 dispatch contract. A programming error,
    /// not a runtime condition; must never be treated as transient.
    #[error("invalid use of the v1 transport: {0}")]
    Usage(String),

    /// Credential or header material that cannot be encoded into a request.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl TransportError {
    /// Status code of a failed request, if one was obtained.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Request { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Raw response content of a failed request, lossily decoded for display.
    pub fn content_text(&self) -> Option<String> {
        match self {
            Self::Request { content, .. } => {
                Some(String::from_utf8_lossy(content).into_owned())
            }
            _ => None,
        }
    }
}
