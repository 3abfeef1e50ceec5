//! Transport-level error types.
//!
//! A [`TransportError`] means no HTTP response was received at all. Non-2xx
//! responses are not transport errors; they become [`ApiError`]s.
//!
//! [`ApiError`]: crate::ApiError

use std::fmt;

use thiserror::Error;

/// Classification of a transport failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// The per-call timeout elapsed.
    Timeout,
    /// The connection could not be established.
    Connect,
    /// Any other failure while sending the request or reading the body.
    Other,
}

impl TransportErrorKind {
    /// Returns `true` for failures that are worth retrying.
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(self, Self::Timeout | Self::Connect)
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => f.write_str("timeout"),
            Self::Connect => f.write_str("connect"),
            Self::Other => f.write_str("other"),
        }
    }
}

/// Error returned when an HTTP request could not be completed.
///
/// # Example
///
/// ```rust
/// use airwallex_api::clients::{TransportError, TransportErrorKind};
///
/// let error = TransportError::new(TransportErrorKind::Timeout, "deadline elapsed");
/// assert!(error.is_transient());
/// assert_eq!(error.to_string(), "HTTP transport error (timeout): deadline elapsed");
/// ```
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("HTTP transport error ({kind}): {message}")]
pub struct TransportError {
    /// The failure classification.
    pub kind: TransportErrorKind,
    /// Description of the underlying failure.
    pub message: String,
}

impl TransportError {
    /// Creates a new transport error.
    #[must_use]
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Returns `true` if the failure is a timeout or connection failure.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        self.kind.is_transient()
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        let kind = if error.is_timeout() {
            TransportErrorKind::Timeout
        } else if error.is_connect() {
            TransportErrorKind::Connect
        } else {
            TransportErrorKind::Other
        };
        Self::new(kind, error.to_string())
    }
}
