//! Error types for the Airwallex API SDK.
//!
//! This module contains the crate-wide [`Error`] type, the server-side
//! [`ApiError`] built from non-2xx responses, the closed [`ErrorKind`]
//! taxonomy, and [`ConfigError`] for configuration validation.
//!
//! # Error Handling
//!
//! Every fallible operation returns `Result<T, Error>`. A failed logical call
//! produces exactly one error; there is no partial success. Use
//! [`Error::kind`] to branch on the failure category without matching every
//! variant:
//!
//! ```rust
//! use airwallex_api::{ApiError, Error, ErrorKind};
//!
//! let error = Error::from(ApiError::from_response(
//!     404,
//!     br#"{"code":"resource_not_found","message":"x"}"#,
//!     None,
//! ));
//! assert_eq!(error.kind(), ErrorKind::NotFound);
//! ```

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::clients::TransportError;

/// Errors that can occur during SDK configuration.
///
/// Configuration is validated eagerly when the config is built, so these
/// errors surface at client construction time rather than on the first
/// request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Client ID cannot be empty.
    #[error("Client ID cannot be empty. Please provide a valid Airwallex client ID.")]
    EmptyClientId,

    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Airwallex API key.")]
    EmptyApiKey,

    /// Environment selector is not recognized.
    #[error("Invalid environment '{environment}'. Must be one of: sandbox, production.")]
    InvalidEnvironment {
        /// The selector that was provided.
        environment: String,
    },

    /// API version is invalid.
    #[error("Invalid API version '{version}'. Expected format: 'YYYY-MM-DD' (e.g., '2024-09-27').")]
    InvalidApiVersion {
        /// The invalid version string that was provided.
        version: String,
    },

    /// Base URL is invalid.
    #[error("Invalid base URL '{url}'. Please provide a valid URL with scheme (e.g., 'https://api.airwallex.com').")]
    InvalidBaseUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The token refresh margin would force re-authentication on every call.
    #[error("Token refresh margin ({margin_secs}s) must be strictly less than the token lifetime ({lifetime_secs}s).")]
    InvalidTokenTiming {
        /// The configured refresh margin in seconds.
        margin_secs: i64,
        /// The configured token lifetime in seconds.
        lifetime_secs: i64,
    },

    /// The retry policy allows no attempts at all.
    #[error("Retry policy must allow at least one attempt.")]
    InvalidRetryPolicy,
}

/// The closed set of failure categories.
///
/// Server-side kinds are derived from the HTTP status of the response; the
/// remaining kinds describe failures detected locally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// HTTP 400.
    BadRequest,
    /// HTTP 401.
    Authentication,
    /// HTTP 403.
    Permission,
    /// HTTP 404.
    NotFound,
    /// HTTP 429.
    RateLimit,
    /// HTTP 500-599.
    Api,
    /// Any other non-2xx status.
    Generic,
    /// A 400 caused by an expired FX quote.
    QuoteExpired,
    /// A 400 caused by an insufficient account balance.
    InsufficientFunds,
    /// A 403 requiring strong customer authentication.
    ScaRequired,
    /// Incomplete or invalid local configuration.
    Configuration,
    /// Webhook signature, timestamp or payload rejected.
    SignatureVerification,
    /// The transport failed and the retry budget is exhausted.
    Transport,
    /// A resource field that does not exist was read.
    UnknownAttribute,
    /// A successful response body could not be decoded.
    Decode,
}

impl ErrorKind {
    /// Maps an HTTP status code (and the optional machine code from the error
    /// body) to a kind.
    #[must_use]
    pub fn from_status(status: u16, code: Option<&str>) -> Self {
        let code = code.map(str::to_ascii_lowercase);
        match (status, code.as_deref()) {
            (400, Some("quote_expired")) => Self::QuoteExpired,
            (400, Some("insufficient_funds")) => Self::InsufficientFunds,
            (400, _) => Self::BadRequest,
            (401, _) => Self::Authentication,
            (403, Some("sca_required")) => Self::ScaRequired,
            (403, _) => Self::Permission,
            (404, _) => Self::NotFound,
            (429, _) => Self::RateLimit,
            (500..=599, _) => Self::Api,
            _ => Self::Generic,
        }
    }

    /// Returns `true` for `BadRequest` and its specializations.
    #[must_use]
    pub const fn is_bad_request(self) -> bool {
        matches!(
            self,
            Self::BadRequest | Self::QuoteExpired | Self::InsufficientFunds
        )
    }

    /// Returns `true` for `Permission` and its specializations.
    #[must_use]
    pub const fn is_permission(self) -> bool {
        matches!(self, Self::Permission | Self::ScaRequired)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BadRequest => "bad_request",
            Self::Authentication => "authentication",
            Self::Permission => "permission",
            Self::NotFound => "not_found",
            Self::RateLimit => "rate_limit",
            Self::Api => "api",
            Self::Generic => "generic",
            Self::QuoteExpired => "quote_expired",
            Self::InsufficientFunds => "insufficient_funds",
            Self::ScaRequired => "sca_required",
            Self::Configuration => "configuration",
            Self::SignatureVerification => "signature_verification",
            Self::Transport => "transport",
            Self::UnknownAttribute => "unknown_attribute",
            Self::Decode => "decode",
        };
        f.write_str(name)
    }
}

/// An error reported by the Airwallex API.
///
/// Built once at the HTTP boundary from the status code and the parsed
/// error body, and never mutated afterwards. The body wire format is a JSON
/// object with optional `message`, `code`, `source` and `details` fields;
/// bodies that are not JSON objects become the message verbatim.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    /// The failure category.
    pub kind: ErrorKind,
    /// Human-readable message.
    pub message: String,
    /// Machine-readable error code, if the server sent one.
    pub code: Option<String>,
    /// The request parameter implicated by the error (`source` on the wire).
    pub param: Option<String>,
    /// Structured details, if any.
    pub details: Option<Vec<Value>>,
    /// The HTTP status code. `None` for errors raised locally.
    pub http_status: Option<u16>,
    /// The `x-request-id` response header, useful in support requests.
    pub request_id: Option<String>,
}

impl ApiError {
    /// Builds an error from a raw non-2xx response.
    ///
    /// # Example
    ///
    /// ```rust
    /// use airwallex_api::{ApiError, ErrorKind};
    ///
    /// let error = ApiError::from_response(400, b"upstream exploded", None);
    /// assert_eq!(error.kind, ErrorKind::BadRequest);
    /// assert_eq!(error.message, "upstream exploded");
    /// ```
    #[must_use]
    pub fn from_response(status: u16, body: &[u8], request_id: Option<&str>) -> Self {
        let text = String::from_utf8_lossy(body);
        let trimmed = text.trim();

        let fields = if trimmed.is_empty() {
            serde_json::Map::new()
        } else {
            match serde_json::from_str::<Value>(trimmed) {
                Ok(Value::Object(map)) => map,
                _ => {
                    let mut map = serde_json::Map::new();
                    map.insert("message".to_string(), Value::String(trimmed.to_string()));
                    map
                }
            }
        };

        let string_field = |key: &str| -> Option<String> {
            match fields.get(key)? {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            }
        };

        let code = string_field("code");
        let message = string_field("message")
            .unwrap_or_else(|| format!("Airwallex API request failed with status {status}"));
        let details = match fields.get("details") {
            Some(Value::Array(items)) => Some(items.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(vec![other.clone()]),
        };

        Self {
            kind: ErrorKind::from_status(status, code.as_deref()),
            message,
            code,
            param: string_field("source"),
            details,
            http_status: Some(status),
            request_id: request_id.map(ToString::to_string),
        }
    }

    /// Builds a locally raised error that has no HTTP response behind it.
    #[must_use]
    pub fn local(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: None,
            param: None,
            details: None,
            http_status: None,
            request_id: None,
        }
    }
}

/// Unified error type for all SDK operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The API returned a non-2xx response.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Configuration is incomplete or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A webhook payload failed verification.
    ///
    /// The message is deliberately generic so that callers cannot tell a
    /// tampered payload from a malformed one.
    #[error("Webhook signature verification failed: {message}")]
    SignatureVerification {
        /// Short description of the failed check.
        message: String,
    },

    /// The request could not be delivered.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A resource field was read that the resource does not have.
    #[error("Unknown attribute '{name}'")]
    UnknownAttribute {
        /// The requested field name.
        name: String,
    },

    /// A successful response could not be decoded as JSON.
    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// Returns the failure category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Api(e) => e.kind,
            Self::Config(_) => ErrorKind::Configuration,
            Self::SignatureVerification { .. } => ErrorKind::SignatureVerification,
            Self::Transport(_) => ErrorKind::Transport,
            Self::UnknownAttribute { .. } => ErrorKind::UnknownAttribute,
            Self::Decode(_) => ErrorKind::Decode,
        }
    }

    /// Returns the HTTP status when the error came from an API response.
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::Api(e) => e.http_status,
            _ => None,
        }
    }

    pub(crate) fn signature(message: impl Into<String>) -> Self {
        Self::SignatureVerification {
            message: message.into(),
        }
    }
}
