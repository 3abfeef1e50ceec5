//! Signature and replay checks for inbound Airwallex webhooks.
//!
//! Airwallex signs each delivery with HMAC-SHA256 over the `x-timestamp`
//! header value immediately followed by the raw request body, keyed by the
//! endpoint's webhook secret, and sends the lowercase hex digest in
//! `x-signature`.
//!
//! # Example
//!
//! ```rust
//! use airwallex_api::webhooks::{compute_signature, construct_event, DEFAULT_TOLERANCE};
//!
//! let payload = br#"{"id":"evt_1","name":"payment_intent.succeeded","type":"payment_intent.succeeded","data":{}}"#;
//! let timestamp = chrono::Utc::now().timestamp().to_string();
//! let signature = compute_signature(&timestamp, payload, "whsec");
//!
//! let event = construct_event(payload, &signature, &timestamp, "whsec", DEFAULT_TOLERANCE).unwrap();
//! assert_eq!(event.event_type(), Some("payment_intent.succeeded"));
//! ```
//!
//! # Security
//!
//! The timestamp is checked before the signature so that stale replays are
//! rejected without computing an HMAC. Digests are compared in constant time.
//! Every failure surfaces as [`Error::SignatureVerification`] with a short
//! message that does not reveal which part of a well-formed payload was wrong.

use std::time::Duration;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::Error;
use crate::webhooks::WebhookEvent;

type HmacSha256 = Hmac<Sha256>;

// ============================================================================
// Header Constants
// ============================================================================

/// HTTP header carrying the Unix timestamp (seconds) of the delivery.
pub const HEADER_TIMESTAMP: &str = "x-timestamp";

/// HTTP header carrying the hex HMAC-SHA256 signature.
pub const HEADER_SIGNATURE: &str = "x-signature";

/// Default replay window.
pub const DEFAULT_TOLERANCE: Duration = Duration::from_secs(300);

// ============================================================================
// Free functions
// ============================================================================

/// Computes the hex HMAC-SHA256 of `timestamp` followed by `payload`.
///
/// # Example
///
/// ```rust
/// use airwallex_api::webhooks::compute_signature;
///
/// let sig = compute_signature("1700000000", b"{}", "secret");
/// assert_eq!(sig.len(), 64);
/// assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature(timestamp: &str, payload: &[u8], secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(timestamp.as_bytes());
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Fails unless `timestamp` is within `tolerance` of the current time.
///
/// # Errors
///
/// Returns [`Error::SignatureVerification`] for a timestamp that is not a
/// Unix time in seconds, or that is too far in the past or the future.
pub fn verify_timestamp(timestamp: &str, tolerance: Duration) -> Result<(), Error> {
    verify_timestamp_at(timestamp, tolerance, Utc::now())
}

/// Like [`verify_timestamp`], evaluated at `now`.
///
/// # Errors
///
/// See [`verify_timestamp`].
pub fn verify_timestamp_at(
    timestamp: &str,
    tolerance: Duration,
    now: DateTime<Utc>,
) -> Result<(), Error> {
    let sent: i64 = timestamp
        .trim()
        .parse()
        .map_err(|_| Error::signature("Invalid timestamp"))?;

    let skew = now.timestamp().abs_diff(sent);
    if skew > tolerance.as_secs() {
        return Err(Error::signature(format!(
            "Timestamp outside tolerance ({}s)",
            tolerance.as_secs()
        )));
    }
    Ok(())
}

/// Verifies the timestamp, then the signature of `payload`.
///
/// # Errors
///
/// Returns [`Error::SignatureVerification`] if either check fails.
pub fn verify_signature(
    payload: &[u8],
    signature: &str,
    timestamp: &str,
    secret: &str,
    tolerance: Duration,
) -> Result<(), Error> {
    verify_timestamp(timestamp, tolerance)?;
    check_signature(payload, signature, timestamp, secret)
}

/// Verifies a delivery and decodes it into a [`WebhookEvent`].
///
/// # Errors
///
/// Returns [`Error::SignatureVerification`] if verification fails or if the
/// verified payload is not a JSON object.
pub fn construct_event(
    payload: &[u8],
    signature: &str,
    timestamp: &str,
    secret: &str,
    tolerance: Duration,
) -> Result<WebhookEvent, Error> {
    verify_signature(payload, signature, timestamp, secret, tolerance)?;
    decode_event(payload)
}

// ============================================================================
// WebhookVerifier
// ============================================================================

/// A webhook secret bound to a replay window.
///
/// Convenient when one endpoint verifies many deliveries with the same
/// secret.
///
/// # Example
///
/// ```rust
/// use airwallex_api::webhooks::{compute_signature, WebhookVerifier};
///
/// let verifier = WebhookVerifier::new("whsec");
/// let timestamp = chrono::Utc::now().timestamp().to_string();
/// let signature = compute_signature(&timestamp, b"{}", "whsec");
///
/// assert!(verifier.verify(b"{}", &signature, &timestamp).is_ok());
/// assert!(verifier.verify(b"{ }", &signature, &timestamp).is_err());
/// ```
#[derive(Clone)]
pub struct WebhookVerifier {
    secret: String,
    tolerance: Duration,
}

impl WebhookVerifier {
    /// Creates a verifier with the default 300 second tolerance.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            tolerance: DEFAULT_TOLERANCE,
        }
    }

    /// Replaces the replay window.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: Duration) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Returns the replay window.
    #[must_use]
    pub const fn tolerance(&self) -> Duration {
        self.tolerance
    }

    /// See [`verify_signature`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::SignatureVerification`] if verification fails.
    pub fn verify(&self, payload: &[u8], signature: &str, timestamp: &str) -> Result<(), Error> {
        verify_signature(payload, signature, timestamp, &self.secret, self.tolerance)
    }

    /// See [`construct_event`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::SignatureVerification`] if verification or decoding
    /// fails.
    pub fn construct_event(
        &self,
        payload: &[u8],
        signature: &str,
        timestamp: &str,
    ) -> Result<WebhookEvent, Error> {
        construct_event(payload, signature, timestamp, &self.secret, self.tolerance)
    }
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("secret", &"*****")
            .field("tolerance", &self.tolerance)
            .finish()
    }
}

// ============================================================================
// Internals
// ============================================================================

fn check_signature(
    payload: &[u8],
    signature: &str,
    timestamp: &str,
    secret: &str,
) -> Result<(), Error> {
    let expected = compute_signature(timestamp, payload, secret);
    if constant_time_compare(&expected, signature) {
        Ok(())
    } else {
        Err(Error::signature("Signature verification failed"))
    }
}

/// Length-checked, constant-time string comparison.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

fn decode_event(payload: &[u8]) -> Result<WebhookEvent, Error> {
    serde_json::from_slice(payload).map_err(|e| Error::signature(format!("Invalid payload: {e}")))
}
