//! Inbound webhook verification.
//!
//! Webhook deliveries are authenticated before their payload is trusted:
//!
//! - [`verify_timestamp`]: rejects deliveries outside the replay window
//! - [`verify_signature`]: timestamp check, then a constant-time HMAC compare
//! - [`construct_event`]: verification plus decoding into a [`WebhookEvent`]
//! - [`WebhookVerifier`]: the same checks bound to one secret
//!
//! Extracting the raw body and the [`HEADER_TIMESTAMP`] / [`HEADER_SIGNATURE`]
//! values from the HTTP request is left to the caller's web framework.
//!
//! # Example
//!
//! ```rust,ignore
//! use airwallex_api::webhooks::{WebhookVerifier, HEADER_SIGNATURE, HEADER_TIMESTAMP};
//!
//! let verifier = WebhookVerifier::new(std::env::var("AIRWALLEX_WEBHOOK_SECRET")?);
//! let event = verifier.construct_event(
//!     &body,
//!     headers[HEADER_SIGNATURE].to_str()?,
//!     headers[HEADER_TIMESTAMP].to_str()?,
//! )?;
//!
//! match event.event_type() {
//!     Some("payment_intent.succeeded") => fulfil(event.data()),
//!     _ => {}
//! }
//! ```

mod types;
mod verification;

pub use types::WebhookEvent;
pub use verification::{
    compute_signature, construct_event, verify_signature, verify_timestamp, verify_timestamp_at,
    WebhookVerifier, DEFAULT_TOLERANCE, HEADER_SIGNATURE, HEADER_TIMESTAMP,
};
