//! # Airwallex API Rust SDK
//!
//! An async Rust client for the Airwallex payments API: authentication,
//! idempotent requests with retries, dynamic resources with partial save,
//! pagination, and webhook signature verification.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`AirwallexConfig`] and [`AirwallexConfigBuilder`]
//! - Validated newtypes for credentials, hosts and API versions
//! - An authenticated [`Client`] that logs in lazily, refreshes its access
//!   token before expiry, injects `request_id` idempotency keys and retries
//!   transient failures
//! - Schema-less [`Resource`] records with dirty tracking, so `save` sends
//!   only the fields that changed
//! - [`PaginatedList`] pages with cursor or offset pagination and auto-paging
//! - Webhook verification via [`webhooks`]
//!
//! ## Quick Start
//!
//! ```rust
//! use airwallex_api::{AirwallexConfig, ApiKey, ClientId, Environment};
//!
//! let config = AirwallexConfig::builder()
//!     .client_id(ClientId::new("your-client-id").unwrap())
//!     .api_key(ApiKey::new("your-api-key").unwrap())
//!     .environment(Environment::Sandbox)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.base_url().as_ref(), "https://api-demo.airwallex.com");
//! ```
//!
//! ## Making Requests
//!
//! ```rust,ignore
//! use airwallex_api::{AirwallexConfig, Client};
//! use airwallex_api::resources::{PaymentIntent, Balance};
//! use airwallex_api::rest::{Create, List, Update};
//! use serde_json::json;
//!
//! let client = Client::new(config)?;
//!
//! // The first call logs in; later calls reuse the token until it nears expiry.
//! let mut intent = PaymentIntent::create(
//!     &client,
//!     json!({"amount": 100, "currency": "USD", "merchant_order_id": "o_1"}),
//!     None,
//! )
//! .await?;
//!
//! intent.set("descriptor", "ACME*ORDER1");
//! intent.save(&client, None).await?; // PUT {"descriptor": "ACME*ORDER1"}
//!
//! let usd = Balance::retrieve(&client, "USD", None).await?;
//! println!("total: {}", usd.total_amount());
//! ```
//!
//! ## Error Handling
//!
//! Every failed call returns one [`Error`]. Use [`Error::kind`] to branch:
//!
//! ```rust,ignore
//! use airwallex_api::ErrorKind;
//!
//! match Quote::create(&client, params, None).await {
//!     Ok(quote) => { /* ... */ }
//!     Err(e) if e.kind() == ErrorKind::RateLimit => { /* back off */ }
//!     Err(e) if e.kind().is_bad_request() => { /* fix the request */ }
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! ## Logging
//!
//! The SDK emits [`tracing`] events (requests at `debug`, logins at `info`,
//! retries and re-authentication at `warn`). Install a subscriber in the
//! application to see them. Credentials and tokens are never logged.
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: configuration errors surface at construction
//! - **Thread-safe**: [`Client`] is `Send + Sync` and cheap to clone
//! - **Async-first**: designed for use with the Tokio runtime

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod rest;
pub mod webhooks;

pub use rest::resources;

// Re-export public types at crate root for convenience
pub use auth::AccessToken;
pub use config::{
    AirwallexConfig, AirwallexConfigBuilder, ApiKey, ApiVersion, BaseUrl, ClientId, Environment,
    RetryPolicy,
};
pub use error::{ApiError, ConfigError, Error, ErrorKind};

// Re-export HTTP client types
pub use clients::{generate_idempotency_key, Client, HttpMethod, RequestOptions};

// Re-export REST types
pub use rest::{PaginatedList, Resource};

// Re-export webhook types
pub use webhooks::{construct_event, WebhookEvent, WebhookVerifier};
