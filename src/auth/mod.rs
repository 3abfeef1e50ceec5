//! Authentication types for the Airwallex API SDK.
//!
//! Airwallex uses a client-credentials style login: the client ID and API key
//! are exchanged at `POST /api/v1/authentication/login` for a short-lived
//! bearer token. The [`Client`](crate::Client) owns that exchange and the
//! refresh policy; this module only holds the token value type.

mod token;

pub use token::AccessToken;

/// Path of the login endpoint.
pub const LOGIN_PATH: &str = "/api/v1/authentication/login";
