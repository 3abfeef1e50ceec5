//! HTTP client types for Airwallex API communication.
//!
//! This module provides the request pipeline every API call passes through.
//!
//! # Overview
//!
//! - [`Client`]: The authenticated async client (token lifecycle, retries, idempotency)
//! - [`HttpTransport`]: The seam to the network, with [`ReqwestTransport`] as default
//! - [`HttpRequest`] / [`HttpResponse`]: Transport-level request and response values
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, PATCH, DELETE)
//! - [`RequestOptions`]: Per-call extra headers
//! - [`TransportError`]: A request that produced no HTTP response
//!
//! # Retry Behavior
//!
//! - **GET / DELETE**: retried on timeouts, connection failures and statuses
//!   429, 500, 502, 503 and 504, up to three attempts in total, with randomized
//!   exponential backoff (`Retry-After` in seconds takes precedence)
//! - **POST / PUT / PATCH**: never retried at the transport level; the
//!   `request_id` idempotency key makes a caller-level retry safe
//! - **401**: the client re-authenticates once and replays the call; a second
//!   401 is returned as an `Authentication` error

mod client;
mod errors;
mod http_request;
mod http_response;
mod transport;

pub use client::{generate_idempotency_key, Client, IDEMPOTENCY_FIELD, SDK_VERSION};
pub use errors::{TransportError, TransportErrorKind};
pub use http_request::{to_query_pairs, HttpMethod, HttpRequest, HttpRequestBuilder, RequestOptions};
pub use http_response::HttpResponse;
pub use transport::{BoxFuture, HttpTransport, ReqwestTransport};
