//! HTTP request types for the Airwallex API SDK.
//!
//! This module provides the transport-level [`HttpRequest`] with its builder,
//! the per-call [`RequestOptions`], and the conversion of JSON parameters into
//! query pairs.

use std::fmt;
use std::time::Duration;

use serde_json::{Map, Value};

/// HTTP methods used by the Airwallex API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and invoking actions.
    Post,
    /// HTTP PUT method for full updates.
    Put,
    /// HTTP PATCH method for partial updates.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns `true` for read-style methods that may be retried on transient
    /// failure without risking a duplicated side effect.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Get | Self::Delete)
    }

    /// Returns `true` for methods whose data travels in a JSON body rather
    /// than in the query string.
    #[must_use]
    pub const fn carries_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }

    /// Returns the uppercase method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully resolved request handed to an [`HttpTransport`].
///
/// The URL is absolute, headers are final, and the body is already encoded.
///
/// [`HttpTransport`]: crate::clients::HttpTransport
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    /// The HTTP method.
    pub method: HttpMethod,
    /// Absolute request URL without the query string.
    pub url: String,
    /// Request headers in insertion order.
    pub headers: Vec<(String, String)>,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
    /// Encoded request body, if any.
    pub body: Option<String>,
    /// Per-call timeout.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use airwallex_api::clients::{HttpMethod, HttpRequest};
    ///
    /// let request = HttpRequest::builder(HttpMethod::Get, "https://api-demo.airwallex.com/api/v1/transfers")
    ///     .query_param("page_size", "10")
    ///     .header("x-api-version", "2024-09-27")
    ///     .build();
    ///
    /// assert_eq!(request.header("X-API-Version"), Some("2024-09-27"));
    /// ```
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// Returns the first value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    request: HttpRequest,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            request: HttpRequest {
                method,
                url: url.into(),
                headers: Vec::new(),
                query: Vec::new(),
                body: None,
                timeout: None,
            },
        }
    }

    /// Sets a header, replacing any existing value with the same name.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        self.request
            .headers
            .retain(|(existing, _)| !existing.eq_ignore_ascii_case(&key));
        self.request.headers.push((key, value.into()));
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.query.push((key.into(), value.into()));
        self
    }

    /// Appends query parameters.
    #[must_use]
    pub fn query(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.request.query.extend(pairs);
        self
    }

    /// Sets the encoded request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.request.body = Some(body.into());
        self
    }

    /// Sets the per-call timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.request.timeout = Some(timeout);
        self
    }

    /// Builds the [`HttpRequest`].
    #[must_use]
    pub fn build(self) -> HttpRequest {
        self.request
    }
}

/// Per-call options accepted by every resource operation.
///
/// Extra headers are sent as given, except that `Authorization` is always
/// controlled by the client and cannot be overridden.
///
/// # Example
///
/// ```rust
/// use airwallex_api::RequestOptions;
///
/// let options = RequestOptions::new().header("x-on-behalf-of", "acct_123");
/// assert_eq!(options.headers().len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
    headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// Creates empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an extra header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Returns the extra headers.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

/// Converts a JSON parameter map into query pairs.
///
/// Nulls are skipped, scalars are stringified, arrays of scalars become
/// comma-separated lists, and nested objects are sent as JSON text.
#[must_use]
pub fn to_query_pairs(params: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());

    for (key, value) in params {
        match value {
            Value::Null => {}
            Value::String(s) => pairs.push((key.clone(), s.clone())),
            Value::Number(n) => pairs.push((key.clone(), n.to_string())),
            Value::Bool(b) => pairs.push((key.clone(), b.to_string())),
            Value::Array(items) => {
                let values: Vec<String> = items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s.clone()),
                        Value::Number(n) => Some(n.to_string()),
                        Value::Bool(b) => Some(b.to_string()),
                        _ => None,
                    })
                    .collect();
                if !values.is_empty() {
                    pairs.push((key.clone(), values.join(",")));
                }
            }
            Value::Object(_) => pairs.push((key.clone(), value.to_string())),
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_only_get_and_delete_are_retryable() {
        assert!(HttpMethod::Get.is_retryable());
        assert!(HttpMethod::Delete.is_retryable());
        assert!(!HttpMethod::Post.is_retryable());
        assert!(!HttpMethod::Put.is_retryable());
        assert!(!HttpMethod::Patch.is_retryable());
    }

    #[test]
    fn test_body_methods() {
        assert!(HttpMethod::Post.carries_body());
        assert!(HttpMethod::Patch.carries_body());
        assert!(!HttpMethod::Get.carries_body());
    }

    #[test]
    fn test_method_display_is_uppercase() {
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
    }

    #[test]
    fn test_builder_header_replaces_case_insensitively() {
        let request = HttpRequest::builder(HttpMethod::Get, "http://localhost/x")
            .header("Content-Type", "text/plain")
            .header("content-type", "application/json")
            .build();

        assert_eq!(request.headers.len(), 1);
        assert_eq!(request.header("CONTENT-TYPE"), Some("application/json"));
    }

    #[test]
    fn test_builder_collects_query_body_and_timeout() {
        let request = HttpRequest::builder(HttpMethod::Post, "http://localhost/x")
            .query_param("a", "1")
            .query(vec![("b".to_string(), "2".to_string())])
            .body("{}")
            .timeout(Duration::from_secs(3))
            .build();

        assert_eq!(
            request.query,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "2".to_string())
            ]
        );
        assert_eq!(request.body.as_deref(), Some("{}"));
        assert_eq!(request.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_to_query_pairs_converts_values() {
        let params = json!({
            "status": "SUCCEEDED",
            "page_size": 10,
            "live": true,
            "skip": null,
            "currencies": ["USD", "EUR"],
            "metadata": {"k": "v"}
        });
        let Value::Object(map) = params else {
            unreachable!()
        };

        let pairs = to_query_pairs(&map);
        let lookup = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(lookup("status"), Some("SUCCEEDED"));
        assert_eq!(lookup("page_size"), Some("10"));
        assert_eq!(lookup("live"), Some("true"));
        assert_eq!(lookup("skip"), None);
        assert_eq!(lookup("currencies"), Some("USD,EUR"));
        assert_eq!(lookup("metadata"), Some(r#"{"k":"v"}"#));
    }

    #[test]
    fn test_request_options_collects_headers() {
        let options = RequestOptions::new()
            .header("x-on-behalf-of", "acct_1")
            .header("x-trace", "abc");
        assert_eq!(options.headers()[1], ("x-trace".to_string(), "abc".to_string()));
    }
}
