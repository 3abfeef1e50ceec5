//! HTTP response types for the Airwallex API SDK.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

/// An HTTP response as returned by an [`HttpTransport`].
///
/// Header names are stored lowercased; a header may carry several values.
///
/// [`HttpTransport`]: crate::clients::HttpTransport
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers keyed by lowercased name.
    pub headers: HashMap<String, Vec<String>>,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new response, lowercasing header names.
    ///
    /// # Example
    ///
    /// ```rust
    /// use airwallex_api::clients::HttpResponse;
    /// use std::collections::HashMap;
    ///
    /// let mut headers = HashMap::new();
    /// headers.insert("X-Request-Id".to_string(), vec!["req_1".to_string()]);
    ///
    /// let response = HttpResponse::new(200, headers, r#"{"id":"x"}"#);
    /// assert!(response.is_ok());
    /// assert_eq!(response.request_id(), Some("req_1"));
    /// ```
    #[must_use]
    pub fn new(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: impl Into<String>,
    ) -> Self {
        let mut normalized: HashMap<String, Vec<String>> = HashMap::with_capacity(headers.len());
        for (name, values) in headers {
            normalized
                .entry(name.to_ascii_lowercase())
                .or_default()
                .extend(values);
        }
        Self {
            code,
            headers: normalized,
            body: body.into(),
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `x-request-id` header value, if present.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.header("x-request-id")
    }

    /// Returns the `Retry-After` delay when it is given in seconds.
    ///
    /// HTTP-date values are ignored.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        self.header("retry-after")
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }

    /// Decodes the body as JSON. An empty body decodes to an empty object.
    ///
    /// # Errors
    ///
    /// Returns the decode error if the body is not valid JSON.
    pub fn json(&self) -> Result<Value, serde_json::Error> {
        if self.body.trim().is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }
        serde_json::from_str(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn with_header(name: &str, value: &str) -> HttpResponse {
        let mut headers = HashMap::new();
        headers.insert(name.to_string(), vec![value.to_string()]);
        HttpResponse::new(200, headers, "")
    }

    #[test]
    fn test_is_ok_returns_true_for_2xx() {
        for code in 200..=299 {
            let response = HttpResponse::new(code, HashMap::new(), "");
            assert!(response.is_ok(), "Expected is_ok() to be true for code {code}");
        }
    }

    #[test]
    fn test_is_ok_returns_false_for_4xx_and_5xx() {
        for code in [301, 400, 401, 404, 429, 500, 503] {
            let response = HttpResponse::new(code, HashMap::new(), "");
            assert!(!response.is_ok(), "Expected is_ok() to be false for code {code}");
        }
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let response = with_header("X-Request-ID", "req_42");
        assert_eq!(response.request_id(), Some("req_42"));
        assert_eq!(response.header("X-REQUEST-ID"), Some("req_42"));
    }

    #[test]
    fn test_retry_after_parses_seconds() {
        assert_eq!(
            with_header("Retry-After", "2").retry_after(),
            Some(Duration::from_secs(2))
        );
        assert_eq!(
            with_header("retry-after", "0.25").retry_after(),
            Some(Duration::from_millis(250))
        );
    }

    #[test]
    fn test_retry_after_ignores_dates_and_negatives() {
        assert!(with_header("retry-after", "Wed, 21 Oct 2015 07:28:00 GMT")
            .retry_after()
            .is_none());
        assert!(with_header("retry-after", "-1").retry_after().is_none());
    }

    #[test]
    fn test_json_decodes_body() {
        let response = HttpResponse::new(200, HashMap::new(), r#"{"id":"pi_1"}"#);
        assert_eq!(response.json().unwrap(), json!({"id": "pi_1"}));
    }

    #[test]
    fn test_json_empty_body_is_empty_object() {
        let response = HttpResponse::new(204, HashMap::new(), "  ");
        assert_eq!(response.json().unwrap(), json!({}));
    }

    #[test]
    fn test_json_rejects_invalid_body() {
        let response = HttpResponse::new(200, HashMap::new(), "not json");
        assert!(response.json().is_err());
    }
}
