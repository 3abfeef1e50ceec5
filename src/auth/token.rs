//! Access token value type.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

/// A bearer token issued by the Airwallex login endpoint.
///
/// Tokens are immutable. A refresh installs a new `AccessToken`; an existing
/// one is never modified in place, so a reader holding a token always sees a
/// consistent value and expiry.
///
/// # Example
///
/// ```rust
/// use airwallex_api::AccessToken;
/// use chrono::{Duration, Utc};
///
/// let issued = Utc::now();
/// let token = AccessToken::new("tok_abc", issued, Duration::minutes(30));
///
/// assert!(!token.is_expired_at(issued, Duration::minutes(5)));
/// assert!(token.is_expired_at(issued + Duration::minutes(25), Duration::minutes(5)));
/// assert_eq!(format!("{token:?}").contains("tok_abc"), false);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    value: String,
    issued_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Creates a token issued at `issued_at` that lives for `lifetime`.
    #[must_use]
    pub fn new(value: impl Into<String>, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        Self {
            value: value.into(),
            issued_at,
            expires_at: issued_at + lifetime,
        }
    }

    /// Returns the raw bearer string.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns when the token was issued.
    #[must_use]
    pub const fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Returns when the token expires.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns `true` if, at `now`, the token is within `margin` of expiry
    /// (or past it).
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>, margin: Duration) -> bool {
        now >= self.expires_at - margin
    }

    /// Returns `true` if the token is within `margin` of expiry right now.
    #[must_use]
    pub fn is_expired(&self, margin: Duration) -> bool {
        self.is_expired_at(Utc::now(), margin)
    }

    pub(crate) fn authorization(&self) -> String {
        format!("Bearer {}", self.value)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"*****")
            .field("issued_at", &self.issued_at)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_at(issued: DateTime<Utc>) -> AccessToken {
        AccessToken::new("secret-token", issued, Duration::seconds(1800))
    }

    #[test]
    fn test_expiry_is_issue_time_plus_lifetime() {
        let issued = Utc::now();
        let token = token_at(issued);
        assert_eq!(token.issued_at(), issued);
        assert_eq!(token.expires_at(), issued + Duration::seconds(1800));
    }

    #[test]
    fn test_token_is_fresh_until_refresh_margin() {
        let issued = Utc::now();
        let token = token_at(issued);
        let margin = Duration::seconds(300);

        assert!(!token.is_expired_at(issued, margin));
        assert!(!token.is_expired_at(issued + Duration::seconds(1499), margin));
        assert!(token.is_expired_at(issued + Duration::seconds(1500), margin));
        assert!(token.is_expired_at(issued + Duration::seconds(4000), margin));
    }

    #[test]
    fn test_debug_masks_token_value() {
        let debug = format!("{:?}", token_at(Utc::now()));
        assert!(debug.contains("AccessToken"));
        assert!(!debug.contains("secret-token"));
    }

    #[test]
    fn test_authorization_header_value() {
        assert_eq!(token_at(Utc::now()).authorization(), "Bearer secret-token");
    }
}
