//! FX quotes: a locked rate that expires.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::rest::{Create, Retrieve};

define_resource! {
    /// A quote for converting between two currencies at a fixed rate.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use airwallex_api::resources::Quote;
    /// use airwallex_api::rest::Create;
    /// use serde_json::json;
    ///
    /// let quote = Quote::create(
    ///     &client,
    ///     json!({"buy_currency": "EUR", "sell_currency": "USD", "sell_amount": 100}),
    ///     None,
    /// )
    /// .await?;
    /// if !quote.is_expired() {
    ///     println!("valid for {:?}s", quote.seconds_until_expiration());
    /// }
    /// ```
    Quote => "/api/v1/fx/quotes"
}

impl Create for Quote {}
impl Retrieve for Quote {}

impl Quote {
    /// Returns `true` once the quote's `expires_at` has passed.
    ///
    /// A quote without `expires_at` never expires. An `expires_at` that
    /// cannot be parsed is treated as expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Like [`Quote::is_expired`], evaluated at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.get_str("expires_at") {
            None => false,
            Some(raw) => parse_timestamp(raw).map_or(true, |expires_at| now > expires_at),
        }
    }

    /// Returns the whole seconds left before expiry, never negative.
    ///
    /// `None` when the quote has no `expires_at`; `Some(0)` when it cannot be
    /// parsed.
    #[must_use]
    pub fn seconds_until_expiration(&self) -> Option<i64> {
        self.seconds_until_expiration_at(Utc::now())
    }

    /// Like [`Quote::seconds_until_expiration`], evaluated at `now`.
    #[must_use]
    pub fn seconds_until_expiration_at(&self, now: DateTime<Utc>) -> Option<i64> {
        let raw = self.get_str("expires_at")?;
        let remaining = parse_timestamp(raw)
            .map_or(0, |expires_at| (expires_at - now).num_seconds());
        Some(remaining.max(0))
    }
}

/// Parses the timestamp forms the API emits.
///
/// Accepts RFC 3339, offsets without a colon (`+0000`) and naive times,
/// which are read as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
