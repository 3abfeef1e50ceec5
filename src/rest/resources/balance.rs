//! Wallet balances per currency.

use serde_json::{json, Map, Value};

use crate::clients::{Client, RequestOptions};
use crate::error::{ApiError, Error, ErrorKind};
use crate::rest::{ApiResource, List};

define_resource! {
    /// The balance of one currency in the wallet.
    ///
    /// Balances are listed as a whole; [`Balance::retrieve`] picks a single
    /// currency out of the current balances.
    Balance => "/api/v1/balances/current"
}

impl List for Balance {}

impl Balance {
    /// Returns the balance for `currency` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` error when the wallet holds no balance in
    /// `currency`, or any error from the request.
    pub async fn retrieve(
        client: &Client,
        currency: &str,
        options: Option<&RequestOptions>,
    ) -> Result<Self, Error> {
        let mut params = Map::new();
        params.insert("currency".to_string(), json!(currency));

        let data = client.get(Self::PATH, Some(&params), options).await?;
        find_currency(data, currency).map(Self::from_value).ok_or_else(|| {
            ApiError::local(
                ErrorKind::NotFound,
                format!("Balance not found for currency: {currency}"),
            )
            .into()
        })
    }

    /// Returns available, pending and reserved amounts summed, to cents.
    ///
    /// Missing amounts count as zero.
    #[must_use]
    pub fn total_amount(&self) -> f64 {
        let total: f64 = ["available_amount", "pending_amount", "reserved_amount"]
            .iter()
            .map(|field| self.get_f64(field).unwrap_or(0.0))
            .sum();
        (total * 100.0).round() / 100.0
    }
}

fn find_currency(data: Value, currency: &str) -> Option<Value> {
    let entries = match data {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("data").or_else(|| map.remove("items")) {
            Some(Value::Array(entries)) => entries,
            _ => return None,
        },
        _ => return None,
    };

    entries.into_iter().find(|entry| {
        entry
            .get("currency")
            .and_then(Value::as_str)
            .is_some_and(|c| c.eq_ignore_ascii_case(currency))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_path() {
        assert_eq!(Balance::PATH, "/api/v1/balances/current");
    }

    #[test]
    fn test_total_amount_sums_and_rounds() {
        let balance = Balance::from_value(json!({
            "currency": "USD",
            "available_amount": 100.1,
            "pending_amount": "20.2",
            "reserved_amount": 0.114
        }));

        assert!((balance.total_amount() - 120.41).abs() < f64::EPSILON);
    }

    #[test]
    fn test_total_amount_treats_missing_as_zero() {
        let balance = Balance::from_value(json!({"currency": "EUR", "available_amount": 5}));
        assert!((balance.total_amount() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_find_currency_in_bare_array() {
        let data = json!([
            {"currency": "USD", "available_amount": 1},
            {"currency": "EUR", "available_amount": 2}
        ]);

        let found = find_currency(data, "eur").unwrap();
        assert_eq!(found["available_amount"], 2);
    }

    #[test]
    fn test_find_currency_in_data_envelope() {
        let data = json!({"data": [{"currency": "GBP"}]});
        assert!(find_currency(data, "GBP").is_some());
    }

    #[test]
    fn test_find_currency_absent() {
        assert!(find_currency(json!([{"currency": "USD"}]), "JPY").is_none());
        assert!(find_currency(json!({"unexpected": true}), "USD").is_none());
    }
}
