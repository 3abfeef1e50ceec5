//! Payment intents: the lifecycle of a single card or wallet payment.

use serde_json::Value;

use crate::clients::{Client, RequestOptions};
use crate::error::Error;
use crate::rest::{post_action, Create, List, Retrieve, Update};

define_resource! {
    /// A payment intent.
    ///
    /// Intents are created, then confirmed with a payment method, and finally
    /// captured (or cancelled). Each action replaces the local fields with the
    /// intent returned by the server.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use airwallex_api::resources::PaymentIntent;
    /// use airwallex_api::rest::{Create, Retrieve};
    /// use serde_json::json;
    ///
    /// let mut intent = PaymentIntent::create(
    ///     &client,
    ///     json!({"amount": 100, "currency": "USD", "merchant_order_id": "o_1"}),
    ///     None,
    /// )
    /// .await?;
    /// intent.confirm(&client, json!({"payment_method_id": "pm_1"}), None).await?;
    /// intent.capture(&client, json!({"amount": 100}), None).await?;
    /// ```
    PaymentIntent => "/api/v1/pa/payment_intents"
}

impl Create for PaymentIntent {}
impl Retrieve for PaymentIntent {}
impl List for PaymentIntent {}
impl Update for PaymentIntent {}

impl PaymentIntent {
    /// Confirms the intent with `POST <id>/confirm`.
    ///
    /// # Errors
    ///
    /// Returns an `UnknownAttribute` error if the intent has no id, or any
    /// error from the request.
    pub async fn confirm(
        &mut self,
        client: &Client,
        params: Value,
        options: Option<&RequestOptions>,
    ) -> Result<(), Error> {
        post_action(self, client, "confirm", params, options).await
    }

    /// Cancels the intent with `POST <id>/cancel`.
    ///
    /// # Errors
    ///
    /// Returns an `UnknownAttribute` error if the intent has no id, or any
    /// error from the request.
    pub async fn cancel(
        &mut self,
        client: &Client,
        params: Value,
        options: Option<&RequestOptions>,
    ) -> Result<(), Error> {
        post_action(self, client, "cancel", params, options).await
    }

    /// Captures an authorized intent with `POST <id>/capture`.
    ///
    /// # Errors
    ///
    /// Returns an `UnknownAttribute` error if the intent has no id, or any
    /// error from the request.
    pub async fn capture(
        &mut self,
        client: &Client,
        params: Value,
        options: Option<&RequestOptions>,
    ) -> Result<(), Error> {
        post_action(self, client, "capture", params, options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::ApiResource;
    use serde_json::json;

    #[test]
    fn test_payment_intent_path() {
        assert_eq!(PaymentIntent::PATH, "/api/v1/pa/payment_intents");
    }

    #[test]
    fn test_payment_intent_exposes_record_fields() {
        let intent = PaymentIntent::from_value(json!({
            "id": "int_1",
            "amount": 100,
            "currency": "USD",
            "status": "REQUIRES_PAYMENT_METHOD"
        }));

        assert_eq!(intent.id(), Some("int_1"));
        assert_eq!(intent.get_str("status"), Some("REQUIRES_PAYMENT_METHOD"));
        assert_eq!(intent.get_f64("amount"), Some(100.0));
        assert!(!intent.is_dirty());
    }

    #[test]
    fn test_payment_intent_serializes_as_plain_object() {
        let mut intent = PaymentIntent::from_value(json!({"id": "int_1"}));
        intent.set("descriptor", "ACME");

        let json = serde_json::to_value(&intent).unwrap();
        assert_eq!(json, json!({"id": "int_1", "descriptor": "ACME"}));
    }
}
