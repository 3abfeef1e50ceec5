//! Stored payment methods (cards, wallets, bank accounts).

use serde_json::json;

use crate::clients::{Client, RequestOptions};
use crate::error::Error;
use crate::rest::{post_action, Create, Delete, List, Retrieve, Update};

define_resource! {
    /// A payment method, optionally attached to a [`Customer`](super::Customer).
    PaymentMethod => "/api/v1/pa/payment_methods"
}

impl Create for PaymentMethod {}
impl Retrieve for PaymentMethod {}
impl List for PaymentMethod {}
impl Update for PaymentMethod {}
impl Delete for PaymentMethod {}

impl PaymentMethod {
    /// Detaches the method from its customer with `POST <id>/detach`.
    ///
    /// # Errors
    ///
    /// Returns an `UnknownAttribute` error if the method has no id, or any
    /// error from the request.
    pub async fn detach(
        &mut self,
        client: &Client,
        options: Option<&RequestOptions>,
    ) -> Result<(), Error> {
        post_action(self, client, "detach", json!({}), options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::ApiResource;

    #[test]
    fn test_payment_method_path() {
        assert_eq!(PaymentMethod::PATH, "/api/v1/pa/payment_methods");
    }
}
