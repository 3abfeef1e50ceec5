//! Payment customers.

use serde_json::{Map, Value};

use crate::clients::{Client, RequestOptions};
use crate::error::Error;
use crate::rest::{Create, Delete, List, PaginatedList, Retrieve, Update};

use super::PaymentMethod;

define_resource! {
    /// A customer that payment intents and payment methods can belong to.
    Customer => "/api/v1/pa/customers"
}

impl Create for Customer {}
impl Retrieve for Customer {}
impl List for Customer {}
impl Update for Customer {}
impl Delete for Customer {}

impl Customer {
    /// Lists the payment methods of this customer.
    ///
    /// Sends `customer_id` together with `params`; a `customer_id` in `params`
    /// is overridden. Later pages keep the filter.
    ///
    /// # Errors
    ///
    /// Returns an `UnknownAttribute` error if the customer has no id, or any
    /// error from the request.
    pub async fn payment_methods(
        &self,
        client: &Client,
        params: Option<&Map<String, Value>>,
        options: Option<&RequestOptions>,
    ) -> Result<PaginatedList<PaymentMethod>, Error> {
        let id = self.id().ok_or_else(|| Error::UnknownAttribute {
            name: "id".to_string(),
        })?;

        let mut query = params.cloned().unwrap_or_default();
        query.insert("customer_id".to_string(), Value::String(id.to_string()));
        PaymentMethod::list(client, Some(&query), options).await
    }
}
