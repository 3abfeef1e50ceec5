//! Payouts to beneficiaries.

use serde_json::json;

use crate::clients::{Client, RequestOptions};
use crate::error::Error;
use crate::rest::{post_action, Create, List, Retrieve};

define_resource! {
    /// A transfer (payout) to a beneficiary.
    Transfer => "/api/v1/transfers"
}

impl Create for Transfer {}
impl Retrieve for Transfer {}
impl List for Transfer {}

impl Transfer {
    /// Cancels a pending transfer with `POST <id>/cancel`.
    ///
    /// # Errors
    ///
    /// Returns an `UnknownAttribute` error if the transfer has no id, or any
    /// error from the request.
    pub async fn cancel(
        &mut self,
        client: &Client,
        options: Option<&RequestOptions>,
    ) -> Result<(), Error> {
        post_action(self, client, "cancel", json!({}), options).await
    }
}
