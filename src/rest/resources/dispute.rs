//! Payment disputes (chargebacks).

use serde_json::{json, Value};

use crate::clients::{Client, RequestOptions};
use crate::error::Error;
use crate::rest::{post_action, List, Retrieve};

define_resource! {
    /// A dispute raised against a payment.
    ///
    /// Disputes are opened by the card network, so they can only be read and
    /// acted on.
    Dispute => "/api/v1/disputes"
}

impl Retrieve for Dispute {}
impl List for Dispute {}

impl Dispute {
    /// Accepts the dispute with `POST <id>/accept`.
    ///
    /// # Errors
    ///
    /// Returns an `UnknownAttribute` error if the dispute has no id, or any
    /// error from the request.
    pub async fn accept(
        &mut self,
        client: &Client,
        options: Option<&RequestOptions>,
    ) -> Result<(), Error> {
        post_action(self, client, "accept", json!({}), options).await
    }

    /// Challenges the dispute by sending `evidence` to `POST <id>/evidence`.
    ///
    /// # Errors
    ///
    /// Returns an `UnknownAttribute` error if the dispute has no id, or any
    /// error from the request.
    pub async fn submit_evidence(
        &mut self,
        client: &Client,
        evidence: Value,
        options: Option<&RequestOptions>,
    ) -> Result<(), Error> {
        post_action(self, client, "evidence", evidence, options).await
    }
}
