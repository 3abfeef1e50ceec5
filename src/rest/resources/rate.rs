//! Indicative FX rates.

use serde_json::{Map, Value};

use crate::clients::{Client, RequestOptions};
use crate::error::Error;
use crate::rest::{ApiResource, List};

define_resource! {
    /// The current market rate for a currency pair.
    ///
    /// Rates have no identity; they are read by query parameters such as
    /// `buy_currency` and `sell_currency`.
    Rate => "/api/v1/fx/rates/current"
}

impl List for Rate {}

impl Rate {
    /// Fetches the current rate with `GET <path>?<params>`.
    ///
    /// # Errors
    ///
    /// Returns any error from the request.
    pub async fn retrieve(
        client: &Client,
        params: Option<&Map<String, Value>>,
        options: Option<&RequestOptions>,
    ) -> Result<Self, Error> {
        let data = client.get(Self::PATH, params, options).await?;
        Ok(Self::from_value(data))
    }
}
