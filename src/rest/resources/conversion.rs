//! Currency conversions between wallet balances.

use crate::rest::{Create, List, Retrieve};

define_resource! {
    /// A conversion, usually booked against a [`Quote`](super::Quote).
    Conversion => "/api/v1/conversions"
}

impl Create for Conversion {}
impl Retrieve for Conversion {}
impl List for Conversion {}
