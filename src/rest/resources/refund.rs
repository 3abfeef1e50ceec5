use crate::rest::{Create, List, Retrieve};

define_resource! {
    /// A refund of a captured payment intent.
    Refund => "/api/v1/pa/refunds"
}

impl Create for Refund {}
impl Retrieve for Refund {}
impl List for Refund {}
