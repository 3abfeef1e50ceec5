//! Saved payout recipients.

use crate::rest::{Create, Delete, List, Retrieve};

define_resource! {
    /// A beneficiary that transfers can be sent to.
    Beneficiary => "/api/v1/beneficiaries"
}

impl Create for Beneficiary {}
impl Retrieve for Beneficiary {}
impl List for Beneficiary {}
impl Delete for Beneficiary {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::ApiResource;

    #[test]
    fn test_beneficiary_path() {
        assert_eq!(Beneficiary::PATH, "/api/v1/beneficiaries");
    }
}
