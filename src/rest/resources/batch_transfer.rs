use crate::rest::{Create, List, Retrieve};

define_resource! {
    /// A group of transfers submitted together.
    BatchTransfer => "/api/v1/batch_transfers"
}

impl Create for BatchTransfer {}
impl Retrieve for BatchTransfer {}
impl List for BatchTransfer {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::ApiResource;

    #[test]
    fn test_batch_transfer_path() {
        assert_eq!(BatchTransfer::PATH, "/api/v1/batch_transfers");
    }
}
