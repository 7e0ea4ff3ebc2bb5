use serde::{Deserialize, Serialize};

use super::address::Address;
use super::ids::Id;

/// A named mailing list of addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: Id<Group>,
    pub name: String,
    pub address_ids: Vec<Id<Address>>,
}

impl Group {
    pub fn create(name: String) -> Self {
        Self {
            id: Id::generate(),
            name,
            address_ids: Vec::new(),
        }
    }

    pub fn contains(&self, address_id: Id<Address>) -> bool {
        self.address_ids.contains(&address_id)
    }
}
