use serde::{Deserialize, Serialize};

use super::address::Address;
use super::ids::Id;

/// A person in the address book. Lives at zero or one Address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Id<Contact>,
    pub first_name: String,
    pub last_name: String,
    pub middle_name: Option<String>,
    pub prefix: Option<String>,
    pub address_id: Option<Id<Address>>,
}

impl Contact {
    pub fn create(first_name: String, last_name: String) -> Self {
        Self {
            id: Id::generate(),
            first_name,
            last_name,
            middle_name: None,
            prefix: None,
            address_id: None,
        }
    }

    /// "Last, First" as shown in contact lists.
    pub fn list_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }

    pub fn full_name(&self) -> String {
        match &self.middle_name {
            Some(middle) => format!("{} {} {}", self.first_name, middle, self.last_name),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }

    pub fn prefix_str(&self) -> &str {
        self.prefix.as_deref().unwrap_or("")
    }
}
