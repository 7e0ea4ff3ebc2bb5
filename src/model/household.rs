use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::address::Address;
use super::address_type::AddressType;
use super::contact::Contact;

/// An address together with the contacts sitting in its two slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Household {
    pub address: Address,
    pub primary: Option<Contact>,
    pub secondary: Option<Contact>,
}

impl Household {
    pub fn new(address: Address, primary: Option<Contact>, secondary: Option<Contact>) -> Self {
        Self {
            address,
            primary,
            secondary,
        }
    }

    /// Addressee as shown in the address list.
    pub fn addressee_for_display(&self) -> String {
        self.formatted(|t, p, s| t.format_for_display(p, s))
    }

    /// Addressee as printed on a mailing label.
    pub fn addressee(&self) -> String {
        self.formatted(|t, p, s| t.format_for_label(p, s))
    }

    fn formatted<F>(&self, format: F) -> String
    where
        F: Fn(AddressType, Option<&Contact>, Option<&Contact>) -> Option<String>,
    {
        if self.primary.is_none() && self.secondary.is_none() {
            return self.address.format_without_contacts();
        }
        self.address
            .address_type
            .and_then(|t| format(t, self.primary.as_ref(), self.secondary.as_ref()))
            .unwrap_or_else(|| self.address.format_without_contacts())
    }

    /// Addresses with a primary contact come first, ordered by the primary's
    /// last name then first name.
    pub fn compare_by_primary_contact(&self, other: &Household) -> Ordering {
        match (&self.primary, &other.primary) {
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
            (Some(a), Some(b)) => format!("{}{}", a.last_name, a.first_name)
                .cmp(&format!("{}{}", b.last_name, b.first_name)),
        }
    }

    /// Ordering used by the address list: (last_name, first_name) of the
    /// primary contact, addresses without one last.
    pub fn list_order(&self, other: &Household) -> Ordering {
        match (&self.primary, &other.primary) {
            (Some(a), Some(b)) => a
                .last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name)),
            _ => self.compare_by_primary_contact(other),
        }
    }
}
