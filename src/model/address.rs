use serde::{Deserialize, Serialize};

use super::address_type::AddressType;
use super::contact::Contact;
use super::ids::Id;
use crate::validation::{is_blank, is_blank_optional, is_phone_number, trim_optional};

pub const MISSING_PHONE_OR_ADDRESS: &str = "You must specify a phone number or a full address";
pub const BAD_PHONE_FORMAT: &str = "Home phone must be in the format of XXX-XXX-XXXX";

/// The user-editable part of an address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInput {
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub home_phone: Option<String>,
}

impl AddressInput {
    /// Trims every field; blank optionals become None.
    pub fn normalized(&self) -> Self {
        Self {
            address1: self.address1.trim().to_string(),
            address2: trim_optional(self.address2.as_deref()),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            zip: self.zip.trim().to_string(),
            home_phone: trim_optional(self.home_phone.as_deref()),
        }
    }
}

/// A mailing address and home phone shared by the contacts living there.
///
/// The contacts whose `address_id` points here are the linked contacts.
/// Up to two of them occupy the primary/secondary slots, which fix the
/// order names appear in on envelopes and labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: Id<Address>,
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub home_phone: Option<String>,
    pub address_type: Option<AddressType>,
    pub primary_contact_id: Option<Id<Contact>>,
    pub secondary_contact_id: Option<Id<Contact>>,
}

impl Address {
    pub fn create(input: AddressInput) -> Self {
        let input = input.normalized();
        Self {
            id: Id::generate(),
            address1: input.address1,
            address2: input.address2,
            city: input.city,
            state: input.state,
            zip: input.zip,
            home_phone: input.home_phone,
            address_type: None,
            primary_contact_id: None,
            secondary_contact_id: None,
        }
    }

    pub fn to_input(&self) -> AddressInput {
        AddressInput {
            address1: self.address1.clone(),
            address2: self.address2.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            zip: self.zip.clone(),
            home_phone: self.home_phone.clone(),
        }
    }

    /// Overwrites the editable fields, leaving links and type alone.
    pub fn apply(&mut self, input: AddressInput) {
        let input = input.normalized();
        self.address1 = input.address1;
        self.address2 = input.address2;
        self.city = input.city;
        self.state = input.state;
        self.zip = input.zip;
        self.home_phone = input.home_phone;
    }

    /// Full error messages; empty when the address may be saved.
    pub fn validation_errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if is_blank_optional(self.home_phone.as_deref()) && self.lacks_postal_address() {
            errors.push(MISSING_PHONE_OR_ADDRESS.to_string());
        }
        if let Some(phone) = self.home_phone.as_deref().filter(|p| !is_blank(p)) {
            if !is_phone_number(phone) {
                errors.push(BAD_PHONE_FORMAT.to_string());
            }
        }
        errors
    }

    pub fn is_valid(&self) -> bool {
        self.validation_errors().is_empty()
    }

    /// True if any of address1, city, state or zip is blank.
    pub fn lacks_postal_address(&self) -> bool {
        is_blank(&self.address1) || is_blank(&self.city) || is_blank(&self.state) || is_blank(&self.zip)
    }

    /// Whether the address may join a group.
    pub fn is_eligible_for_group(&self) -> bool {
        !is_blank(&self.address1)
    }

    /// Compares the user-editable fields. `None` always counts as different.
    pub fn different_from(&self, other: Option<&Address>) -> bool {
        match other {
            None => true,
            Some(o) => {
                self.address1 != o.address1
                    || self.address2 != o.address2
                    || self.city != o.city
                    || self.state != o.state
                    || self.zip != o.zip
                    || self.home_phone != o.home_phone
            }
        }
    }

    /// "address1[, address2], city, state zip"
    pub fn mailing_address(&self) -> String {
        let mut ma = self.address1.clone();
        if let Some(a2) = self.address2.as_deref().filter(|a| !is_blank(a)) {
            ma.push_str(", ");
            ma.push_str(a2);
        }
        ma.push_str(&format!(", {}", self.city_line()));
        ma
    }

    pub fn city_line(&self) -> String {
        format!("{}, {} {}", self.city, self.state, self.zip)
    }

    /// Plain rendering used when nobody is linked: the street address, or the
    /// phone number when there is no street.
    pub fn format_without_contacts(&self) -> String {
        if !is_blank(&self.address1) {
            let mut s = self.address1.clone();
            if let Some(a2) = self.address2.as_deref().filter(|a| !is_blank(a)) {
                s.push(' ');
                s.push_str(a2);
            }
            s.push_str(&format!(", {}", self.city_line()));
            s
        } else {
            self.home_phone.clone().unwrap_or_default()
        }
    }

    pub fn has_slot_contacts(&self) -> bool {
        self.primary_contact_id.is_some() || self.secondary_contact_id.is_some()
    }

    /// Clears whichever slot holds `contact_id`.
    pub fn clear_slot(&mut self, contact_id: Id<Contact>) {
        if self.primary_contact_id == Some(contact_id) {
            self.primary_contact_id = None;
        }
        if self.secondary_contact_id == Some(contact_id) {
            self.secondary_contact_id = None;
        }
    }

    /// Drops the secondary contact when the type only names one person.
    pub fn set_address_type(&mut self, address_type: AddressType) {
        self.address_type = Some(address_type);
        if address_type.only_one_main_contact() {
            self.secondary_contact_id = None;
        }
    }

    /// Re-derives the primary/secondary slots and the type from the linked
    /// contacts, given in insertion order.
    ///
    /// Occupied slots are kept when still consistent so names don't swap
    /// around on every edit. Afterwards primary and secondary never hold the
    /// same contact.
    pub fn reconcile_slots(&mut self, linked: &[Id<Contact>]) {
        // A slot may only name a contact that still lives here.
        if self.primary_contact_id.is_some_and(|p| !linked.contains(&p)) {
            self.primary_contact_id = None;
        }
        if self.secondary_contact_id.is_some_and(|s| !linked.contains(&s)) {
            self.secondary_contact_id = None;
        }

        let c0 = linked.first().copied();
        let c1 = linked.get(1).copied();

        match c0 {
            Some(c) if self.primary_contact_id.is_none() => self.primary_contact_id = Some(c),
            None => self.primary_contact_id = None,
            _ => {}
        }

        match c1 {
            Some(c) if self.secondary_contact_id.is_none() => self.secondary_contact_id = Some(c),
            None => self.secondary_contact_id = None,
            _ => {}
        }

        if let (Some(p), Some(s)) = (self.primary_contact_id, self.secondary_contact_id) {
            if p == s {
                self.primary_contact_id = if Some(p) == c0 { c1 } else { c0 };
            }
        }

        match (self.primary_contact_id, self.secondary_contact_id) {
            (Some(_), Some(_)) => self.address_type = Some(AddressType::Family),
            (Some(_), None) => self.address_type = Some(AddressType::Individual),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chicago() -> Address {
        Address::create(AddressInput {
            address1: "123 Main St".into(),
            address2: None,
            city: "Chicago".into(),
            state: "IL".into(),
            zip: "60601".into(),
            home_phone: None,
        })
    }

    fn ids(n: usize) -> Vec<Id<Contact>> {
        (0..n).map(|_| Id::generate()).collect()
    }

    #[test]
    fn one_linked_contact_becomes_individual_primary() {
        let mut a = chicago();
        let c = ids(1);
        a.reconcile_slots(&c);
        assert_eq!(a.primary_contact_id, Some(c[0]));
        assert_eq!(a.secondary_contact_id, None);
        assert_eq!(a.address_type, Some(AddressType::Individual));
    }

    #[test]
    fn two_linked_contacts_fill_both_slots() {
        let mut a = chicago();
        let c = ids(2);
        a.reconcile_slots(&c);
        assert_eq!(a.primary_contact_id, Some(c[0]));
        assert_eq!(a.secondary_contact_id, Some(c[1]));
        assert_eq!(a.address_type, Some(AddressType::Family));
    }

    #[test]
    fn occupied_slots_are_kept() {
        let mut a = chicago();
        let c = ids(2);
        a.primary_contact_id = Some(c[1]);
        a.secondary_contact_id = Some(c[0]);
        a.reconcile_slots(&c);
        assert_eq!(a.primary_contact_id, Some(c[1]));
        assert_eq!(a.secondary_contact_id, Some(c[0]));
    }

    #[test]
    fn filling_secondary_never_duplicates_primary() {
        let mut a = chicago();
        let c = ids(2);
        a.primary_contact_id = Some(c[1]);
        a.reconcile_slots(&c);
        assert_eq!(a.primary_contact_id, Some(c[0]));
        assert_eq!(a.secondary_contact_id, Some(c[1]));
    }

    #[test]
    fn stale_slot_contacts_are_dropped() {
        let mut a = chicago();
        let c = ids(1);
        a.primary_contact_id = Some(Id::generate());
        a.secondary_contact_id = Some(Id::generate());
        a.reconcile_slots(&c);
        assert_eq!(a.primary_contact_id, Some(c[0]));
        assert_eq!(a.secondary_contact_id, None);
        assert_eq!(a.address_type, Some(AddressType::Individual));
    }

    #[test]
    fn collision_moves_primary_to_the_other_candidate() {
        let c = ids(2);

        let mut a = chicago();
        a.primary_contact_id = Some(c[0]);
        a.secondary_contact_id = Some(c[0]);
        a.reconcile_slots(&c);
        assert_eq!(a.primary_contact_id, Some(c[1]));
        assert_eq!(a.secondary_contact_id, Some(c[0]));

        let mut b = chicago();
        b.primary_contact_id = Some(c[1]);
        b.secondary_contact_id = Some(c[1]);
        b.reconcile_slots(&c);
        assert_eq!(b.primary_contact_id, Some(c[0]));
        assert_eq!(b.secondary_contact_id, Some(c[1]));
    }

    #[test]
    fn no_linked_contacts_clears_slots_and_keeps_type() {
        let mut a = chicago();
        let c = ids(2);
        a.primary_contact_id = Some(c[0]);
        a.secondary_contact_id = Some(c[1]);
        a.address_type = Some(AddressType::MarriedCouple);
        a.reconcile_slots(&[]);
        assert_eq!(a.primary_contact_id, None);
        assert_eq!(a.secondary_contact_id, None);
        assert_eq!(a.address_type, Some(AddressType::MarriedCouple));
    }

    #[test]
    fn clearing_a_slot_then_reconciling_promotes_next_contact() {
        let mut a = chicago();
        let c = ids(3);
        a.reconcile_slots(&c[..2]);

        a.clear_slot(c[0]);
        a.reconcile_slots(&c[1..]);
        assert_eq!(a.primary_contact_id, Some(c[2]));
        assert_eq!(a.secondary_contact_id, Some(c[1]));
        assert_eq!(a.address_type, Some(AddressType::Family));
    }

    #[test]
    fn single_contact_type_drops_secondary() {
        let mut a = chicago();
        let c = ids(2);
        a.reconcile_slots(&c);
        a.set_address_type(AddressType::SingleParent);
        assert_eq!(a.secondary_contact_id, None);
        assert_eq!(a.primary_contact_id, Some(c[0]));
    }

    #[test]
    fn phone_only_address_is_valid() {
        let a = Address::create(AddressInput {
            home_phone: Some("312-555-1234".into()),
            ..Default::default()
        });
        assert!(a.is_valid());
    }

    #[test]
    fn blank_phone_and_city_is_invalid() {
        let mut a = chicago();
        a.city = String::new();
        assert_eq!(a.validation_errors(), vec![MISSING_PHONE_OR_ADDRESS.to_string()]);
    }

    #[test]
    fn undashed_phone_fails_format() {
        let mut a = chicago();
        a.home_phone = Some("3125551234".into());
        assert_eq!(a.validation_errors(), vec![BAD_PHONE_FORMAT.to_string()]);
    }

    #[test]
    fn different_from_compares_editable_fields() {
        let a = chicago();
        let copy = Address::create(a.to_input());
        assert!(!a.different_from(Some(&copy)));
        assert!(a.different_from(None));

        let mut zip = copy.clone();
        zip.zip = "60602".into();
        assert!(a.different_from(Some(&zip)));

        let mut phone = copy.clone();
        phone.home_phone = Some("312-555-1234".into());
        assert!(a.different_from(Some(&phone)));
    }

    #[test]
    fn renders_without_contacts() {
        let mut a = chicago();
        a.address2 = Some("Apt 4".into());
        assert_eq!(a.format_without_contacts(), "123 Main St Apt 4, Chicago, IL 60601");
        assert_eq!(a.mailing_address(), "123 Main St, Apt 4, Chicago, IL 60601");

        let phone_only = Address::create(AddressInput {
            home_phone: Some("312-555-1234".into()),
            ..Default::default()
        });
        assert_eq!(phone_only.format_without_contacts(), "312-555-1234");
    }

    #[test]
    fn input_is_trimmed() {
        let a = Address::create(AddressInput {
            address1: "  1 Elm  ".into(),
            address2: Some("   ".into()),
            city: "Alsip ".into(),
            state: " IL".into(),
            zip: "60803".into(),
            home_phone: Some(" ".into()),
        });
        assert_eq!(a.address1, "1 Elm");
        assert_eq!(a.address2, None);
        assert_eq!(a.home_phone, None);
        assert!(!a.lacks_postal_address());
    }
}
