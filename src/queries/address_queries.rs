use rusqlite::Connection;

use crate::db::{address_repo, contact_repo};
use crate::error::AbookResult;
use crate::model::{Address, AddressType, Contact, Household, Id};

/// Every address with its slot contacts, ordered by the primary contact's
/// last then first name. Addresses without a primary contact come last, in
/// the order they were created.
pub fn find_for_list(conn: &Connection) -> AbookResult<Vec<Household>> {
    let mut households = address_repo::find_all(conn)?
        .into_iter()
        .map(|a| resolve(conn, a))
        .collect::<AbookResult<Vec<_>>>()?;

    households.sort_by(|a, b| a.list_order(b));
    Ok(households)
}

pub fn find_all_eligible_for_group(conn: &Connection) -> AbookResult<Vec<Address>> {
    address_repo::find_eligible_for_group(conn)
}

pub fn get_household(conn: &Connection, address_id: Id<Address>) -> AbookResult<Option<Household>> {
    match address_repo::find_by_id(conn, address_id)? {
        Some(address) => Ok(Some(resolve(conn, address)?)),
        None => Ok(None),
    }
}

/// Looks up the slot contacts of an address.
pub fn resolve(conn: &Connection, address: Address) -> AbookResult<Household> {
    let primary = slot_contact(conn, address.primary_contact_id)?;
    let secondary = slot_contact(conn, address.secondary_contact_id)?;
    Ok(Household::new(address, primary, secondary))
}

pub fn linked_contacts(conn: &Connection, address_id: Id<Address>) -> AbookResult<Vec<Contact>> {
    contact_repo::find_by_address(conn, address_id)
}

/// True if the address was never saved or lacks a full postal address.
pub fn is_empty(conn: &Connection, address: &Address) -> AbookResult<bool> {
    let saved = address_repo::find_by_id(conn, address.id)?.is_some();
    Ok(!saved || address.lacks_postal_address())
}

/// Household types that fit the number of people living at the address.
pub fn valid_address_types(conn: &Connection, address_id: Id<Address>) -> AbookResult<Vec<AddressType>> {
    let linked = contact_repo::find_linked_ids(conn, address_id)?.len();
    Ok(AddressType::valid_for_contact_count(linked))
}

fn slot_contact(conn: &Connection, id: Option<Id<Contact>>) -> AbookResult<Option<Contact>> {
    match id {
        Some(id) => contact_repo::find_by_id(conn, id),
        None => Ok(None),
    }
}
