use rusqlite::Connection;
use tracing::{debug, error, info};

use crate::db::{address_repo, contact_repo};
use crate::error::{AbookError, AbookResult};
use crate::model::{Address, AddressInput, AddressType, Contact, Id};

pub fn create_address(
    conn: &Connection,
    input: AddressInput,
    address_type: Option<AddressType>,
) -> AbookResult<Address> {
    let mut address = Address::create(input);
    if let Some(t) = address_type {
        address.set_address_type(t);
    }

    // Nobody lives at a new address yet.
    ensure_valid(&address, address_type, 0, "create")?;
    address_repo::insert(conn, &address)?;
    info!(address_id = %address.id, "created address");
    Ok(address)
}

/// Edits the fields and/or the household type. The type must fit the number
/// of contacts living there; choosing one that only names one person clears
/// the secondary contact slot.
pub fn update_address(
    conn: &Connection,
    address_id: Id<Address>,
    input: Option<AddressInput>,
    address_type: Option<AddressType>,
) -> AbookResult<Address> {
    let mut address = find_address(conn, address_id)?;

    if let Some(fields) = input {
        address.apply(fields);
    }
    if let Some(t) = address_type {
        address.set_address_type(t);
    }

    let linked = contact_repo::find_linked_ids(conn, address_id)?.len();
    ensure_valid(&address, address_type, linked, "edit")?;
    address_repo::update(conn, &address)?;
    info!(address_id = %address.id, "updated address");
    Ok(address)
}

/// Deletes the address. Its contacts stay, without an address, and it
/// leaves every group it belonged to.
pub fn delete_address(conn: &Connection, address_id: Id<Address>) -> AbookResult<Address> {
    let address = find_address(conn, address_id)?;

    contact_repo::clear_address(conn, address_id)?;
    address_repo::delete(conn, address_id)?;
    info!(address_id = %address_id, "deleted address");
    Ok(address)
}

/// Re-derives the slot contacts and type from who lives at the address, and
/// saves the result.
pub fn reconcile(conn: &Connection, address_id: Id<Address>) -> AbookResult<Address> {
    let mut address = find_address(conn, address_id)?;
    let linked = contact_repo::find_linked_ids(conn, address_id)?;

    address.reconcile_slots(&linked);
    address_repo::update(conn, &address)?;
    debug!(
        address_id = %address_id,
        linked = linked.len(),
        primary = ?address.primary_contact_id,
        secondary = ?address.secondary_contact_id,
        "reconciled contact slots"
    );
    Ok(address)
}

/// Moves `contact_id` in and reconciles. The caller is responsible for
/// unlinking the contact from any previous address first.
pub fn link_contact(
    conn: &Connection,
    address_id: Id<Address>,
    contact_id: Id<Contact>,
) -> AbookResult<Address> {
    find_address(conn, address_id)?;
    contact_repo::set_address(conn, contact_id, Some(address_id))?;
    info!(address_id = %address_id, contact_id = %contact_id, "linked contact");
    reconcile(conn, address_id)
}

/// Clears the contact's slot, moves it out, then reconciles. Unlinking a
/// contact that does not live here only reconciles.
pub fn unlink_contact(
    conn: &Connection,
    address_id: Id<Address>,
    contact_id: Id<Contact>,
) -> AbookResult<Address> {
    let mut address = find_address(conn, address_id)?;

    address.clear_slot(contact_id);
    if let Some(contact) = contact_repo::find_by_id(conn, contact_id)? {
        if contact.address_id == Some(address_id) {
            contact_repo::set_address(conn, contact_id, None)?;
        }
    }
    address_repo::update(conn, &address)?;
    info!(address_id = %address_id, contact_id = %contact_id, "unlinked contact");

    reconcile(conn, address_id)
}

/// Unlinks a contact from every address that names it in a slot.
pub fn remove_contact_everywhere(conn: &Connection, contact_id: Id<Contact>) -> AbookResult<()> {
    for address in address_repo::find_by_slot_contact(conn, contact_id)? {
        unlink_contact(conn, address.id, contact_id)?;
    }
    Ok(())
}

fn ensure_valid(
    address: &Address,
    chosen_type: Option<AddressType>,
    linked: usize,
    action: &str,
) -> AbookResult<()> {
    let mut messages = address.validation_errors();
    messages.extend(chosen_type.and_then(|t| t.contact_count_error(linked)));
    if messages.is_empty() {
        return Ok(());
    }
    error!(address_id = %address.id, errors = ?messages, "{} address failed", action);
    Err(AbookError::Invalid {
        entity: "Address".into(),
        messages,
    })
}

pub(crate) fn find_address(conn: &Connection, address_id: Id<Address>) -> AbookResult<Address> {
    address_repo::find_by_id(conn, address_id)?
        .ok_or_else(|| AbookError::not_found("Address", address_id))
}
