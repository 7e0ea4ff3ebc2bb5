use rusqlite::Connection;
use tracing::{info, warn};

use crate::db::{address_repo, contact_repo};
use crate::error::{AbookError, AbookResult};
use crate::model::{Address, AddressInput, Contact, Id};
use crate::ops::address_ops;
use crate::validation::{self, trim_optional};

pub fn add_contact(
    conn: &Connection,
    first_name: &str,
    last_name: &str,
    middle_name: Option<&str>,
    prefix: Option<&str>,
) -> AbookResult<Contact> {
    let mut contact = Contact::create(
        validation::non_blank(first_name, "first name")?,
        validation::non_blank(last_name, "last name")?,
    );
    contact.middle_name = trim_optional(middle_name);
    contact.prefix = trim_optional(prefix);

    contact_repo::insert(conn, &contact)?;
    info!(contact_id = %contact.id, "created contact");
    Ok(contact)
}

pub fn update_contact(
    conn: &Connection,
    contact_id: Id<Contact>,
    first_name: Option<&str>,
    last_name: Option<&str>,
    middle_name: Option<Option<&str>>,
    prefix: Option<Option<&str>>,
) -> AbookResult<Contact> {
    let mut contact = find_contact(conn, contact_id)?;

    if let Some(first) = first_name {
        contact.first_name = validation::non_blank(first, "first name")?;
    }
    if let Some(last) = last_name {
        contact.last_name = validation::non_blank(last, "last name")?;
    }
    if let Some(middle) = middle_name {
        contact.middle_name = trim_optional(middle);
    }
    if let Some(p) = prefix {
        contact.prefix = trim_optional(p);
    }

    contact_repo::update(conn, &contact)?;
    Ok(contact)
}

/// Deletes the contact. The address it lived at stays, minus this contact.
pub fn delete_contact(conn: &Connection, contact_id: Id<Contact>) -> AbookResult<Contact> {
    let contact = find_contact(conn, contact_id)?;

    if let Some(address_id) = contact.address_id {
        address_ops::unlink_contact(conn, address_id, contact_id)?;
    }
    address_ops::remove_contact_everywhere(conn, contact_id)?;
    contact_repo::delete(conn, contact_id)?;
    info!(contact_id = %contact_id, "deleted contact");
    Ok(contact)
}

/// Moves the contact to `address_id`, unlinking it from its old address.
pub fn assign_address(
    conn: &Connection,
    contact_id: Id<Contact>,
    address_id: Id<Address>,
) -> AbookResult<Contact> {
    let contact = find_contact(conn, contact_id)?;
    address_ops::find_address(conn, address_id)?;

    match contact.address_id {
        Some(current) if current == address_id => {
            address_ops::reconcile(conn, address_id)?;
        }
        Some(old) => {
            address_ops::unlink_contact(conn, old, contact_id)?;
            address_ops::link_contact(conn, address_id, contact_id)?;
        }
        None => {
            address_ops::link_contact(conn, address_id, contact_id)?;
        }
    }

    find_contact(conn, contact_id)
}

/// Clears the contact's address and unlinks it from that address.
pub fn remove_address_from_contact(conn: &Connection, contact_id: Id<Contact>) -> AbookResult<Contact> {
    let mut contact = find_contact(conn, contact_id)?;

    let Some(old_address_id) = contact.address_id else {
        return Ok(contact);
    };

    contact.address_id = None;
    contact_repo::update(conn, &contact)?;
    address_ops::unlink_contact(conn, old_address_id, contact_id)?;
    Ok(contact)
}

/// Moves `contact_id` in with `other_id`.
pub fn share_address(
    conn: &Connection,
    contact_id: Id<Contact>,
    other_id: Id<Contact>,
) -> AbookResult<Contact> {
    let other = find_contact(conn, other_id)?;
    let address_id = other.address_id.ok_or_else(|| AbookError::NoAddressToShare {
        name: other.full_name(),
    })?;
    assign_address(conn, contact_id, address_id)
}

/// Sets the contact's address from typed-in fields.
///
/// Unchanged fields are a no-op. A contact without an address gets a new
/// one; otherwise the current address is edited in place, which changes it
/// for everybody living there.
pub fn set_contact_address(
    conn: &Connection,
    contact_id: Id<Contact>,
    input: AddressInput,
) -> AbookResult<Contact> {
    let contact = find_contact(conn, contact_id)?;

    let candidate = Address::create(input);
    let messages = candidate.validation_errors();
    if !messages.is_empty() {
        warn!(contact_id = %contact_id, errors = ?messages, "rejected address for contact");
        return Err(AbookError::Invalid {
            entity: "Address".into(),
            messages,
        });
    }

    let current = match contact.address_id {
        Some(id) => address_repo::find_by_id(conn, id)?,
        None => None,
    };

    if !candidate.different_from(current.as_ref()) {
        return Ok(contact);
    }

    match current {
        None => {
            address_repo::insert(conn, &candidate)?;
            info!(address_id = %candidate.id, "created address");
            address_ops::link_contact(conn, candidate.id, contact_id)?;
        }
        Some(mut address) => {
            let residents = contact_repo::find_linked_ids(conn, address.id)?.len();
            address.apply(candidate.to_input());
            address_repo::update(conn, &address)?;
            info!(address_id = %address.id, residents, "updated address from contact");
        }
    }

    find_contact(conn, contact_id)
}

fn find_contact(conn: &Connection, contact_id: Id<Contact>) -> AbookResult<Contact> {
    contact_repo::find_by_id(conn, contact_id)?
        .ok_or_else(|| AbookError::not_found("Contact", contact_id))
}
