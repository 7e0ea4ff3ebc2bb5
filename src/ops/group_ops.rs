use rusqlite::Connection;
use tracing::{info, warn};

use crate::db::{address_repo, group_repo};
use crate::error::{AbookError, AbookResult};
use crate::model::{Address, Group, Id};
use crate::validation;

pub fn create_group(
    conn: &Connection,
    name: &str,
    address_ids: Vec<Id<Address>>,
) -> AbookResult<Group> {
    let valid_name = validation::non_blank(name, "name")?;

    let mut group = Group::create(valid_name);
    group.address_ids = eligible(conn, address_ids)?;

    group_repo::insert(conn, &group)?;
    info!(group_id = %group.id, members = group.address_ids.len(), "created group");
    Ok(group)
}

pub fn rename_group(conn: &Connection, group_id: Id<Group>, name: &str) -> AbookResult<Group> {
    let mut group = find_group(conn, group_id)?;
    group.name = validation::non_blank(name, "name")?;
    group_repo::update(conn, &group)?;
    Ok(group)
}

/// Adds eligible addresses; ones already in the group are left as they are.
pub fn add_addresses(
    conn: &Connection,
    group_id: Id<Group>,
    address_ids: Vec<Id<Address>>,
) -> AbookResult<Group> {
    find_group(conn, group_id)?;
    let valid = eligible(conn, address_ids)?;
    group_repo::add_addresses(conn, group_id, &valid)?;

    find_group(conn, group_id)
}

pub fn remove_addresses(
    conn: &Connection,
    group_id: Id<Group>,
    address_ids: Vec<Id<Address>>,
) -> AbookResult<Group> {
    find_group(conn, group_id)?;
    group_repo::remove_addresses(conn, group_id, &address_ids)?;

    find_group(conn, group_id)
}

/// Replaces the membership wholesale.
pub fn set_addresses(
    conn: &Connection,
    group_id: Id<Group>,
    address_ids: Vec<Id<Address>>,
) -> AbookResult<Group> {
    find_group(conn, group_id)?;
    let valid = eligible(conn, address_ids)?;
    group_repo::set_addresses(conn, group_id, &valid)?;

    find_group(conn, group_id)
}

pub fn delete_group(conn: &Connection, group_id: Id<Group>) -> AbookResult<Group> {
    let group = find_group(conn, group_id)?;
    group_repo::delete(conn, group_id)?;
    info!(group_id = %group_id, "deleted group");
    Ok(group)
}

// Drops unknown and street-less addresses, and repeats.
fn eligible(conn: &Connection, address_ids: Vec<Id<Address>>) -> AbookResult<Vec<Id<Address>>> {
    let mut valid: Vec<Id<Address>> = Vec::new();
    for id in address_ids {
        if valid.contains(&id) {
            continue;
        }
        match address_repo::find_by_id(conn, id)? {
            Some(address) if address.is_eligible_for_group() => valid.push(id),
            _ => warn!(address_id = %id, "skipping address not eligible for groups"),
        }
    }
    Ok(valid)
}

pub(crate) fn find_group(conn: &Connection, group_id: Id<Group>) -> AbookResult<Group> {
    group_repo::find_by_id(conn, group_id)?
        .ok_or_else(|| AbookError::not_found("Group", group_id))
}
