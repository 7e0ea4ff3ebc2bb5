use rusqlite::Connection;

use crate::db::contact_repo;
use crate::error::AbookResult;
use crate::model::{Contact, Id};

/// All contacts by last name, then first name.
pub fn find_for_list(conn: &Connection) -> AbookResult<Vec<Contact>> {
    contact_repo::find_all(conn)
}

/// Contacts whose last name starts with `prefix`.
pub fn find_by_last_name(conn: &Connection, prefix: &str) -> AbookResult<Vec<Contact>> {
    contact_repo::find_by_last_name_prefix(conn, prefix.trim())
}

pub fn get_contact(conn: &Connection, contact_id: Id<Contact>) -> AbookResult<Option<Contact>> {
    contact_repo::find_by_id(conn, contact_id)
}
