use rusqlite::{params, Connection};

use crate::error::AbookResult;
use crate::model::{Address, Contact, Id};

const COLUMNS: &str = "id, first_name, last_name, middle_name, prefix, address_id";

pub fn insert(conn: &Connection, contact: &Contact) -> AbookResult<()> {
    conn.execute(
        "INSERT INTO contacts (id, first_name, last_name, middle_name, prefix, address_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            contact.id.to_column(),
            contact.first_name,
            contact.last_name,
            contact.middle_name,
            contact.prefix,
            contact.address_id.map(|id| id.to_column()),
        ],
    )?;
    Ok(())
}

pub fn update(conn: &Connection, contact: &Contact) -> AbookResult<()> {
    conn.execute(
        "UPDATE contacts SET first_name = ?1, last_name = ?2, middle_name = ?3, prefix = ?4,
         address_id = ?5, updated_at = datetime('now')
         WHERE id = ?6",
        params![
            contact.first_name,
            contact.last_name,
            contact.middle_name,
            contact.prefix,
            contact.address_id.map(|id| id.to_column()),
            contact.id.to_column(),
        ],
    )?;
    Ok(())
}

pub fn set_address(
    conn: &Connection,
    contact_id: Id<Contact>,
    address_id: Option<Id<Address>>,
) -> AbookResult<()> {
    conn.execute(
        "UPDATE contacts SET address_id = ?1, updated_at = datetime('now') WHERE id = ?2",
        params![address_id.map(|id| id.to_column()), contact_id.to_column()],
    )?;
    Ok(())
}

/// Detaches every contact living at `address_id`.
pub fn clear_address(conn: &Connection, address_id: Id<Address>) -> AbookResult<()> {
    conn.execute(
        "UPDATE contacts SET address_id = NULL, updated_at = datetime('now') WHERE address_id = ?1",
        params![address_id.to_column()],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, contact_id: Id<Contact>) -> AbookResult<()> {
    conn.execute(
        "DELETE FROM contacts WHERE id = ?1",
        params![contact_id.to_column()],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: Id<Contact>) -> AbookResult<Option<Contact>> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM contacts WHERE id = ?1"))?;

    let result = stmt.query_row(params![id.to_column()], |row| Ok(row_to_contact(row)));

    match result {
        Ok(contact) => Ok(Some(contact?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn find_all(conn: &Connection) -> AbookResult<Vec<Contact>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM contacts ORDER BY last_name, first_name, rowid"
    ))?;

    let contacts = stmt
        .query_map([], |row| Ok(row_to_contact(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(contacts)
}

pub fn find_in_creation_order(conn: &Connection) -> AbookResult<Vec<Contact>> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM contacts ORDER BY rowid"))?;

    let contacts = stmt
        .query_map([], |row| Ok(row_to_contact(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(contacts)
}

/// Contacts whose last name starts with `prefix`, case-insensitively.
pub fn find_by_last_name_prefix(conn: &Connection, prefix: &str) -> AbookResult<Vec<Contact>> {
    let escaped = prefix
        .to_ascii_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    let pattern = format!("{}%", escaped);
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM contacts WHERE LOWER(last_name) LIKE ?1 ESCAPE '\\'
         ORDER BY last_name, first_name, rowid"
    ))?;

    let contacts = stmt
        .query_map(params![pattern], |row| Ok(row_to_contact(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(contacts)
}

/// The contacts living at an address, in the order they were created.
pub fn find_by_address(conn: &Connection, address_id: Id<Address>) -> AbookResult<Vec<Contact>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM contacts WHERE address_id = ?1 ORDER BY rowid"
    ))?;

    let contacts = stmt
        .query_map(params![address_id.to_column()], |row| Ok(row_to_contact(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(contacts)
}

pub fn find_linked_ids(conn: &Connection, address_id: Id<Address>) -> AbookResult<Vec<Id<Contact>>> {
    Ok(find_by_address(conn, address_id)?
        .into_iter()
        .map(|c| c.id)
        .collect())
}

fn row_to_contact(row: &rusqlite::Row) -> AbookResult<Contact> {
    let id_str: String = row.get(0).map_err(rusqlite::Error::from)?;
    let address_str: Option<String> = row.get(5).map_err(rusqlite::Error::from)?;

    Ok(Contact {
        id: Id::from_column(&id_str)?,
        first_name: row.get(1).map_err(rusqlite::Error::from)?,
        last_name: row.get(2).map_err(rusqlite::Error::from)?,
        middle_name: row.get(3).map_err(rusqlite::Error::from)?,
        prefix: row.get(4).map_err(rusqlite::Error::from)?,
        address_id: address_str.as_deref().map(Id::from_column).transpose()?,
    })
}
