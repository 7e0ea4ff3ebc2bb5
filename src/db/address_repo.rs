use rusqlite::{params, Connection};

use crate::error::{AbookError, AbookResult};
use crate::model::{Address, AddressType, Contact, Id};

const COLUMNS: &str =
    "id, address1, address2, city, state, zip, home_phone, address_type, contact1_id, contact2_id";

pub fn insert(conn: &Connection, address: &Address) -> AbookResult<()> {
    conn.execute(
        "INSERT INTO addresses (id, address1, address2, city, state, zip, home_phone, address_type, contact1_id, contact2_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            address.id.to_column(),
            address.address1,
            address.address2,
            address.city,
            address.state,
            address.zip,
            address.home_phone,
            address.address_type.map(|t| t.description()),
            address.primary_contact_id.map(|id| id.to_column()),
            address.secondary_contact_id.map(|id| id.to_column()),
        ],
    )?;
    Ok(())
}

pub fn update(conn: &Connection, address: &Address) -> AbookResult<()> {
    conn.execute(
        "UPDATE addresses SET address1 = ?1, address2 = ?2, city = ?3, state = ?4, zip = ?5,
         home_phone = ?6, address_type = ?7, contact1_id = ?8, contact2_id = ?9,
         updated_at = datetime('now')
         WHERE id = ?10",
        params![
            address.address1,
            address.address2,
            address.city,
            address.state,
            address.zip,
            address.home_phone,
            address.address_type.map(|t| t.description()),
            address.primary_contact_id.map(|id| id.to_column()),
            address.secondary_contact_id.map(|id| id.to_column()),
            address.id.to_column(),
        ],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, address_id: Id<Address>) -> AbookResult<()> {
    conn.execute(
        "DELETE FROM group_addresses WHERE address_id = ?1",
        params![address_id.to_column()],
    )?;
    conn.execute(
        "DELETE FROM addresses WHERE id = ?1",
        params![address_id.to_column()],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: Id<Address>) -> AbookResult<Option<Address>> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM addresses WHERE id = ?1"))?;

    let result = stmt.query_row(params![id.to_column()], |row| Ok(row_to_address(row)));

    match result {
        Ok(address) => Ok(Some(address?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All addresses in insertion order.
pub fn find_all(conn: &Connection) -> AbookResult<Vec<Address>> {
    let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM addresses ORDER BY rowid"))?;

    let addresses = stmt
        .query_map([], |row| Ok(row_to_address(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(addresses)
}

/// Addresses with a street line, in insertion order.
pub fn find_eligible_for_group(conn: &Connection) -> AbookResult<Vec<Address>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM addresses WHERE TRIM(address1) <> '' ORDER BY rowid"
    ))?;

    let addresses = stmt
        .query_map([], |row| Ok(row_to_address(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(addresses)
}

/// Addresses that name `contact_id` in either slot.
pub fn find_by_slot_contact(conn: &Connection, contact_id: Id<Contact>) -> AbookResult<Vec<Address>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM addresses WHERE contact1_id = ?1 OR contact2_id = ?1 ORDER BY rowid"
    ))?;

    let addresses = stmt
        .query_map(params![contact_id.to_column()], |row| Ok(row_to_address(row)))?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    Ok(addresses)
}

fn row_to_address(row: &rusqlite::Row) -> AbookResult<Address> {
    let id_str: String = row.get(0).map_err(rusqlite::Error::from)?;
    let type_str: Option<String> = row.get(7).map_err(rusqlite::Error::from)?;
    let primary_str: Option<String> = row.get(8).map_err(rusqlite::Error::from)?;
    let secondary_str: Option<String> = row.get(9).map_err(rusqlite::Error::from)?;

    let address_type = match type_str {
        Some(s) => Some(
            AddressType::from_description(&s).ok_or(AbookError::InvalidAddressType(s))?,
        ),
        None => None,
    };

    Ok(Address {
        id: Id::from_column(&id_str)?,
        address1: row.get(1).map_err(rusqlite::Error::from)?,
        address2: row.get(2).map_err(rusqlite::Error::from)?,
        city: row.get(3).map_err(rusqlite::Error::from)?,
        state: row.get(4).map_err(rusqlite::Error::from)?,
        zip: row.get(5).map_err(rusqlite::Error::from)?,
        home_phone: row.get(6).map_err(rusqlite::Error::from)?,
        address_type,
        primary_contact_id: primary_str.as_deref().map(Id::from_column).transpose()?,
        secondary_contact_id: secondary_str.as_deref().map(Id::from_column).transpose()?,
    })
}
