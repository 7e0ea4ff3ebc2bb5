use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::db::{address_repo, contact_repo, group_repo, schema};
use crate::error::AbookResult;
use crate::model::{Address, Contact, Group};

/// A whole address book as written to and read from JSON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressBookDump {
    pub exported_at: DateTime<Utc>,
    pub contacts: Vec<Contact>,
    pub addresses: Vec<Address>,
    pub groups: Vec<Group>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub contacts: usize,
    pub addresses: usize,
    pub groups: usize,
}

/// Writes the database at `db_path` to a JSON file.
pub fn export_json(db_path: &Path, json_path: &Path) -> AbookResult<()> {
    let conn = Connection::open(db_path)?;
    schema::initialize(&conn)?;

    let dump = export(&conn)?;
    std::fs::write(json_path, serde_json::to_string_pretty(&dump)?)?;
    info!(path = %json_path.display(), contacts = dump.contacts.len(), "exported address book");
    Ok(())
}

/// Loads a JSON export into a new database at `db_path`.
pub fn import_json(json_path: &Path, db_path: &Path) -> AbookResult<ImportStats> {
    let json_str = std::fs::read_to_string(json_path)?;
    let dump: AddressBookDump = serde_json::from_str(&json_str)?;

    let conn = Connection::open(db_path)?;
    schema::initialize(&conn)?;

    import(&conn, &dump)
}

/// Snapshot of every table, each in its natural order. Contacts keep the
/// order they were created in so slot reconciliation behaves the same after
/// a round trip.
pub fn export(conn: &Connection) -> AbookResult<AddressBookDump> {
    Ok(AddressBookDump {
        exported_at: Utc::now(),
        contacts: contact_repo::find_in_creation_order(conn)?,
        addresses: address_repo::find_all(conn)?,
        groups: group_repo::find_all(conn)?,
    })
}

/// Inserts everything in `dump` inside one transaction.
pub fn import(conn: &Connection, dump: &AddressBookDump) -> AbookResult<ImportStats> {
    let tx = conn.unchecked_transaction()?;

    // Contacts and addresses point at each other: insert addresses without
    // their slot contacts first, then the contacts, then restore the slots.
    for address in &dump.addresses {
        let mut bare = address.clone();
        bare.primary_contact_id = None;
        bare.secondary_contact_id = None;
        address_repo::insert(&tx, &bare)?;
    }
    for contact in &dump.contacts {
        contact_repo::insert(&tx, contact)?;
    }
    for address in &dump.addresses {
        address_repo::update(&tx, address)?;
    }
    for group in &dump.groups {
        group_repo::insert(&tx, group)?;
    }

    tx.commit()?;

    let stats = ImportStats {
        contacts: dump.contacts.len(),
        addresses: dump.addresses.len(),
        groups: dump.groups.len(),
    };
    info!(?stats, "imported address book");
    Ok(stats)
}
