use rusqlite::Connection;

use crate::error::AbookResult;

/// Initialize the database schema. Creates all tables if they don't exist
/// and seeds the address type lookup table.
pub fn initialize(conn: &Connection) -> AbookResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS address_types (
            description TEXT PRIMARY KEY NOT NULL
        );

        INSERT OR IGNORE INTO address_types (description) VALUES
            ('Individual'),
            ('Family'),
            ('Married Couple'),
            ('Unmarried Couple'),
            ('Single Parent');

        CREATE TABLE IF NOT EXISTS addresses (
            id TEXT PRIMARY KEY NOT NULL,
            address1 TEXT NOT NULL DEFAULT '',
            address2 TEXT,
            city TEXT NOT NULL DEFAULT '',
            state TEXT NOT NULL DEFAULT '',
            zip TEXT NOT NULL DEFAULT '',
            home_phone TEXT,
            address_type TEXT REFERENCES address_types(description),
            contact1_id TEXT REFERENCES contacts(id) ON DELETE SET NULL,
            contact2_id TEXT REFERENCES contacts(id) ON DELETE SET NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS contacts (
            id TEXT PRIMARY KEY NOT NULL,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            middle_name TEXT,
            prefix TEXT,
            address_id TEXT REFERENCES addresses(id) ON DELETE SET NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS contacts_address_id ON contacts(address_id);

        CREATE TABLE IF NOT EXISTS \"groups\" (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS group_addresses (
            group_id TEXT NOT NULL REFERENCES \"groups\"(id) ON DELETE CASCADE,
            address_id TEXT NOT NULL REFERENCES addresses(id) ON DELETE CASCADE,
            PRIMARY KEY (group_id, address_id)
        );

        PRAGMA foreign_keys = ON;
        ",
    )?;
    Ok(())
}

/// Create an in-memory connection for testing. Available in test builds.
pub fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}
