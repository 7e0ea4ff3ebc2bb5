use rusqlite::{params, Connection};

use crate::error::AbookResult;
use crate::model::{Address, Group, Id};

pub fn insert(conn: &Connection, group: &Group) -> AbookResult<()> {
    conn.execute(
        "INSERT INTO \"groups\" (id, name) VALUES (?1, ?2)",
        params![group.id.to_column(), group.name],
    )?;

    add_addresses(conn, group.id, &group.address_ids)
}

pub fn update(conn: &Connection, group: &Group) -> AbookResult<()> {
    conn.execute(
        "UPDATE \"groups\" SET name = ?1 WHERE id = ?2",
        params![group.name, group.id.to_column()],
    )?;
    Ok(())
}

pub fn set_addresses(conn: &Connection, group_id: Id<Group>, address_ids: &[Id<Address>]) -> AbookResult<()> {
    conn.execute(
        "DELETE FROM group_addresses WHERE group_id = ?1",
        params![group_id.to_column()],
    )?;

    add_addresses(conn, group_id, address_ids)
}

pub fn add_addresses(conn: &Connection, group_id: Id<Group>, address_ids: &[Id<Address>]) -> AbookResult<()> {
    for address_id in address_ids {
        conn.execute(
            "INSERT OR IGNORE INTO group_addresses (group_id, address_id) VALUES (?1, ?2)",
            params![group_id.to_column(), address_id.to_column()],
        )?;
    }
    Ok(())
}

pub fn remove_addresses(conn: &Connection, group_id: Id<Group>, address_ids: &[Id<Address>]) -> AbookResult<()> {
    for address_id in address_ids {
        conn.execute(
            "DELETE FROM group_addresses WHERE group_id = ?1 AND address_id = ?2",
            params![group_id.to_column(), address_id.to_column()],
        )?;
    }
    Ok(())
}

pub fn delete(conn: &Connection, group_id: Id<Group>) -> AbookResult<()> {
    conn.execute(
        "DELETE FROM group_addresses WHERE group_id = ?1",
        params![group_id.to_column()],
    )?;
    conn.execute(
        "DELETE FROM \"groups\" WHERE id = ?1",
        params![group_id.to_column()],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: Id<Group>) -> AbookResult<Option<Group>> {
    let mut stmt = conn.prepare("SELECT id, name FROM \"groups\" WHERE id = ?1")?;

    let result = stmt.query_row(params![id.to_column()], |row| {
        let id_str: String = row.get(0)?;
        let name: String = row.get(1)?;
        Ok((id_str, name))
    });

    match result {
        Ok((id_str, name)) => {
            let group_id = Id::from_column(&id_str)?;
            let address_ids = find_address_ids(conn, group_id)?;
            Ok(Some(Group {
                id: group_id,
                name,
                address_ids,
            }))
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All groups ordered by name.
pub fn find_all(conn: &Connection) -> AbookResult<Vec<Group>> {
    let mut stmt = conn.prepare("SELECT id, name FROM \"groups\" ORDER BY name, rowid")?;

    let rows: Vec<(String, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut groups = Vec::new();
    for (id_str, name) in rows {
        let group_id = Id::from_column(&id_str)?;
        let address_ids = find_address_ids(conn, group_id)?;
        groups.push(Group {
            id: group_id,
            name,
            address_ids,
        });
    }

    Ok(groups)
}

pub fn find_by_name(conn: &Connection, name: &str) -> AbookResult<Option<Group>> {
    let groups = find_all(conn)?;
    Ok(groups
        .into_iter()
        .find(|g| g.name.eq_ignore_ascii_case(name)))
}

// Members in the order they were added.
fn find_address_ids(conn: &Connection, group_id: Id<Group>) -> AbookResult<Vec<Id<Address>>> {
    let mut stmt = conn.prepare(
        "SELECT address_id FROM group_addresses WHERE group_id = ?1 ORDER BY rowid",
    )?;

    let ids = stmt
        .query_map(params![group_id.to_column()], |row| {
            let id_str: String = row.get(0)?;
            Ok(id_str)
        })?
        .collect::<Result<Vec<_>, _>>()?
        .into_iter()
        .map(|s| Id::from_column(&s))
        .collect::<AbookResult<Vec<_>>>()?;

    Ok(ids)
}
