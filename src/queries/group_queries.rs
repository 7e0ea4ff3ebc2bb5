use rusqlite::Connection;

use crate::db::group_repo;
use crate::error::{AbookError, AbookResult};
use crate::model::{Address, Group, Household, Id, LabelSheet, LabelTemplate, MailingLabel};
use crate::queries::address_queries;

/// All groups ordered by name.
pub fn find_for_list(conn: &Connection) -> AbookResult<Vec<Group>> {
    group_repo::find_all(conn)
}

pub fn find_group_by_name(conn: &Connection, name: &str) -> AbookResult<Option<Group>> {
    group_repo::find_by_name(conn, name)
}

/// Eligible addresses that are not yet members of the group.
pub fn addresses_not_included(conn: &Connection, group_id: Id<Group>) -> AbookResult<Vec<Address>> {
    let group = find_group(conn, group_id)?;
    Ok(address_queries::find_all_eligible_for_group(conn)?
        .into_iter()
        .filter(|a| !group.contains(a.id))
        .collect())
}

/// Members in address-list order.
pub fn group_members(conn: &Connection, group_id: Id<Group>) -> AbookResult<Vec<Household>> {
    let group = match group_repo::find_by_id(conn, group_id)? {
        Some(g) => g,
        None => return Ok(Vec::new()),
    };

    Ok(address_queries::find_for_list(conn)?
        .into_iter()
        .filter(|h| group.contains(h.address.id))
        .collect())
}

/// Mailing labels for every member, laid out for the named sheet template.
pub fn create_labels(conn: &Connection, group_id: Id<Group>, template_id: &str) -> AbookResult<LabelSheet> {
    let template: LabelTemplate = template_id.parse()?;
    find_group(conn, group_id)?;

    let labels = group_members(conn, group_id)?
        .iter()
        .map(MailingLabel::for_household)
        .collect();
    Ok(LabelSheet::new(template, labels))
}

fn find_group(conn: &Connection, group_id: Id<Group>) -> AbookResult<Group> {
    group_repo::find_by_id(conn, group_id)?
        .ok_or_else(|| AbookError::not_found("Group", group_id))
}
