use abook::db::*;
use abook::model::*;
use abook::ops::*;
use abook::queries::*;
use abook::transfer::{self, AddressBookDump, ImportStats};

fn street(address1: &str) -> AddressInput {
    AddressInput {
        address1: address1.into(),
        address2: Some("Apt 1".into()),
        city: "Springfield".into(),
        state: "IL".into(),
        zip: "62701".into(),
        home_phone: Some("555-123-4567".into()),
    }
}

/// Two households, a homeless contact and a group.
fn populated() -> rusqlite::Connection {
    let conn = schema::test_connection();

    let oak = address_ops::create_address(&conn, street("1 Oak Ave"), None).unwrap();
    let john = contact_ops::add_contact(&conn, "John", "Doe", None, Some("Mr.")).unwrap();
    let jane = contact_ops::add_contact(&conn, "Jane", "Doe", Some("Q"), Some("Mrs.")).unwrap();
    contact_ops::assign_address(&conn, john.id, oak.id).unwrap();
    contact_ops::assign_address(&conn, jane.id, oak.id).unwrap();
    address_ops::update_address(&conn, oak.id, None, Some(AddressType::MarriedCouple)).unwrap();

    let pine = address_ops::create_address(&conn, street("2 Pine St"), None).unwrap();
    let ann = contact_ops::add_contact(&conn, "Ann", "Lee", None, None).unwrap();
    contact_ops::assign_address(&conn, ann.id, pine.id).unwrap();

    contact_ops::add_contact(&conn, "Solo", "Walker", None, None).unwrap();
    group_ops::create_group(&conn, "Christmas", vec![oak.id, pine.id]).unwrap();

    conn
}

#[test]
fn export_captures_every_table() {
    let conn = populated();
    let dump = transfer::export(&conn).unwrap();

    assert_eq!(dump.contacts.len(), 4);
    assert_eq!(dump.addresses.len(), 2);
    assert_eq!(dump.groups.len(), 1);
    let firsts: Vec<&str> = dump.contacts.iter().map(|c| c.first_name.as_str()).collect();
    assert_eq!(firsts, vec!["John", "Jane", "Ann", "Solo"]);
}

#[test]
fn import_into_fresh_database_preserves_households() {
    let source = populated();
    let dump = transfer::export(&source).unwrap();

    let target = schema::test_connection();
    let stats = transfer::import(&target, &dump).unwrap();
    assert_eq!(
        stats,
        ImportStats {
            contacts: 4,
            addresses: 2,
            groups: 1,
        }
    );

    assert_eq!(address_repo::find_all(&target).unwrap(), dump.addresses);
    assert_eq!(contact_repo::find_in_creation_order(&target).unwrap(), dump.contacts);
    assert_eq!(group_repo::find_all(&target).unwrap(), dump.groups);

    let before: Vec<String> = address_queries::find_for_list(&source)
        .unwrap()
        .iter()
        .map(|h| h.addressee_for_display())
        .collect();
    let after: Vec<String> = address_queries::find_for_list(&target)
        .unwrap()
        .iter()
        .map(|h| h.addressee_for_display())
        .collect();
    assert_eq!(after, before);
    assert_eq!(after[0], "Doe, Mr. & Mrs. John & Jane");
}

#[test]
fn dump_survives_json() {
    let conn = populated();
    let dump = transfer::export(&conn).unwrap();

    let json = serde_json::to_string_pretty(&dump).unwrap();
    let parsed: AddressBookDump = serde_json::from_str(&json).unwrap();

    let target = schema::test_connection();
    transfer::import(&target, &parsed).unwrap();
    let sheet = group_queries::find_group_by_name(&target, "Christmas")
        .unwrap()
        .map(|g| group_queries::create_labels(&target, g.id, "Avery5160").unwrap())
        .unwrap();
    assert_eq!(sheet.addressees(), vec!["Mr. & Mrs. John & Jane Doe", "Ann Lee"]);
}

#[test]
fn failed_import_leaves_database_untouched() {
    let conn = populated();
    let mut dump = transfer::export(&conn).unwrap();
    // Same contact twice violates the primary key.
    let duplicate = dump.contacts[0].clone();
    dump.contacts.push(duplicate);

    let target = schema::test_connection();
    assert!(transfer::import(&target, &dump).is_err());
    assert!(address_repo::find_all(&target).unwrap().is_empty());
    assert!(contact_repo::find_all(&target).unwrap().is_empty());
}

#[test]
fn json_file_round_trip() {
    let dir = std::env::temp_dir().join(format!("abook-transfer-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let source_db = dir.join("source.db");
    let json_path = dir.join("book.json");
    let target_db = dir.join("target.db");

    {
        let conn = rusqlite::Connection::open(&source_db).unwrap();
        schema::initialize(&conn).unwrap();
        let address = address_ops::create_address(&conn, street("1 Oak Ave"), None).unwrap();
        let c = contact_ops::add_contact(&conn, "John", "Doe", None, None).unwrap();
        contact_ops::assign_address(&conn, c.id, address.id).unwrap();
    }

    transfer::export_json(&source_db, &json_path).unwrap();
    let stats = transfer::import_json(&json_path, &target_db).unwrap();
    assert_eq!(stats.contacts, 1);
    assert_eq!(stats.addresses, 1);

    let conn = rusqlite::Connection::open(&target_db).unwrap();
    let households = address_queries::find_for_list(&conn).unwrap();
    assert_eq!(households[0].addressee_for_display(), "Doe, John");

    std::fs::remove_dir_all(&dir).ok();
}
