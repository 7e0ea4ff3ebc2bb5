use abook::error::AbookError;
use abook::db::*;
use abook::model::*;
use abook::ops::*;
use abook::queries::*;

fn setup() -> rusqlite::Connection {
    schema::test_connection()
}

fn street(address1: &str) -> AddressInput {
    AddressInput {
        address1: address1.into(),
        address2: None,
        city: "Springfield".into(),
        state: "IL".into(),
        zip: "62701".into(),
        home_phone: None,
    }
}

/// Creates an address and moves the named contacts in, in order.
fn household_of(conn: &rusqlite::Connection, address1: &str, people: &[(&str, &str, &str)]) -> Address {
    let address = address_ops::create_address(conn, street(address1), None).unwrap();
    for (prefix, first, last) in people {
        let c = contact_ops::add_contact(conn, first, last, None, Some(prefix)).unwrap();
        contact_ops::assign_address(conn, c.id, address.id).unwrap();
    }
    address_repo::find_by_id(conn, address.id).unwrap().unwrap()
}

// ==========================================================================
// CONTACT QUERIES TESTS
// ==========================================================================

#[test]
fn contacts_listed_by_name() {
    let conn = setup();
    contact_ops::add_contact(&conn, "John", "Smith", None, None).unwrap();
    contact_ops::add_contact(&conn, "Ann", "Brown", None, None).unwrap();

    let names: Vec<String> = contact_queries::find_for_list(&conn)
        .unwrap()
        .iter()
        .map(|c| c.list_name())
        .collect();
    assert_eq!(names, vec!["Brown, Ann", "Smith, John"]);
}

#[test]
fn find_by_last_name_prefix() {
    let conn = setup();
    contact_ops::add_contact(&conn, "John", "Doe", None, None).unwrap();
    contact_ops::add_contact(&conn, "Dan", "Dunn", None, None).unwrap();
    contact_ops::add_contact(&conn, "Ann", "Adams", None, None).unwrap();

    let found = contact_queries::find_by_last_name(&conn, " d ").unwrap();
    let names: Vec<&str> = found.iter().map(|c| c.last_name.as_str()).collect();
    assert_eq!(names, vec!["Doe", "Dunn"]);
    assert!(contact_queries::find_by_last_name(&conn, "x").unwrap().is_empty());
}

#[test]
fn get_contact_by_id() {
    let conn = setup();
    let c = contact_ops::add_contact(&conn, "John", "Doe", None, None).unwrap();
    assert_eq!(contact_queries::get_contact(&conn, c.id).unwrap(), Some(c));
    assert_eq!(contact_queries::get_contact(&conn, Id::generate()).unwrap(), None);
}

// ==========================================================================
// ADDRESS QUERIES TESTS
// ==========================================================================

#[test]
fn addresses_listed_by_primary_contact() {
    let conn = setup();
    let empty = address_ops::create_address(&conn, street("9 Vacant Ln"), None).unwrap();
    household_of(&conn, "1 Oak Ave", &[("", "Zed", "Young")]);
    household_of(&conn, "2 Pine St", &[("Mr.", "John", "Doe"), ("Mrs.", "Jane", "Doe")]);

    let list = address_queries::find_for_list(&conn).unwrap();
    let addressees: Vec<String> = list.iter().map(|h| h.addressee_for_display()).collect();
    assert_eq!(
        addressees,
        vec![
            "Doe, Mr. & Mrs. John & Jane & Family".to_string(),
            "Young, Zed".to_string(),
            "9 Vacant Ln, Springfield, IL 62701".to_string(),
        ]
    );
    assert_eq!(list[2].address.id, empty.id);
}

#[test]
fn get_household_resolves_slot_contacts() {
    let conn = setup();
    let address = household_of(&conn, "1 Oak Ave", &[("Mr.", "John", "Doe"), ("Mrs.", "Jane", "Doe")]);

    let h = address_queries::get_household(&conn, address.id).unwrap().unwrap();
    assert_eq!(h.primary.as_ref().map(|c| c.first_name.as_str()), Some("John"));
    assert_eq!(h.secondary.as_ref().map(|c| c.first_name.as_str()), Some("Jane"));
    assert_eq!(h.addressee(), "The Doe Family");
    assert!(address_queries::get_household(&conn, Id::generate()).unwrap().is_none());
}

#[test]
fn linked_contacts_in_creation_order() {
    let conn = setup();
    let address = household_of(&conn, "1 Oak Ave", &[("", "John", "Doe"), ("", "Amy", "Doe"), ("", "Kid", "Doe")]);

    let names: Vec<String> = address_queries::linked_contacts(&conn, address.id)
        .unwrap()
        .into_iter()
        .map(|c| c.first_name)
        .collect();
    assert_eq!(names, vec!["John", "Amy", "Kid"]);
}

#[test]
fn is_empty_for_unsaved_or_incomplete_addresses() {
    let conn = setup();
    let saved = address_ops::create_address(&conn, street("1 Oak Ave"), None).unwrap();
    assert!(!address_queries::is_empty(&conn, &saved).unwrap());

    let unsaved = Address::create(street("2 Pine St"));
    assert!(address_queries::is_empty(&conn, &unsaved).unwrap());

    let phone_only = address_ops::create_address(
        &conn,
        AddressInput {
            home_phone: Some("555-123-4567".into()),
            ..AddressInput::default()
        },
        None,
    )
    .unwrap();
    assert!(address_queries::is_empty(&conn, &phone_only).unwrap());
}

#[test]
fn valid_address_types_depend_on_residents() {
    let conn = setup();
    let single = household_of(&conn, "1 Oak Ave", &[("", "John", "Doe")]);
    assert_eq!(
        address_queries::valid_address_types(&conn, single.id).unwrap(),
        vec![AddressType::Individual, AddressType::SingleParent]
    );

    let couple = household_of(&conn, "2 Pine St", &[("", "Sam", "Fox"), ("", "Pat", "Hill")]);
    assert_eq!(
        address_queries::valid_address_types(&conn, couple.id).unwrap(),
        AddressType::ALL.to_vec()
    );
}

// ==========================================================================
// GROUP QUERIES TESTS
// ==========================================================================

#[test]
fn addresses_not_included_in_group() {
    let conn = setup();
    let a = household_of(&conn, "1 Oak Ave", &[("", "Ann", "Adams")]);
    let b = household_of(&conn, "2 Pine St", &[("", "Bob", "Baker")]);
    let c = household_of(&conn, "3 Elm St", &[("", "Cy", "Clark")]);
    let group = group_ops::create_group(&conn, "Christmas", vec![a.id, b.id]).unwrap();

    let remaining: Vec<Id<Address>> = group_queries::addresses_not_included(&conn, group.id)
        .unwrap()
        .iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(remaining, vec![c.id]);
}

#[test]
fn addresses_not_included_for_missing_group_fails() {
    let conn = setup();
    assert!(matches!(
        group_queries::addresses_not_included(&conn, Id::generate()),
        Err(AbookError::NotFound { .. })
    ));
}

#[test]
fn group_members_in_list_order() {
    let conn = setup();
    let young = household_of(&conn, "1 Oak Ave", &[("", "Zed", "Young")]);
    let adams = household_of(&conn, "2 Pine St", &[("", "Ann", "Adams")]);
    household_of(&conn, "3 Elm St", &[("", "Cy", "Clark")]);
    let group = group_ops::create_group(&conn, "Christmas", vec![young.id, adams.id]).unwrap();

    let members: Vec<String> = group_queries::group_members(&conn, group.id)
        .unwrap()
        .iter()
        .map(|h| h.addressee_for_display())
        .collect();
    assert_eq!(members, vec!["Adams, Ann", "Young, Zed"]);
}

#[test]
fn find_group_by_name() {
    let conn = setup();
    let group = group_ops::create_group(&conn, "Christmas", Vec::new()).unwrap();
    let found = group_queries::find_group_by_name(&conn, "CHRISTMAS").unwrap().unwrap();
    assert_eq!(found.id, group.id);
}

#[test]
fn create_labels_for_group() {
    let conn = setup();
    let does = household_of(&conn, "1 Oak Ave", &[("Mr.", "John", "Doe"), ("Mrs.", "Jane", "Doe")]);
    let lee = household_of(&conn, "2 Pine St", &[("Dr.", "Ann", "Lee")]);
    let group = group_ops::create_group(&conn, "Christmas", vec![lee.id, does.id]).unwrap();

    let sheet = group_queries::create_labels(&conn, group.id, "avery5163").unwrap();
    assert_eq!(sheet.template, LabelTemplate::Avery5163);
    assert_eq!(sheet.addressees(), vec!["The Doe Family", "Dr. Ann Lee"]);
    assert_eq!(
        sheet.labels[1].lines,
        vec!["Dr. Ann Lee", "2 Pine St", "Springfield, IL 62701"]
    );
}

#[test]
fn create_labels_with_unknown_template_fails() {
    let conn = setup();
    let group = group_ops::create_group(&conn, "Christmas", Vec::new()).unwrap();
    assert!(matches!(
        group_queries::create_labels(&conn, group.id, "Avery1234"),
        Err(AbookError::UnknownLabelTemplate(_))
    ));
}

#[test]
fn create_labels_for_empty_group() {
    let conn = setup();
    let group = group_ops::create_group(&conn, "Christmas", Vec::new()).unwrap();
    let sheet = group_queries::create_labels(&conn, group.id, "Avery5160").unwrap();
    assert!(sheet.labels.is_empty());
}
