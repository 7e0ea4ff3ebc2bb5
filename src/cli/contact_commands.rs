use crate::cli::context::CLIContext;
use crate::model::*;
use crate::ops::*;
use crate::queries::*;

pub fn list(ctx: &CLIContext) {
    let contacts = contact_queries::find_for_list(&ctx.conn).unwrap_or_default();
    if contacts.is_empty() {
        println!("No contacts yet. Use 'add-contact' to add someone.");
        return;
    }

    println!("Contacts ({}):", contacts.len());
    for contact in &contacts {
        println!("  {}", EntityRef::Contact(contact).link_text());
    }
}

pub fn find(ctx: &CLIContext, args: &str) {
    let prefix = if !args.is_empty() {
        args.to_string()
    } else {
        match ctx.prompt("Last name starts with: ") {
            Some(s) if !s.is_empty() => s,
            _ => return,
        }
    };

    match contact_queries::find_by_last_name(&ctx.conn, &prefix) {
        Ok(found) if found.is_empty() => println!("No contacts with a last name starting '{}'", prefix),
        Ok(found) => {
            println!("Found {}:", found.len());
            for c in &found {
                println!("  {}", c.list_name());
            }
        }
        Err(e) => ctx.print_error(&e),
    }
}

pub fn add(ctx: &CLIContext, args: &str) {
    println!("Adding a new contact (press Enter to skip optional fields)");
    println!();

    let (first, last) = match split_name(args) {
        Some(names) => names,
        None => {
            let first = match ctx.prompt("First name (required): ") {
                Some(s) if !s.is_empty() => s,
                _ => { println!("First name is required."); return; }
            };
            let last = match ctx.prompt("Last name (required): ") {
                Some(s) if !s.is_empty() => s,
                _ => { println!("Last name is required."); return; }
            };
            (first, last)
        }
    };

    let middle = ctx.prompt("Middle name: ").unwrap_or_default();
    let prefix = ctx.prompt("Prefix (Mr., Mrs., Dr., ...): ").unwrap_or_default();

    let contact = match contact_ops::add_contact(&ctx.conn, &first, &last, Some(&middle), Some(&prefix)) {
        Ok(c) => {
            println!("Added {}", c.full_name());
            c
        }
        Err(e) => {
            ctx.print_error(&e);
            return;
        }
    };

    println!();
    if ctx.confirm("Add an address?") {
        choose_address(ctx, &contact);
    }
}

pub fn show(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: show-contact <name>");
        return;
    }
    let Some(contact) = ctx.find_contact(args) else { return };

    println!();
    println!("Name: {}", contact.full_name());
    println!("Prefix: {}", contact.prefix.as_deref().unwrap_or("(none)"));
    match contact.address_id.and_then(|id| ctx.household_for(id)) {
        Some(household) => {
            println!("Address: {}", household.addressee_for_display());
            if !household.address.address1.is_empty() {
                println!("  {}", household.address.mailing_address());
            }
            if let Some(phone) = &household.address.home_phone {
                println!("  Home phone: {}", phone);
            }
            let others: Vec<String> = address_queries::linked_contacts(&ctx.conn, household.address.id)
                .unwrap_or_default()
                .into_iter()
                .filter(|c| c.id != contact.id)
                .map(|c| c.full_name())
                .collect();
            if !others.is_empty() {
                println!("  Shared with: {}", others.join(", "));
            }
        }
        None => println!("Address: (none)"),
    }
    println!();
}

pub fn edit(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: edit-contact <name>");
        return;
    }
    let contact = match ctx.find_contact(args) {
        Some(c) => c,
        None => return,
    };

    println!("Editing {} (Enter keeps the current value, '-' clears optional fields)", contact.full_name());

    let Some(first) = ctx.prompt_with_default("First name", &contact.first_name) else { return };
    let Some(last) = ctx.prompt_with_default("Last name", &contact.last_name) else { return };
    let Some(middle) = ctx.prompt_with_default("Middle name", contact.middle_name.as_deref().unwrap_or("")) else { return };
    let Some(prefix) = ctx.prompt_with_default("Prefix", contact.prefix_str()) else { return };

    let clearable = |s: &str| if s == "-" { None } else { Some(s.to_string()) };
    let middle = clearable(&middle);
    let prefix = clearable(&prefix);

    match contact_ops::update_contact(
        &ctx.conn,
        contact.id,
        Some(&first),
        Some(&last),
        Some(middle.as_deref()),
        Some(prefix.as_deref()),
    ) {
        Ok(c) => println!("Updated {}", c.full_name()),
        Err(e) => ctx.print_error(&e),
    }

    println!();
    if ctx.confirm("Change address?") {
        choose_address(ctx, &contact);
    }
}

pub fn delete(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: delete-contact <name>");
        return;
    }
    let Some(contact) = ctx.find_contact(args) else { return };

    if !ctx.confirm(&EntityRef::Contact(&contact).delete_confirmation()) {
        return;
    }
    match contact_ops::delete_contact(&ctx.conn, contact.id) {
        Ok(c) => println!("Deleted {}", c.full_name()),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn remove_address(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: remove-address <name>");
        return;
    }
    let Some(contact) = ctx.find_contact(args) else { return };

    match contact_ops::remove_address_from_contact(&ctx.conn, contact.id) {
        Ok(_) => println!("{} no longer has an address", contact.full_name()),
        Err(e) => ctx.print_error(&e),
    }
}

/// "move-in <name>": share another contact's address.
pub fn move_in(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: move-in <name>");
        return;
    }
    let Some(contact) = ctx.find_contact(args) else { return };
    let Some(other_query) = ctx.prompt("Move in with (contact name): ") else { return };
    let Some(other) = ctx.find_contact(&other_query) else { return };

    match contact_ops::share_address(&ctx.conn, contact.id, other.id) {
        Ok(_) => println!("{} now shares an address with {}", contact.full_name(), other.full_name()),
        Err(e) => ctx.print_error(&e),
    }
}

fn choose_address(ctx: &CLIContext, contact: &Contact) {
    println!("  1. Type in an address");
    println!("  2. Use an existing address");
    println!("  3. Share another contact's address");
    match ctx.prompt("Choice: ").as_deref() {
        Some("1") => type_address(ctx, contact),
        Some("2") => {
            let households = address_queries::find_for_list(&ctx.conn).unwrap_or_default();
            if households.is_empty() {
                println!("No addresses yet.");
                return;
            }
            if let Some(h) = ctx.pick(&households, |h| h.addressee_for_display()) {
                match contact_ops::assign_address(&ctx.conn, contact.id, h.address.id) {
                    Ok(_) => println!("Address set."),
                    Err(e) => ctx.print_error(&e),
                }
            }
        }
        Some("3") => {
            let Some(query) = ctx.prompt("Contact name: ") else { return };
            if let Some(other) = ctx.find_contact(&query) {
                match contact_ops::share_address(&ctx.conn, contact.id, other.id) {
                    Ok(_) => println!("Address set."),
                    Err(e) => ctx.print_error(&e),
                }
            }
        }
        _ => {}
    }
}

fn type_address(ctx: &CLIContext, contact: &Contact) {
    let current = contact
        .address_id
        .and_then(|id| ctx.household_for(id))
        .map(|h| h.address.to_input())
        .unwrap_or_default();

    let Some(input) = prompt_address(ctx, &current) else { return };
    match contact_ops::set_contact_address(&ctx.conn, contact.id, input) {
        Ok(_) => println!("Address saved."),
        Err(e) => ctx.print_error(&e),
    }
}

/// Field-by-field address prompt; Enter keeps the shown value.
pub fn prompt_address(ctx: &CLIContext, current: &AddressInput) -> Option<AddressInput> {
    Some(AddressInput {
        address1: ctx.prompt_with_default("Address line 1", &current.address1)?,
        address2: Some(ctx.prompt_with_default("Address line 2", current.address2.as_deref().unwrap_or(""))?),
        city: ctx.prompt_with_default("City", &current.city)?,
        state: ctx.prompt_with_default("State", &current.state)?,
        zip: ctx.prompt_with_default("Zip", &current.zip)?,
        home_phone: Some(ctx.prompt_with_default("Home phone (XXX-XXX-XXXX)", current.home_phone.as_deref().unwrap_or(""))?),
    })
}

// "John Doe" -> ("John", "Doe"); a single word is not enough.
fn split_name(args: &str) -> Option<(String, String)> {
    let mut parts = args.split_whitespace();
    let first = parts.next()?;
    let rest: Vec<&str> = parts.collect();
    if rest.is_empty() {
        return None;
    }
    Some((first.to_string(), rest.join(" ")))
}
