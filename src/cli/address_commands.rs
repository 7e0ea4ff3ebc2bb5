use crate::cli::contact_commands::prompt_address;
use crate::cli::context::CLIContext;
use crate::model::*;
use crate::ops::*;
use crate::queries::*;

pub fn list(ctx: &CLIContext) {
    let households = address_queries::find_for_list(&ctx.conn).unwrap_or_default();
    if households.is_empty() {
        println!("No addresses yet. Use 'add-address' to create one.");
        return;
    }

    println!("Addresses ({}):", households.len());
    for household in &households {
        println!("  {}", EntityRef::Address(household).link_text());
    }
}

pub fn add(ctx: &CLIContext) {
    println!("Adding a new address (a phone number or a full address is required)");
    let Some(input) = prompt_address(ctx, &AddressInput::default()) else { return };

    match address_ops::create_address(&ctx.conn, input, None) {
        Ok(address) => println!("Added {}", address.format_without_contacts()),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn show(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: show-address <name or street>");
        return;
    }
    let Some(household) = ctx.find_household(args) else { return };
    let address = &household.address;

    println!();
    println!("Addressee: {}", household.addressee_for_display());
    println!("Label: {}", household.addressee());
    println!(
        "Type: {}",
        address.address_type.map(|t| t.description()).unwrap_or("(none)")
    );
    if !address.lacks_postal_address() {
        println!("Mailing address: {}", address.mailing_address());
    }
    if let Some(phone) = &address.home_phone {
        println!("Home phone: {}", phone);
    }

    let residents = address_queries::linked_contacts(&ctx.conn, address.id).unwrap_or_default();
    if residents.is_empty() {
        println!("Residents: (none)");
    } else {
        let names: Vec<String> = residents.iter().map(|c| c.full_name()).collect();
        println!("Residents: {}", names.join(", "));
    }
    if address_queries::is_empty(&ctx.conn, address).unwrap_or(true) {
        println!("(incomplete postal address, cannot be used for labels)");
    }
    println!();
}

pub fn edit(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: edit-address <name or street>");
        return;
    }
    let household = match ctx.find_household(args) {
        Some(h) => h,
        None => return,
    };
    let address = &household.address;

    println!("Editing {}", household.addressee_for_display());
    let Some(input) = prompt_address(ctx, &address.to_input()) else { return };

    let types = address_queries::valid_address_types(&ctx.conn, address.id).unwrap_or_default();
    let current_type = address.address_type.map(|t| t.description()).unwrap_or("(none)");
    println!("Household type [{}] (Enter keeps it):", current_type);
    let new_type = ctx.pick(&types, |t| t.description().to_string()).copied();

    match address_ops::update_address(&ctx.conn, address.id, Some(input), new_type) {
        Ok(_) => println!("Address updated."),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn delete(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: delete-address <name or street>");
        return;
    }
    let Some(household) = ctx.find_household(args) else { return };

    if !ctx.confirm(&EntityRef::Address(&household).delete_confirmation()) {
        return;
    }
    match address_ops::delete_address(&ctx.conn, household.address.id) {
        Ok(_) => println!("Deleted."),
        Err(e) => ctx.print_error(&e),
    }
}
