pub mod context;
pub mod contact_commands;
pub mod address_commands;
pub mod group_commands;

use std::path::Path;
use rusqlite::Connection;
use tracing::{error, info};

use crate::db::schema;
use context::CLIContext;

/// Run the interactive REPL.
pub fn run(db_path: &Path) {
    let conn = match Connection::open(db_path) {
        Ok(c) => c,
        Err(e) => {
            error!(path = %db_path.display(), error = %e, "failed to open database");
            eprintln!("Error opening database: {}", e);
            return;
        }
    };

    if let Err(e) = schema::initialize(&conn) {
        error!(error = %e, "failed to initialize schema");
        eprintln!("Error initializing database: {}", e);
        return;
    }
    info!(path = %db_path.display(), "address book opened");

    println!("Address Book");
    println!("Type 'help' for commands, 'exit' to quit.");
    println!();

    let ctx = CLIContext::new(conn);
    repl_loop(&ctx);
}

fn repl_loop(ctx: &CLIContext) {
    loop {
        let input = match ctx.read_line("> ") {
            Some(s) => s,
            None => break,
        };

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let (command, args) = parse_command(input);

        match command {
            "help" | "?" => print_help(),
            "quit" | "exit" | "q" => break,

            // Contacts
            "contacts" | "list" | "ls" => contact_commands::list(ctx),
            "find" => contact_commands::find(ctx, args),
            "add-contact" => contact_commands::add(ctx, args),
            "show-contact" | "show" => contact_commands::show(ctx, args),
            "edit-contact" => contact_commands::edit(ctx, args),
            "delete-contact" => contact_commands::delete(ctx, args),
            "remove-address" => contact_commands::remove_address(ctx, args),
            "move-in" => contact_commands::move_in(ctx, args),

            // Addresses
            "addresses" => address_commands::list(ctx),
            "add-address" => address_commands::add(ctx),
            "show-address" => address_commands::show(ctx, args),
            "edit-address" => address_commands::edit(ctx, args),
            "delete-address" => address_commands::delete(ctx, args),

            // Groups
            "groups" => group_commands::list(ctx),
            "add-group" => group_commands::add(ctx, args),
            "show-group" => group_commands::show(ctx, args),
            "edit-group" => group_commands::edit(ctx, args),
            "delete-group" => group_commands::delete(ctx, args),
            "labels" => group_commands::labels(ctx, args),

            _ => println!("Unknown command: {}. Type 'help' for commands.", command),
        }
    }
}

fn parse_command(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.find(|c: char| c == ' ' || c == '\t') {
        Some(pos) => (&input[..pos], input[pos..].trim()),
        None => (input, ""),
    }
}

fn print_help() {
    println!(r#"
COMMANDS:

  Contacts:
    contacts                    List all contacts
    find <prefix>               Find contacts by last name prefix
    add-contact [first last]    Add a contact (interactive)
    show-contact <name>         Show contact details
    edit-contact <name>         Edit a contact and its address
    delete-contact <name>       Delete a contact
    remove-address <name>       Detach a contact from its address
    move-in <name>              Share another contact's address

  Addresses:
    addresses                   List all addresses
    add-address                 Add an address without contacts
    show-address <query>        Show address details
    edit-address <query>        Edit an address and its household type
    delete-address <query>      Delete an address

  Groups:
    groups                      List all groups
    add-group [name]            Create a group
    show-group <name>           Show group members
    edit-group <name>           Rename a group and toggle its addresses
    delete-group <name>         Delete a group
    labels <name> [template]    Print mailing labels (Avery5160, Avery5163, Avery8660)

  Other:
    help                        Show this help
    exit / quit / q             Exit

TIPS:
  - Names are case-insensitive and partial matches work
  - An address needs a phone number or a full street address"#);
}
