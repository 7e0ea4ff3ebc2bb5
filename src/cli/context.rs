use rusqlite::Connection;
use std::io::{self, Write};

use crate::error::AbookError;
use crate::model::*;
use crate::queries::*;

pub struct CLIContext {
    pub conn: Connection,
}

impl CLIContext {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Prompt and read a line from stdin. Returns None on EOF.
    pub fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt);
        io::stdout().flush().ok();
        let mut buf = String::new();
        match io::stdin().read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => Some(buf.trim_end_matches('\n').trim_end_matches('\r').to_string()),
            Err(_) => None,
        }
    }

    /// Read a line, trimmed.
    pub fn prompt(&self, prompt: &str) -> Option<String> {
        self.read_line(prompt).map(|s| s.trim().to_string())
    }

    /// Prompt showing the current value; Enter keeps it.
    pub fn prompt_with_default(&self, label: &str, current: &str) -> Option<String> {
        match self.prompt(&format!("{} [{}]: ", label, current))? {
            s if s.is_empty() => Some(current.to_string()),
            s => Some(s),
        }
    }

    pub fn confirm(&self, question: &str) -> bool {
        matches!(self.prompt(&format!("{} (y/n): ", question)), Some(s) if s.eq_ignore_ascii_case("y"))
    }

    /// Find a contact by "Last", "Last, First" or "First Last".
    /// Prints an error if not found or ambiguous.
    pub fn find_contact(&self, args: &str) -> Option<Contact> {
        let query = args.trim();
        if query.is_empty() {
            return None;
        }

        let contacts = contact_queries::find_for_list(&self.conn).unwrap_or_default();
        let lower = query.to_lowercase();
        let matches: Vec<&Contact> = contacts
            .iter()
            .filter(|c| {
                c.list_name().to_lowercase().starts_with(&lower)
                    || c.full_name().to_lowercase().contains(&lower)
            })
            .collect();

        match matches.len() {
            0 => {
                println!("No contact found matching '{}'", query);
                None
            }
            1 => Some(matches[0].clone()),
            _ => {
                if let Some(exact) = matches.iter().find(|c| {
                    c.list_name().eq_ignore_ascii_case(query) || c.full_name().eq_ignore_ascii_case(query)
                }) {
                    return Some((*exact).clone());
                }
                println!("Multiple matches found:");
                for c in &matches {
                    println!("  {}", c.list_name());
                }
                println!("Please be more specific.");
                None
            }
        }
    }

    /// Find a group by name query.
    pub fn find_group(&self, args: &str) -> Option<Group> {
        let query = args.trim();
        if query.is_empty() {
            return None;
        }

        let groups = group_queries::find_for_list(&self.conn).unwrap_or_default();
        let lower = query.to_lowercase();
        let matches: Vec<&Group> = groups
            .iter()
            .filter(|g| g.name.to_lowercase().contains(&lower))
            .collect();

        match matches.len() {
            0 => {
                println!("No group found matching '{}'", query);
                None
            }
            1 => Some(matches[0].clone()),
            _ => {
                if let Some(exact) = matches.iter().find(|g| g.name.eq_ignore_ascii_case(query)) {
                    return Some((*exact).clone());
                }
                println!("Multiple matches found:");
                for g in &matches {
                    println!("  {}", g.name);
                }
                println!("Please be more specific.");
                None
            }
        }
    }

    /// Find an address by a fragment of its addressee or street.
    pub fn find_household(&self, args: &str) -> Option<Household> {
        let query = args.trim();
        if query.is_empty() {
            return None;
        }

        let households = address_queries::find_for_list(&self.conn).unwrap_or_default();
        let lower = query.to_lowercase();
        let matches: Vec<&Household> = households
            .iter()
            .filter(|h| {
                h.addressee_for_display().to_lowercase().contains(&lower)
                    || h.address.address1.to_lowercase().contains(&lower)
            })
            .collect();

        match matches.len() {
            0 => {
                println!("No address found matching '{}'", query);
                None
            }
            1 => Some(matches[0].clone()),
            _ => {
                println!("Multiple matches found:");
                for h in &matches {
                    println!("  {}", h.addressee_for_display());
                }
                println!("Please be more specific.");
                None
            }
        }
    }

    /// Numbered pick from a list; None on blank or bad input.
    pub fn pick<'a, T>(&self, items: &'a [T], describe: impl Fn(&T) -> String) -> Option<&'a T> {
        for (i, item) in items.iter().enumerate() {
            println!("  {}. {}", i + 1, describe(item));
        }
        let input = self.prompt("Number: ")?;
        input
            .parse::<usize>()
            .ok()
            .and_then(|i| items.get(i.wrapping_sub(1)))
    }

    pub fn household_for(&self, address_id: Id<Address>) -> Option<Household> {
        address_queries::get_household(&self.conn, address_id).ok().flatten()
    }

    /// Print an error.
    pub fn print_error(&self, e: &AbookError) {
        match e {
            AbookError::Invalid { messages, .. } => {
                println!("Error:");
                for m in messages {
                    println!("  {}", m);
                }
            }
            other => println!("Error: {}", other),
        }
    }
}
