use crate::cli::context::CLIContext;
use crate::model::*;
use crate::ops::*;
use crate::queries::*;

pub fn list(ctx: &CLIContext) {
    let groups = group_queries::find_for_list(&ctx.conn).unwrap_or_default();
    if groups.is_empty() {
        println!("No groups yet. Use 'add-group <name>' to create one.");
    } else {
        println!("Groups ({}):", groups.len());
        for group in &groups {
            println!("  {} ({} addresses)", group.name, group.address_ids.len());
        }
    }
}

pub fn add(ctx: &CLIContext, args: &str) {
    let name = if !args.is_empty() {
        args.to_string()
    } else {
        match ctx.prompt("Group name: ") {
            Some(s) if !s.is_empty() => s,
            _ => { println!("Name cannot be empty."); return; }
        }
    };

    println!("Add addresses (enter numbers separated by spaces, or press Enter to skip):");
    let eligible = address_queries::find_all_eligible_for_group(&ctx.conn).unwrap_or_default();
    let households: Vec<Household> = eligible
        .into_iter()
        .filter_map(|a| address_queries::resolve(&ctx.conn, a).ok())
        .collect();
    for (i, household) in households.iter().enumerate() {
        println!("  {}. {}", i + 1, household.addressee_for_display());
    }

    let input = ctx.prompt("Addresses: ").unwrap_or_default();
    let address_ids: Vec<Id<Address>> = input
        .split_whitespace()
        .filter_map(|s| s.parse::<usize>().ok())
        .filter_map(|i| households.get(i.wrapping_sub(1)).map(|h| h.address.id))
        .collect();

    match group_ops::create_group(&ctx.conn, &name, address_ids) {
        Ok(group) => println!("Created group: {} with {} addresses", group.name, group.address_ids.len()),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn show(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: show-group <name>");
        return;
    }
    let Some(group) = ctx.find_group(args) else { return };

    println!();
    println!("Name: {}", group.name);
    let members = group_queries::group_members(&ctx.conn, group.id).unwrap_or_default();
    if members.is_empty() {
        println!("Addresses: (none)");
    } else {
        println!("Addresses:");
        for h in &members {
            println!("  {}", h.addressee_for_display());
        }
    }
    println!();
}

pub fn edit(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: edit-group <name>");
        return;
    }
    let group = match ctx.find_group(args) {
        Some(g) => g,
        None => return,
    };

    println!("Editing group: {}", group.name);
    if let Some(name_input) = ctx.prompt(&format!("Name [{}]: ", group.name)) {
        if !name_input.is_empty() {
            if let Err(e) = group_ops::rename_group(&ctx.conn, group.id, &name_input) {
                ctx.print_error(&e);
            }
        }
    }

    // Members first, then the eligible addresses not yet in the group.
    let mut candidates = group_queries::group_members(&ctx.conn, group.id).unwrap_or_default();
    candidates.extend(
        group_queries::addresses_not_included(&ctx.conn, group.id)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|a| address_queries::resolve(&ctx.conn, a).ok()),
    );
    let mut selected: Vec<Id<Address>> = group.address_ids.clone();

    println!();
    println!("Edit addresses (enter numbers to toggle, press Enter when done):");

    loop {
        for (i, h) in candidates.iter().enumerate() {
            let marker = if selected.contains(&h.address.id) { "[x]" } else { "[ ]" };
            println!("  {}. {} {}", i + 1, marker, h.addressee_for_display());
        }

        let input = match ctx.prompt("Toggle (or Enter to finish): ") {
            Some(s) if s.is_empty() => break,
            Some(s) => s,
            None => break,
        };

        for token in input.split_whitespace() {
            if let Ok(idx) = token.parse::<usize>() {
                if idx > 0 && idx <= candidates.len() {
                    let aid = candidates[idx - 1].address.id;
                    if let Some(pos) = selected.iter().position(|id| *id == aid) {
                        selected.remove(pos);
                    } else {
                        selected.push(aid);
                    }
                }
            }
        }
    }

    match group_ops::set_addresses(&ctx.conn, group.id, selected) {
        Ok(g) => println!("Group updated with {} addresses", g.address_ids.len()),
        Err(e) => ctx.print_error(&e),
    }
}

pub fn delete(ctx: &CLIContext, args: &str) {
    if args.is_empty() {
        println!("Usage: delete-group <name>");
        return;
    }
    let Some(group) = ctx.find_group(args) else { return };

    if !ctx.confirm(&EntityRef::Group(&group).delete_confirmation()) {
        return;
    }
    match group_ops::delete_group(&ctx.conn, group.id) {
        Ok(g) => println!("Deleted group: {}", g.name),
        Err(e) => ctx.print_error(&e),
    }
}

/// "labels <group> [template]"
pub fn labels(ctx: &CLIContext, args: &str) {
    let mut parts = args.rsplitn(2, ' ');
    let (name, template) = match (parts.next(), parts.next()) {
        (Some(t), Some(n)) if t.parse::<LabelTemplate>().is_ok() => (n, t),
        _ => (args, LabelTemplate::Avery5160.id()),
    };

    if name.is_empty() {
        println!("Usage: labels <group> [Avery5160|Avery5163|Avery8660]");
        return;
    }
    let Some(group) = ctx.find_group(name) else { return };

    match group_queries::create_labels(&ctx.conn, group.id, template) {
        Ok(sheet) => {
            println!("{} labels on {} sheet(s) of {}", sheet.labels.len(), sheet.pages().len(), sheet.template.id());
            for (n, page) in sheet.pages().iter().enumerate() {
                println!();
                println!("-- Sheet {} --", n + 1);
                for label in page.iter() {
                    println!();
                    for line in &label.lines {
                        println!("  {}", line);
                    }
                }
            }
        }
        Err(e) => ctx.print_error(&e),
    }
}
