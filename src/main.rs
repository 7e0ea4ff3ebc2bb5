use std::path::PathBuf;
use std::process::ExitCode;

use abook::config::AppConfig;
use abook::{telemetry, transfer};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "abook", about = "Personal address book with household mailing labels", version)]
struct Cli {
    /// Database file path (default: $ABOOK_DB or .data/abook.db)
    #[arg(short, long)]
    file: Option<PathBuf>,
    /// Load a JSON export into a new database, then exit
    #[arg(long, value_name = "JSON_PATH", conflicts_with = "export")]
    import: Option<PathBuf>,
    /// Write the database to a JSON file, then exit
    #[arg(long, value_name = "JSON_PATH")]
    export: Option<PathBuf>,
    /// Log level or filter directive (overrides $ABOOK_LOG_LEVEL)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = AppConfig::load();
    if let Some(path) = cli.file {
        config.db_path = path;
    }
    if let Some(level) = cli.log_level {
        config.telemetry.log_level = level;
    }

    if let Err(e) = telemetry::init(&config.telemetry) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    if let Some(dir) = config.db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Error: cannot create {}: {}", dir.display(), e);
            return ExitCode::FAILURE;
        }
    }

    if let Some(json_path) = cli.import {
        if config.db_path.exists() {
            eprintln!("Error: Database file {} already exists.", config.db_path.display());
            eprintln!("Remove it first or use --file to specify a different path.");
            return ExitCode::FAILURE;
        }
        println!("Importing from {}...", json_path.display());
        return match transfer::import_json(&json_path, &config.db_path) {
            Ok(stats) => {
                println!("Import complete!");
                println!("  Contacts: {}", stats.contacts);
                println!("  Addresses: {}", stats.addresses);
                println!("  Groups: {}", stats.groups);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Import failed: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    if let Some(json_path) = cli.export {
        return match transfer::export_json(&config.db_path, &json_path) {
            Ok(()) => {
                println!("Exported to {}", json_path.display());
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Export failed: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    info!(db = %config.db_path.display(), "starting repl");
    abook::cli::run(&config.db_path);
    ExitCode::SUCCESS
}
