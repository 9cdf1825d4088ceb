//! phonedir CLI
//!
//! Command-line front end for the phonebook store.
//!
//! # Commands
//!
//! - `list` - Print all directory entries
//! - `add` - Append one entry
//! - `replace` - Replace all entries from a JSON file
//! - `import` - Replace all entries from a CSV upload
//! - `fetch` - Fetch an allow-listed phone file, logging the access
//! - `logs` - Print the access log

mod commands;

use clap::{Parser, Subcommand};
use phonedir_core::StoreConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// phonedir command-line phonebook tools.
#[derive(Parser)]
#[command(name = "phonedir")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base directory holding the phonebook document and phone files
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print all directory entries
    List {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Append one entry to the phonebook
    Add {
        /// Display name (required, trimmed)
        #[arg(short, long)]
        name: String,

        /// Telephone number (required, trimmed)
        #[arg(short, long)]
        telephone: String,

        /// Department label (optional)
        #[arg(short, long, default_value = "")]
        department: String,
    },

    /// Replace all entries from a JSON array file
    Replace {
        /// Path to a JSON file holding an array of entries
        file: PathBuf,
    },

    /// Replace all entries from a CSV upload
    Import {
        /// Path to a CSV file with Name,Telephone[,Department] columns
        file: PathBuf,
    },

    /// Fetch an allow-listed phone file, logging the access
    Fetch {
        /// Filename to fetch
        filename: String,

        /// Requester identifier recorded in the access log
        #[arg(short, long, default_value = "cli")]
        subject: String,
    },

    /// Print the access log, newest first
    Logs {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match cli.path {
        Some(path) => StoreConfig::new(path),
        None => StoreConfig::default(),
    };

    match cli.command {
        Commands::List { format } => commands::list::run(&config, &format)?,
        Commands::Add {
            name,
            telephone,
            department,
        } => commands::add::run(&config, &name, &telephone, &department)?,
        Commands::Replace { file } => commands::replace::run(&config, &file)?,
        Commands::Import { file } => commands::import::run(&config, &file)?,
        Commands::Fetch { filename, subject } => {
            commands::fetch::run(&config, &filename, &subject)?;
        }
        Commands::Logs { format } => commands::logs::run(&config, &format)?,
    }

    Ok(())
}
