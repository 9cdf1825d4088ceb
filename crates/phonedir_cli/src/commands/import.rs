//! Import command implementation.

use phonedir_core::{PhonebookStore, StoreConfig};
use std::path::Path;
use tracing::info;

/// Runs the import command.
pub fn run(config: &StoreConfig, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let bytes = std::fs::read(file)?;

    let store = PhonebookStore::open(config)?;
    let count = store.import_csv(&bytes)?;

    info!(count, file = %file.display(), "CSV imported");
    println!("Imported {count} entries");
    Ok(())
}
