//! Replace command implementation.

use phonedir_codec::DirectoryEntry;
use phonedir_core::{PhonebookStore, StoreConfig};
use std::path::Path;

/// Runs the replace command.
///
/// The input file holds a JSON array of entries; the document is replaced
/// with exactly those entries. An empty array truncates the phonebook.
pub fn run(config: &StoreConfig, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(file)?;
    let entries: Vec<DirectoryEntry> = serde_json::from_str(&json)?;

    let store = PhonebookStore::open(config)?;
    let count = store.replace_all(&entries)?;

    println!("Wrote {count} entries");
    Ok(())
}
