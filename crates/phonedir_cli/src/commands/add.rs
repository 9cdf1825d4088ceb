//! Add command implementation.

use phonedir_core::{PhonebookStore, StoreConfig};
use tracing::info;

/// Runs the add command.
pub fn run(
    config: &StoreConfig,
    name: &str,
    telephone: &str,
    department: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = PhonebookStore::open(config)?;
    let entry = store.add_entry(name, telephone, department)?;

    info!(name = %entry.name, "entry added");
    println!("Added {} ({})", entry.name, entry.telephone);
    Ok(())
}
