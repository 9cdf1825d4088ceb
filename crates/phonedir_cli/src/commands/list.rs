//! List command implementation.

use phonedir_core::{PhonebookStore, StoreConfig};

/// Runs the list command.
pub fn run(config: &StoreConfig, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = PhonebookStore::open(config)?;
    let entries = store.read()?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&entries)?),
        _ => {
            for entry in &entries {
                if entry.has_department() {
                    println!("{}\t{}\t{}", entry.name, entry.telephone, entry.department);
                } else {
                    println!("{}\t{}", entry.name, entry.telephone);
                }
            }
            println!("{} entries", entries.len());
        }
    }

    Ok(())
}
