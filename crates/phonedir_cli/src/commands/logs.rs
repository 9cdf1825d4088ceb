//! Logs command implementation.

use phonedir_core::{AccessLog, StoreConfig};

/// Runs the logs command.
pub fn run(config: &StoreConfig, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let log = AccessLog::new(config.base_dir.join("access.log"));
    let records = log.read_all()?;

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&records)?),
        _ => {
            for record in &records {
                println!(
                    "{}\t{}\t{}\t{}",
                    record.unix_time, record.subject, record.status, record.resource
                );
            }
            println!("{} records", records.len());
        }
    }

    Ok(())
}
