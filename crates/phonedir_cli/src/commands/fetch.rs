//! Fetch command implementation.

use phonedir_core::{AccessLog, FileServer, StoreConfig};
use std::io::Write;

/// Runs the fetch command.
///
/// Resolves the filename against the allow-list, records the access, and
/// writes the file's bytes to stdout.
pub fn run(
    config: &StoreConfig,
    filename: &str,
    subject: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let log = AccessLog::new(config.base_dir.join("access.log"));
    let server = FileServer::new(&config.base_dir).with_access_log(log);

    let file = server.serve(subject, filename)?;
    eprintln!("{} ({} bytes, {})", file.name, file.bytes.len(), file.content_type);
    std::io::stdout().write_all(&file.bytes)?;
    Ok(())
}
