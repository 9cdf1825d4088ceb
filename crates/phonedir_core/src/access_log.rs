//! Append-only access log for served files.

use crate::error::{StoreError, StoreResult};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// One access-log record: who requested what, when, with what outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRecord {
    /// Identifier of the requester (e.g. a client address).
    pub subject: String,
    /// The requested resource name.
    pub resource: String,
    /// Outcome status code (200, 403, 404).
    pub status: u16,
    /// Seconds since the Unix epoch.
    pub unix_time: u64,
}

impl AccessRecord {
    /// Creates a record stamped with the current time.
    pub fn now(subject: impl Into<String>, resource: impl Into<String>, status: u16) -> Self {
        let unix_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0);
        Self {
            subject: subject.into(),
            resource: resource.into(),
            status,
            unix_time,
        }
    }
}

/// An append-only, JSON-lines access log.
///
/// Each record is one JSON object per line. Appends serialize on an
/// internal lock; nothing in the store depends on a log append succeeding.
#[derive(Debug, Clone)]
pub struct AccessLog {
    path: PathBuf,
    append_lock: Arc<Mutex<()>>,
}

impl AccessLog {
    /// Creates a log handle for the given file path.
    ///
    /// The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            append_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Appends one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be written.
    pub fn append(&self, record: &AccessRecord) -> StoreResult<()> {
        let line = serde_json::to_string(record)
            .map_err(|err| StoreError::malformed_log_record(err.to_string()))?;

        let _guard = self.append_lock.lock();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }

    /// Reads all records, newest first.
    ///
    /// A missing log file reads as empty.
    ///
    /// # Errors
    ///
    /// Returns `MalformedLogRecord` if a line fails to decode.
    pub fn read_all(&self) -> StoreResult<Vec<AccessRecord>> {
        let file = match std::fs::File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut records = Vec::new();
        for line in BufReader::new(file).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: AccessRecord = serde_json::from_str(&line)
                .map_err(|err| StoreError::malformed_log_record(err.to_string()))?;
            records.push(record);
        }
        // Appends go at the end, so reverse order is newest first.
        records.reverse();
        Ok(records)
    }
}
