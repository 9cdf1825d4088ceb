//! Error types for phonedir core.

use std::io;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in phonebook store operations.
///
/// All variants are recoverable, typed failures reported to the caller;
/// none is fatal to the process, and no failure leaves a partially written
/// document behind.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested document or file does not exist.
    #[error("not found: {name}")]
    NotFound {
        /// Name or path of the missing file.
        name: String,
    },

    /// The on-disk document failed to decode.
    #[error("malformed document: {0}")]
    Malformed(#[from] phonedir_codec::DocumentError),

    /// A required entry field was empty after trimming.
    #[error("missing required field: {field}")]
    MissingRequiredField {
        /// The field that was empty.
        field: &'static str,
    },

    /// The CSV header is missing required columns.
    #[error("CSV header missing required columns: {}", missing.join(", "))]
    SchemaError {
        /// The required column names absent from the header.
        missing: Vec<String>,
    },

    /// Input bytes could not be decoded as UTF-8 text.
    #[error("input is not valid UTF-8 text")]
    EncodingError,

    /// CSV input is structurally damaged (e.g. an unterminated quote).
    #[error("malformed CSV input: {message}")]
    MalformedCsv {
        /// Description of the CSV parsing failure.
        message: String,
    },

    /// No usable entries where at least one is required.
    #[error("no usable entries in input")]
    EmptyInput,

    /// The requested file is not on the serving allow-list.
    #[error("access denied: {name}")]
    AccessDenied {
        /// The requested filename.
        name: String,
    },

    /// An access-log line failed to decode.
    #[error("malformed access log record: {message}")]
    MalformedLogRecord {
        /// Description of the decoding failure.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl StoreError {
    /// Creates a not-found error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Creates a missing required field error.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingRequiredField { field }
    }

    /// Creates a schema error naming the missing columns.
    pub fn schema(missing: Vec<String>) -> Self {
        Self::SchemaError { missing }
    }

    /// Creates a malformed CSV error.
    pub fn malformed_csv(message: impl Into<String>) -> Self {
        Self::MalformedCsv {
            message: message.into(),
        }
    }

    /// Creates an access denied error.
    pub fn access_denied(name: impl Into<String>) -> Self {
        Self::AccessDenied { name: name.into() }
    }

    /// Creates a malformed log record error.
    pub fn malformed_log_record(message: impl Into<String>) -> Self {
        Self::MalformedLogRecord {
            message: message.into(),
        }
    }
}
