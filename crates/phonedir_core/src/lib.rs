//! # phonedir core
//!
//! Phonebook store and provisioning file surface.
//!
//! This crate provides:
//! - [`PhonebookStore`] - read, append-one, and replace-all operations on
//!   the directory document, with atomic replace and mutual exclusion
//! - [`validate_entry`] - field-level validation for new entries
//! - [`CsvImporter`] - bulk import from a CSV upload
//! - [`FileServer`] - allow-list-gated file delivery
//! - [`AccessLog`] - append-only record of file accesses
//!
//! The document file is the single source of truth. Writes go through a
//! temp-file-then-rename sequence, so readers never observe a partially
//! written document, and any failure leaves the previous content intact.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod access_log;
mod config;
mod error;
mod files;
mod import;
mod store;
mod validate;

pub use access_log::{AccessLog, AccessRecord};
pub use config::{StoreConfig, DEFAULT_BASE_DIR, DEFAULT_DOCUMENT_NAME};
pub use error::{StoreError, StoreResult};
pub use files::{content_type_for, FileServer, ServedFile, DEFAULT_ALLOWED_FILES};
pub use import::{parse_rows, CsvImporter, DEPARTMENT_COLUMN, REQUIRED_COLUMNS};
pub use store::PhonebookStore;
pub use validate::validate_entry;

// The entry type lives in the codec crate; re-export it so most callers
// need only this crate.
pub use phonedir_codec::DirectoryEntry;
