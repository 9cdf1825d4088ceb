//! The phonebook store.

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::import::CsvImporter;
use crate::validate::validate_entry;
use parking_lot::Mutex;
use phonedir_codec::{parse_document, write_document, DirectoryEntry};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// The phonebook store.
///
/// Owns one directory document at a fixed path and exposes read,
/// append-one, and replace-all operations. The document file is the single
/// source of truth: every operation opens, mutates (if applicable), and
/// closes; no entry cache persists across calls.
///
/// # Atomicity
///
/// Every write lands in a temporary file in the document's directory and
/// is renamed over the target, so a concurrent reader sees either the old
/// document or the new one, never a mixture, and any failure before the
/// rename leaves the prior document intact.
///
/// # Concurrency
///
/// Mutations serialize on an internal mutex around the whole
/// read-modify-write-rename sequence; reads take no lock.
pub struct PhonebookStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl PhonebookStore {
    /// Opens a store for the document described by `config`.
    ///
    /// The document itself is created lazily on first append; only the
    /// base directory is created here (when `create_base_dir` is set).
    ///
    /// # Errors
    ///
    /// Returns an error if the base directory cannot be created.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        if config.create_base_dir {
            std::fs::create_dir_all(&config.base_dir)?;
        }
        Ok(Self {
            path: config.document_path(),
            write_lock: Mutex::new(()),
        })
    }

    /// Returns the path of the directory document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all entries in on-disk order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` when the document does not exist and `Malformed`
    /// when it fails to decode.
    pub fn read(&self) -> StoreResult<Vec<DirectoryEntry>> {
        let bytes = self.read_bytes()?;
        Ok(parse_document(&bytes)?)
    }

    /// Validates raw fields and appends the resulting entry.
    ///
    /// Returns the stored (trimmed) entry on success.
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` when name or telephone is empty
    /// after trimming, and any error of [`PhonebookStore::append_one`].
    pub fn add_entry(
        &self,
        name: &str,
        telephone: &str,
        department: &str,
    ) -> StoreResult<DirectoryEntry> {
        let entry = validate_entry(name, telephone, department)?;
        self.append_one(entry.clone())?;
        Ok(entry)
    }

    /// Appends one already-validated entry at the end of the document.
    ///
    /// A missing document is treated as empty, so the first append creates
    /// it with a single entry.
    ///
    /// # Errors
    ///
    /// Returns `Malformed` when the existing document fails to decode, in
    /// which case the file is left untouched.
    pub fn append_one(&self, entry: DirectoryEntry) -> StoreResult<()> {
        let _guard = self.write_lock.lock();
        let mut entries = match self.read_bytes() {
            Ok(bytes) => parse_document(&bytes)?,
            Err(StoreError::NotFound { .. }) => Vec::new(),
            Err(err) => return Err(err),
        };
        entries.push(entry);
        self.write_atomic(&entries)?;
        debug!(path = %self.path.display(), count = entries.len(), "appended entry");
        Ok(())
    }

    /// Overwrites the document with exactly the given entries.
    ///
    /// Prior content is discarded, never merged. An empty slice is
    /// permitted and writes a well-formed empty document (explicit
    /// truncation). Returns the number of entries written.
    pub fn replace_all(&self, entries: &[DirectoryEntry]) -> StoreResult<usize> {
        let _guard = self.write_lock.lock();
        self.write_atomic(entries)?;
        debug!(path = %self.path.display(), count = entries.len(), "replaced document");
        Ok(entries.len())
    }

    /// Imports a CSV upload, replacing the whole document.
    ///
    /// See [`CsvImporter`] for schema and row-skip rules.
    pub fn import_csv(&self, bytes: &[u8]) -> StoreResult<usize> {
        CsvImporter::new(self).import(bytes)
    }

    fn read_bytes(&self) -> StoreResult<Vec<u8>> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(StoreError::not_found(self.path.display().to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Serialize and atomically replace the on-disk document.
    fn write_atomic(&self, entries: &[DirectoryEntry]) -> StoreResult<()> {
        let bytes = write_document(entries);
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(&bytes)?;
        temp.flush()?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}
