//! Bulk CSV import.

use crate::error::{StoreError, StoreResult};
use crate::store::PhonebookStore;
use phonedir_codec::DirectoryEntry;
use tracing::debug;

/// Required CSV header columns, matched case-sensitively.
pub const REQUIRED_COLUMNS: [&str; 2] = ["Name", "Telephone"];

/// Optional CSV header column.
pub const DEPARTMENT_COLUMN: &str = "Department";

/// Imports a tabular upload into a [`PhonebookStore`].
///
/// The upload is a UTF-8 CSV file with a header row that must contain the
/// `Name` and `Telephone` columns (exact match); a `Department` column is
/// optional. Rows whose name or telephone cell is missing or empty after
/// trimming are dropped silently; the remaining rows replace the whole
/// document. An upload that yields no entries at all is rejected without
/// touching the document.
pub struct CsvImporter<'a> {
    store: &'a PhonebookStore,
}

impl<'a> CsvImporter<'a> {
    /// Creates an importer targeting the given store.
    pub fn new(store: &'a PhonebookStore) -> Self {
        Self { store }
    }

    /// Imports CSV bytes and returns the number of entries written.
    ///
    /// # Errors
    ///
    /// - `EncodingError` when the bytes are not UTF-8.
    /// - `MalformedCsv` when the text is not parseable CSV.
    /// - `SchemaError` naming each required column absent from the header.
    /// - `EmptyInput` when no row passes validation; the document is left
    ///   byte-for-byte unchanged.
    pub fn import(&self, bytes: &[u8]) -> StoreResult<usize> {
        let entries = parse_rows(bytes)?;
        if entries.is_empty() {
            return Err(StoreError::EmptyInput);
        }
        let count = self.store.replace_all(&entries)?;
        debug!(count, "imported CSV upload");
        Ok(count)
    }
}

/// Parse CSV bytes into accepted entries, applying the row-skip rule.
///
/// Exposed separately from [`CsvImporter::import`] so callers can inspect
/// an upload without writing anything.
pub fn parse_rows(bytes: &[u8]) -> StoreResult<Vec<DirectoryEntry>> {
    let text = std::str::from_utf8(bytes).map_err(|_| StoreError::EncodingError)?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|err| StoreError::malformed_csv(err.to_string()))?
        .clone();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|column| column == **required))
        .map(|required| (*required).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(StoreError::schema(missing));
    }

    let column_index = |name: &str| headers.iter().position(|column| column == name);
    // Presence of the required columns was checked above.
    let name_idx = column_index(REQUIRED_COLUMNS[0]).unwrap();
    let telephone_idx = column_index(REQUIRED_COLUMNS[1]).unwrap();
    let department_idx = column_index(DEPARTMENT_COLUMN);

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| StoreError::malformed_csv(err.to_string()))?;

        let cell = |idx: usize| record.get(idx).map(str::trim).unwrap_or("");
        let name = cell(name_idx);
        let telephone = cell(telephone_idx);
        if name.is_empty() || telephone.is_empty() {
            // Row-skip rule: a row missing required cells is dropped, not
            // an import failure.
            continue;
        }
        let department = department_idx.map(cell).unwrap_or("");
        entries.push(DirectoryEntry::new(name, telephone, department));
    }

    Ok(entries)
}
