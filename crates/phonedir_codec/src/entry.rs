//! The directory entry record.

use serde::{Deserialize, Serialize};

/// One phonebook record.
///
/// Entries carry no identifier; their position in the document is their
/// only ordering, and duplicates are permitted. `department` is optional
/// in the document: an empty string here means the sub-element is omitted
/// when the entry is serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Display name shown on the phone.
    pub name: String,
    /// Telephone number. Any non-empty string is accepted; handsets do
    /// their own dial-string interpretation.
    pub telephone: String,
    /// Department label, empty when absent.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub department: String,
}

impl DirectoryEntry {
    /// Creates an entry from owned field values.
    pub fn new(
        name: impl Into<String>,
        telephone: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            telephone: telephone.into(),
            department: department.into(),
        }
    }

    /// Returns true when the entry has a non-empty department label.
    #[must_use]
    pub fn has_department(&self) -> bool {
        !self.department.is_empty()
    }
}
