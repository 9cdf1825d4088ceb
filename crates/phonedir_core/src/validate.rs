//! Field-level validation for directory entries.

use crate::error::{StoreError, StoreResult};
use phonedir_codec::DirectoryEntry;

/// Validate raw entry fields into a [`DirectoryEntry`].
///
/// All three inputs are trimmed. Name and telephone must be non-empty
/// after trimming; the department may be empty, in which case its
/// sub-element is omitted when the entry is serialized. The telephone is
/// not pattern-checked: any non-empty string is accepted.
///
/// # Errors
///
/// Returns [`StoreError::MissingRequiredField`] naming the first empty
/// required field.
pub fn validate_entry(name: &str, telephone: &str, department: &str) -> StoreResult<DirectoryEntry> {
    let name = name.trim();
    let telephone = telephone.trim();
    let department = department.trim();

    if name.is_empty() {
        return Err(StoreError::missing_field("name"));
    }
    if telephone.is_empty() {
        return Err(StoreError::missing_field("telephone"));
    }

    Ok(DirectoryEntry::new(name, telephone, department))
}
