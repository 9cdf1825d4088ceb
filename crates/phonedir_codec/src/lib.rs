//! # phonedir codec
//!
//! Codec for the phone directory document consumed by desk phones.
//!
//! The on-disk format is a small XML document:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <YealinkIPPhoneDirectory>
//!   <DirectoryEntry>
//!     <Name>Alice</Name>
//!     <Telephone>100</Telephone>
//!     <Department>Sales</Department>
//!   </DirectoryEntry>
//! </YealinkIPPhoneDirectory>
//! ```
//!
//! Serialization is deterministic (stable indentation and ordering) so the
//! document diffs cleanly and round-trips byte-for-byte. Parsing is lenient
//! about optional sub-elements, attributes, and comments, and strict about
//! structure: a damaged document is a typed error, never a partial result.
//!
//! ## Usage
//!
//! ```
//! use phonedir_codec::{parse_document, write_document, DirectoryEntry};
//!
//! let entries = vec![DirectoryEntry::new("Alice", "100", "Sales")];
//! let bytes = write_document(&entries);
//! assert_eq!(parse_document(&bytes).unwrap(), entries);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod entry;
mod error;
mod parser;
mod writer;

pub use entry::DirectoryEntry;
pub use error::{DocumentError, DocumentResult};
pub use parser::{parse_document, DocumentParser};
pub use writer::{write_document, DocumentWriter};

/// Root element tag of the directory document.
pub const ROOT_TAG: &str = "YealinkIPPhoneDirectory";
/// Tag of one entry element.
pub const ENTRY_TAG: &str = "DirectoryEntry";
/// Tag of the name sub-element.
pub const NAME_TAG: &str = "Name";
/// Tag of the telephone sub-element.
pub const TELEPHONE_TAG: &str = "Telephone";
/// Tag of the optional department sub-element.
pub const DEPARTMENT_TAG: &str = "Department";

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn roundtrip_empty() {
        let bytes = write_document(&[]);
        assert_eq!(parse_document(&bytes).unwrap(), Vec::new());
    }

    #[test]
    fn roundtrip_mixed_entries() {
        let entries = vec![
            DirectoryEntry::new("Alice", "100", "Sales"),
            DirectoryEntry::new("Bob", "101", ""),
            DirectoryEntry::new("Alice", "100", "Sales"),
        ];
        let bytes = write_document(&entries);
        assert_eq!(parse_document(&bytes).unwrap(), entries);
    }

    #[test]
    fn roundtrip_special_characters() {
        let entries = vec![DirectoryEntry::new("R&D <ops>", "+49 30 1234", "Köln & Umland")];
        let bytes = write_document(&entries);
        assert_eq!(parse_document(&bytes).unwrap(), entries);
    }

    // Field text without leading/trailing whitespace; interior spaces and
    // markup-significant characters are fair game.
    fn field() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9&<>'\"+#]([ a-zA-Z0-9&<>'\"+#-]{0,14}[a-zA-Z0-9&<>'\"+#])?"
    }

    proptest! {
        #[test]
        fn roundtrip_any_entries(
            entries in proptest::collection::vec(
                (field(), field(), proptest::option::of(field())).prop_map(
                    |(name, telephone, department)| DirectoryEntry::new(
                        name,
                        telephone,
                        department.unwrap_or_default(),
                    ),
                ),
                0..8,
            )
        ) {
            let bytes = write_document(&entries);
            prop_assert_eq!(parse_document(&bytes).unwrap(), entries);
        }
    }
}
