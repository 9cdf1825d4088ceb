//! Deterministic serializer for the directory document.

use crate::entry::DirectoryEntry;
use crate::{DEPARTMENT_TAG, ENTRY_TAG, NAME_TAG, ROOT_TAG, TELEPHONE_TAG};

/// The declaration emitted at the top of every document.
const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

/// Serialize entries into directory document bytes.
///
/// Output is deterministic: identical input produces identical bytes.
/// Entries are written in input order with two-space indentation, and the
/// department sub-element is omitted when the entry's department is empty.
/// An empty entry list produces a self-closing root element; the result is
/// always a well-formed document.
#[must_use]
pub fn write_document(entries: &[DirectoryEntry]) -> Vec<u8> {
    let mut writer = DocumentWriter::with_capacity(64 + entries.len() * 96);
    writer.write(entries);
    writer.into_bytes()
}

/// A buffer-building document writer.
pub struct DocumentWriter {
    buffer: String,
}

impl DocumentWriter {
    /// Create a new writer.
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Create a new writer with the specified buffer capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: String::with_capacity(capacity),
        }
    }

    /// Write a full document for the given entries.
    pub fn write(&mut self, entries: &[DirectoryEntry]) {
        self.buffer.push_str(XML_DECLARATION);
        self.buffer.push('\n');

        if entries.is_empty() {
            self.buffer.push('<');
            self.buffer.push_str(ROOT_TAG);
            self.buffer.push_str("/>\n");
            return;
        }

        self.open_tag(ROOT_TAG);
        for entry in entries {
            self.write_entry(entry);
        }
        self.close_tag(ROOT_TAG);
    }

    /// Consume this writer and return the encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer.into_bytes()
    }

    fn write_entry(&mut self, entry: &DirectoryEntry) {
        self.buffer.push_str("  ");
        self.open_tag(ENTRY_TAG);
        self.text_element(NAME_TAG, &entry.name);
        self.text_element(TELEPHONE_TAG, &entry.telephone);
        if entry.has_department() {
            self.text_element(DEPARTMENT_TAG, &entry.department);
        }
        self.buffer.push_str("  ");
        self.close_tag(ENTRY_TAG);
    }

    fn open_tag(&mut self, tag: &str) {
        self.buffer.push('<');
        self.buffer.push_str(tag);
        self.buffer.push_str(">\n");
    }

    fn close_tag(&mut self, tag: &str) {
        self.buffer.push_str("</");
        self.buffer.push_str(tag);
        self.buffer.push_str(">\n");
    }

    fn text_element(&mut self, tag: &str, text: &str) {
        self.buffer.push_str("    <");
        self.buffer.push_str(tag);
        self.buffer.push('>');
        push_escaped(&mut self.buffer, text);
        self.buffer.push_str("</");
        self.buffer.push_str(tag);
        self.buffer.push_str(">\n");
    }
}

impl Default for DocumentWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape text content for element bodies.
fn push_escaped(buffer: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => buffer.push_str("&amp;"),
            '<' => buffer.push_str("&lt;"),
            '>' => buffer.push_str("&gt;"),
            other => buffer.push(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document() {
        let bytes = write_document(&[]);
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<YealinkIPPhoneDirectory/>\n"
        );
    }

    #[test]
    fn single_entry_layout() {
        let entries = vec![DirectoryEntry::new("Alice", "100", "Sales")];
        let text = String::from_utf8(write_document(&entries)).unwrap();
        assert_eq!(
            text,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <YealinkIPPhoneDirectory>\n\
             \x20\x20<DirectoryEntry>\n\
             \x20\x20\x20\x20<Name>Alice</Name>\n\
             \x20\x20\x20\x20<Telephone>100</Telephone>\n\
             \x20\x20\x20\x20<Department>Sales</Department>\n\
             \x20\x20</DirectoryEntry>\n\
             </YealinkIPPhoneDirectory>\n"
        );
    }

    #[test]
    fn empty_department_is_omitted() {
        let entries = vec![DirectoryEntry::new("Bob", "101", "")];
        let text = String::from_utf8(write_document(&entries)).unwrap();
        assert!(!text.contains("Department"));
    }

    #[test]
    fn text_is_escaped() {
        let entries = vec![DirectoryEntry::new("R&D <lab>", "102", "")];
        let text = String::from_utf8(write_document(&entries)).unwrap();
        assert!(text.contains("<Name>R&amp;D &lt;lab&gt;</Name>"));
    }

    #[test]
    fn output_is_deterministic() {
        let entries = vec![
            DirectoryEntry::new("Alice", "100", "Sales"),
            DirectoryEntry::new("Bob", "101", ""),
        ];
        assert_eq!(write_document(&entries), write_document(&entries));
    }
}
