//! Parser for the directory document.
//!
//! This is a small positional parser for the subset of XML the phone
//! directory format uses: a declaration, one root element, entry elements
//! with text-only children, comments, and attributes (which are accepted
//! and ignored). Structural damage is reported as a typed
//! [`DocumentError`]; missing sub-elements are not an error and map to
//! empty strings, because field validation is the store's job.

use crate::entry::DirectoryEntry;
use crate::error::{DocumentError, DocumentResult};
use crate::{DEPARTMENT_TAG, ENTRY_TAG, NAME_TAG, ROOT_TAG, TELEPHONE_TAG};

/// Parse directory document bytes into entries.
///
/// # Errors
///
/// Returns an error if the bytes are not UTF-8, the declaration names a
/// non-UTF-8 encoding, the root element is wrong, or the document is not
/// well-formed (unterminated or mismatched tags, unknown entities).
pub fn parse_document(bytes: &[u8]) -> DocumentResult<Vec<DirectoryEntry>> {
    let text = std::str::from_utf8(bytes).map_err(|_| DocumentError::InvalidUtf8)?;
    let mut parser = DocumentParser::new(text);
    parser.parse()
}

/// A positional parser over document text.
pub struct DocumentParser<'a> {
    data: &'a str,
    pos: usize,
}

impl<'a> DocumentParser<'a> {
    /// Create a new parser for the given document text.
    pub fn new(data: &'a str) -> Self {
        // A UTF-8 byte order mark is tolerated and skipped.
        let data = data.strip_prefix('\u{feff}').unwrap_or(data);
        Self { data, pos: 0 }
    }

    /// Parse the whole document.
    pub fn parse(&mut self) -> DocumentResult<Vec<DirectoryEntry>> {
        self.skip_misc();
        self.read_declaration()?;
        self.skip_misc();

        let (root, self_closing) = self.read_open_tag()?;
        if root != ROOT_TAG {
            return Err(DocumentError::wrong_root(ROOT_TAG, root));
        }
        if self_closing {
            self.expect_trailing()?;
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        loop {
            self.skip_text_and_misc()?;
            if self.peek_close_tag() {
                let close = self.read_close_tag()?;
                if close != ROOT_TAG {
                    return Err(DocumentError::mismatched_tag(ROOT_TAG, close));
                }
                break;
            }
            let (name, self_closing) = self.read_open_tag()?;
            if name == ENTRY_TAG {
                if self_closing {
                    entries.push(DirectoryEntry::new("", "", ""));
                } else {
                    entries.push(self.read_entry()?);
                }
            } else if !self_closing {
                self.skip_element(&name)?;
            }
        }

        self.expect_trailing()?;
        Ok(entries)
    }

    /// Read one entry element's children up to its closing tag.
    fn read_entry(&mut self) -> DocumentResult<DirectoryEntry> {
        let mut entry = DirectoryEntry::new("", "", "");
        loop {
            self.skip_text_and_misc()?;
            if self.peek_close_tag() {
                let close = self.read_close_tag()?;
                if close != ENTRY_TAG {
                    return Err(DocumentError::mismatched_tag(ENTRY_TAG, close));
                }
                return Ok(entry);
            }
            let (name, self_closing) = self.read_open_tag()?;
            match name.as_str() {
                NAME_TAG | TELEPHONE_TAG | DEPARTMENT_TAG => {
                    let text = if self_closing {
                        String::new()
                    } else {
                        self.read_text_element(&name)?
                    };
                    match name.as_str() {
                        NAME_TAG => entry.name = text,
                        TELEPHONE_TAG => entry.telephone = text,
                        _ => entry.department = text,
                    }
                }
                // Unknown sub-elements are tolerated and dropped, children
                // and all.
                _ => {
                    if !self_closing {
                        self.skip_element(&name)?;
                    }
                }
            }
        }
    }

    /// Read the text content of an open element through its closing tag.
    fn read_text_element(&mut self, tag: &str) -> DocumentResult<String> {
        let mut text = String::new();
        loop {
            let chunk = self.read_text_chunk(&mut text)?;
            match chunk {
                TextStop::CloseTag => {
                    let close = self.read_close_tag()?;
                    if close != tag {
                        return Err(DocumentError::mismatched_tag(tag, close));
                    }
                    return Ok(text);
                }
                TextStop::Comment => self.skip_comment()?,
                TextStop::Element => {
                    return Err(DocumentError::unexpected_content(
                        self.pos,
                        format!("nested element inside <{tag}>"),
                    ));
                }
            }
        }
    }

    /// Accumulate unescaped text until the next markup boundary.
    fn read_text_chunk(&mut self, out: &mut String) -> DocumentResult<TextStop> {
        let bytes = self.data.as_bytes();
        loop {
            match bytes.get(self.pos) {
                None => return Err(DocumentError::UnexpectedEof),
                Some(b'<') => {
                    if self.rest().starts_with("</") {
                        return Ok(TextStop::CloseTag);
                    }
                    if self.rest().starts_with("<!--") {
                        return Ok(TextStop::Comment);
                    }
                    return Ok(TextStop::Element);
                }
                Some(b'&') => {
                    self.pos += 1;
                    out.push(self.read_entity()?);
                }
                Some(_) => {
                    let start = self.pos;
                    while self.pos < bytes.len()
                        && bytes[self.pos] != b'<'
                        && bytes[self.pos] != b'&'
                    {
                        self.pos += 1;
                    }
                    out.push_str(&self.data[start..self.pos]);
                }
            }
        }
    }

    /// Decode one entity reference; the leading `&` is already consumed.
    fn read_entity(&mut self) -> DocumentResult<char> {
        let rest = self.rest();
        let Some(end) = rest.find(';') else {
            return Err(DocumentError::unexpected_content(
                self.pos,
                "unterminated entity reference",
            ));
        };
        let name = &rest[..end];
        self.pos += end + 1;
        match name {
            "amp" => Ok('&'),
            "lt" => Ok('<'),
            "gt" => Ok('>'),
            "quot" => Ok('"'),
            "apos" => Ok('\''),
            _ => {
                let value = name
                    .strip_prefix("#x")
                    .or_else(|| name.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| name.strip_prefix('#').and_then(|dec| dec.parse().ok()));
                value
                    .and_then(char::from_u32)
                    .ok_or_else(|| DocumentError::unknown_entity(name))
            }
        }
    }

    /// Read an opening tag, returning its name and whether it self-closes.
    /// Attributes are scanned over and discarded.
    fn read_open_tag(&mut self) -> DocumentResult<(String, bool)> {
        self.expect(b'<')?;
        let name = self.read_tag_name()?;

        let bytes = self.data.as_bytes();
        let mut in_quote: Option<u8> = None;
        while let Some(&byte) = bytes.get(self.pos) {
            self.pos += 1;
            match in_quote {
                Some(quote) if byte == quote => in_quote = None,
                Some(_) => {}
                None => match byte {
                    b'"' | b'\'' => in_quote = Some(byte),
                    b'>' => return Ok((name, false)),
                    b'/' => {
                        if bytes.get(self.pos) == Some(&b'>') {
                            self.pos += 1;
                            return Ok((name, true));
                        }
                        return Err(DocumentError::unexpected_content(
                            self.pos,
                            "stray '/' inside tag",
                        ));
                    }
                    _ => {}
                },
            }
        }
        Err(DocumentError::UnexpectedEof)
    }

    /// Read a closing tag and return its name.
    fn read_close_tag(&mut self) -> DocumentResult<String> {
        self.expect(b'<')?;
        self.expect(b'/')?;
        let name = self.read_tag_name()?;
        self.skip_whitespace();
        self.expect(b'>')?;
        Ok(name)
    }

    fn read_tag_name(&mut self) -> DocumentResult<String> {
        let bytes = self.data.as_bytes();
        let start = self.pos;
        while self.pos < bytes.len() && is_name_byte(bytes[self.pos]) {
            self.pos += 1;
        }
        if self.pos == start {
            if self.pos >= bytes.len() {
                return Err(DocumentError::UnexpectedEof);
            }
            return Err(DocumentError::unexpected_content(
                self.pos,
                "expected a tag name",
            ));
        }
        Ok(self.data[start..self.pos].to_string())
    }

    /// Skip an already-opened unknown element, including nested children.
    fn skip_element(&mut self, tag: &str) -> DocumentResult<()> {
        loop {
            self.skip_text_and_misc()?;
            if self.peek_close_tag() {
                let close = self.read_close_tag()?;
                if close != tag {
                    return Err(DocumentError::mismatched_tag(tag, close));
                }
                return Ok(());
            }
            let (child, self_closing) = self.read_open_tag()?;
            if !self_closing {
                self.skip_element(&child)?;
            }
        }
    }

    /// Validate the optional XML declaration.
    fn read_declaration(&mut self) -> DocumentResult<()> {
        if !self.rest().starts_with("<?") {
            return Ok(());
        }
        let Some(end) = self.rest().find("?>") else {
            return Err(DocumentError::UnexpectedEof);
        };
        let declaration = &self.rest()[..end];
        if let Some(encoding) = declared_encoding(declaration) {
            if !encoding.eq_ignore_ascii_case("utf-8") {
                return Err(DocumentError::unsupported_encoding(encoding));
            }
        }
        self.pos += end + 2;
        Ok(())
    }

    /// After the root closes, only whitespace and comments may remain.
    fn expect_trailing(&mut self) -> DocumentResult<()> {
        self.skip_misc();
        if self.pos < self.data.len() {
            return Err(DocumentError::unexpected_content(
                self.pos,
                "content after the root element",
            ));
        }
        Ok(())
    }

    /// Skip whitespace and comments.
    fn skip_misc(&mut self) {
        loop {
            self.skip_whitespace();
            if self.rest().starts_with("<!--") {
                if self.skip_comment().is_err() {
                    // An unterminated trailing comment surfaces as
                    // UnexpectedEof at the next read.
                    return;
                }
            } else {
                return;
            }
        }
    }

    /// Skip text, whitespace, and comments between child elements.
    fn skip_text_and_misc(&mut self) -> DocumentResult<()> {
        let bytes = self.data.as_bytes();
        loop {
            while self.pos < bytes.len() && bytes[self.pos] != b'<' {
                self.pos += 1;
            }
            if self.pos >= bytes.len() {
                return Err(DocumentError::UnexpectedEof);
            }
            if self.rest().starts_with("<!--") {
                self.skip_comment()?;
            } else {
                return Ok(());
            }
        }
    }

    fn skip_comment(&mut self) -> DocumentResult<()> {
        debug_assert!(self.rest().starts_with("<!--"));
        let Some(end) = self.rest().find("-->") else {
            return Err(DocumentError::UnexpectedEof);
        };
        self.pos += end + 3;
        Ok(())
    }

    fn skip_whitespace(&mut self) {
        let bytes = self.data.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn peek_close_tag(&self) -> bool {
        self.rest().starts_with("</")
    }

    fn rest(&self) -> &'a str {
        &self.data[self.pos..]
    }

    fn expect(&mut self, byte: u8) -> DocumentResult<()> {
        match self.data.as_bytes().get(self.pos) {
            Some(&found) if found == byte => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(DocumentError::unexpected_content(
                self.pos,
                format!("expected '{}'", byte as char),
            )),
            None => Err(DocumentError::UnexpectedEof),
        }
    }
}

/// Where a text scan stopped.
enum TextStop {
    CloseTag,
    Comment,
    Element,
}

fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'-' | b'.' | b':')
}

/// Extract the encoding value from a declaration, if one is present.
fn declared_encoding(declaration: &str) -> Option<&str> {
    let idx = declaration.find("encoding")?;
    let rest = declaration[idx + "encoding".len()..].trim_start();
    let rest = rest.strip_prefix('=')?.trim_start();
    let quote = rest.chars().next()?;
    if quote != '"' && quote != '\'' {
        return None;
    }
    let rest = &rest[1..];
    let end = rest.find(quote)?;
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> DocumentResult<Vec<DirectoryEntry>> {
        parse_document(text.as_bytes())
    }

    #[test]
    fn parse_empty_self_closing_root() {
        let entries = parse("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<YealinkIPPhoneDirectory/>\n").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn parse_empty_open_close_root() {
        let entries = parse("<YealinkIPPhoneDirectory></YealinkIPPhoneDirectory>").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn parse_full_entry() {
        let entries = parse(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <YealinkIPPhoneDirectory>\n\
             \x20\x20<DirectoryEntry>\n\
             \x20\x20\x20\x20<Name>Alice</Name>\n\
             \x20\x20\x20\x20<Telephone>100</Telephone>\n\
             \x20\x20\x20\x20<Department>Sales</Department>\n\
             \x20\x20</DirectoryEntry>\n\
             </YealinkIPPhoneDirectory>\n",
        )
        .unwrap();
        assert_eq!(entries, vec![DirectoryEntry::new("Alice", "100", "Sales")]);
    }

    #[test]
    fn missing_subelements_map_to_empty_strings() {
        let entries = parse(
            "<YealinkIPPhoneDirectory>\
             <DirectoryEntry><Name>Bob</Name></DirectoryEntry>\
             </YealinkIPPhoneDirectory>",
        )
        .unwrap();
        assert_eq!(entries, vec![DirectoryEntry::new("Bob", "", "")]);
    }

    #[test]
    fn empty_and_self_closing_subelements() {
        let entries = parse(
            "<YealinkIPPhoneDirectory>\
             <DirectoryEntry><Name/><Telephone></Telephone></DirectoryEntry>\
             </YealinkIPPhoneDirectory>",
        )
        .unwrap();
        assert_eq!(entries, vec![DirectoryEntry::new("", "", "")]);
    }

    #[test]
    fn entities_are_unescaped() {
        let entries = parse(
            "<YealinkIPPhoneDirectory>\
             <DirectoryEntry><Name>R&amp;D &lt;lab&gt;</Name>\
             <Telephone>&#52;&#x34;</Telephone></DirectoryEntry>\
             </YealinkIPPhoneDirectory>",
        )
        .unwrap();
        assert_eq!(entries[0].name, "R&D <lab>");
        assert_eq!(entries[0].telephone, "44");
    }

    #[test]
    fn unknown_entity_is_rejected() {
        let result = parse(
            "<YealinkIPPhoneDirectory>\
             <DirectoryEntry><Name>&bogus;</Name></DirectoryEntry>\
             </YealinkIPPhoneDirectory>",
        );
        assert!(matches!(result, Err(DocumentError::UnknownEntity { .. })));
    }

    #[test]
    fn attributes_and_comments_are_tolerated() {
        let entries = parse(
            "<!-- exported -->\n\
             <YealinkIPPhoneDirectory version=\"1\">\n\
             <!-- first -->\n\
             <DirectoryEntry id=\"a/b\"><Name>Alice<!-- x --></Name>\
             <Telephone>100</Telephone></DirectoryEntry>\n\
             </YealinkIPPhoneDirectory>\n\
             <!-- trailing -->",
        )
        .unwrap();
        assert_eq!(entries, vec![DirectoryEntry::new("Alice", "100", "")]);
    }

    #[test]
    fn unknown_elements_are_skipped() {
        let entries = parse(
            "<YealinkIPPhoneDirectory>\
             <Title>staff</Title>\
             <DirectoryEntry><Name>Alice</Name><Telephone>100</Telephone>\
             <Ringtone>chime</Ringtone></DirectoryEntry>\
             </YealinkIPPhoneDirectory>",
        )
        .unwrap();
        assert_eq!(entries, vec![DirectoryEntry::new("Alice", "100", "")]);
    }

    #[test]
    fn unknown_subelement_with_children_is_skipped() {
        let entries = parse(
            "<YealinkIPPhoneDirectory>\
             <DirectoryEntry><Name>Alice</Name><Telephone>100</Telephone>\
             <Extra><Sub>x</Sub><Empty/></Extra></DirectoryEntry>\
             </YealinkIPPhoneDirectory>",
        )
        .unwrap();
        assert_eq!(entries, vec![DirectoryEntry::new("Alice", "100", "")]);
    }

    #[test]
    fn wrong_root_is_rejected() {
        let result = parse("<AddressBook></AddressBook>");
        assert!(matches!(
            result,
            Err(DocumentError::WrongRootElement { .. })
        ));
    }

    #[test]
    fn wrong_encoding_is_rejected() {
        let result = parse(
            "<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\
             <YealinkIPPhoneDirectory/>",
        );
        assert!(matches!(
            result,
            Err(DocumentError::UnsupportedEncoding { .. })
        ));
    }

    #[test]
    fn non_utf8_is_rejected() {
        let result = parse_document(&[b'<', 0xff, 0xfe]);
        assert!(matches!(result, Err(DocumentError::InvalidUtf8)));
    }

    #[test]
    fn unterminated_root_is_rejected() {
        let result = parse("<YealinkIPPhoneDirectory><DirectoryEntry>");
        assert!(matches!(result, Err(DocumentError::UnexpectedEof)));
    }

    #[test]
    fn mismatched_close_is_rejected() {
        let result = parse(
            "<YealinkIPPhoneDirectory>\
             <DirectoryEntry><Name>x</Telephone></DirectoryEntry>\
             </YealinkIPPhoneDirectory>",
        );
        assert!(matches!(result, Err(DocumentError::MismatchedTag { .. })));
    }

    #[test]
    fn content_after_root_is_rejected() {
        let result = parse("<YealinkIPPhoneDirectory/>extra");
        assert!(matches!(
            result,
            Err(DocumentError::UnexpectedContent { .. })
        ));
    }
}
