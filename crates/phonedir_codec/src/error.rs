//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type DocumentResult<T> = Result<T, DocumentError>;

/// Errors that can occur while parsing a directory document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Input bytes are not valid UTF-8.
    #[error("document is not valid UTF-8")]
    InvalidUtf8,

    /// The XML declaration names an encoding other than UTF-8.
    #[error("unsupported document encoding: {encoding}")]
    UnsupportedEncoding {
        /// The encoding named in the declaration.
        encoding: String,
    },

    /// The root element is not the expected directory container.
    #[error("wrong root element: expected {expected}, found {found}")]
    WrongRootElement {
        /// The tag name the parser expected.
        expected: &'static str,
        /// The tag name actually found.
        found: String,
    },

    /// A closing tag does not match the element it closes.
    #[error("mismatched closing tag: expected </{expected}>, found </{found}>")]
    MismatchedTag {
        /// The open element's tag name.
        expected: String,
        /// The closing tag actually found.
        found: String,
    },

    /// Input ended inside an element or tag.
    #[error("unexpected end of document")]
    UnexpectedEof,

    /// A character that cannot appear at this position.
    #[error("unexpected content at byte {offset}: {message}")]
    UnexpectedContent {
        /// Byte offset of the offending content.
        offset: usize,
        /// Description of what was expected.
        message: String,
    },

    /// An entity reference the parser does not recognize.
    #[error("unknown entity reference: &{name};")]
    UnknownEntity {
        /// The entity name between `&` and `;`.
        name: String,
    },
}

impl DocumentError {
    /// Creates an unsupported encoding error.
    pub fn unsupported_encoding(encoding: impl Into<String>) -> Self {
        Self::UnsupportedEncoding {
            encoding: encoding.into(),
        }
    }

    /// Creates a wrong root element error.
    pub fn wrong_root(expected: &'static str, found: impl Into<String>) -> Self {
        Self::WrongRootElement {
            expected,
            found: found.into(),
        }
    }

    /// Creates a mismatched tag error.
    pub fn mismatched_tag(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::MismatchedTag {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates an unexpected content error.
    pub fn unexpected_content(offset: usize, message: impl Into<String>) -> Self {
        Self::UnexpectedContent {
            offset,
            message: message.into(),
        }
    }

    /// Creates an unknown entity error.
    pub fn unknown_entity(name: impl Into<String>) -> Self {
        Self::UnknownEntity { name: name.into() }
    }
}
