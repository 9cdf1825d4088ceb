//! Store configuration.

use std::path::PathBuf;

/// Default name of the directory document.
pub const DEFAULT_DOCUMENT_NAME: &str = "corporate_phonebook.xml";

/// Default base directory for served phone files.
pub const DEFAULT_BASE_DIR: &str = "phone_files";

/// Configuration for opening a phonebook store.
///
/// The base directory is explicit configuration; there is no process-wide
/// default path.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the directory document and served phone files.
    pub base_dir: PathBuf,

    /// Filename of the directory document inside `base_dir`.
    pub document_name: String,

    /// Whether to create `base_dir` when it does not exist.
    pub create_base_dir: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            document_name: DEFAULT_DOCUMENT_NAME.to_string(),
            create_base_dir: true,
        }
    }
}

impl StoreConfig {
    /// Creates a configuration rooted at the given base directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    /// Sets the document filename.
    #[must_use]
    pub fn document_name(mut self, name: impl Into<String>) -> Self {
        self.document_name = name.into();
        self
    }

    /// Sets whether to create the base directory when missing.
    #[must_use]
    pub const fn create_base_dir(mut self, value: bool) -> Self {
        self.create_base_dir = value;
        self
    }

    /// Returns the full path of the directory document.
    #[must_use]
    pub fn document_path(&self) -> PathBuf {
        self.base_dir.join(&self.document_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.document_name, DEFAULT_DOCUMENT_NAME);
        assert!(config.create_base_dir);
    }

    #[test]
    fn builder_pattern() {
        let config = StoreConfig::new("/srv/phones")
            .document_name("book.xml")
            .create_base_dir(false);

        assert_eq!(config.document_path(), PathBuf::from("/srv/phones/book.xml"));
        assert!(!config.create_base_dir);
    }
}
