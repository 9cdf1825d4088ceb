//! Allow-list-gated file serving.

use crate::access_log::{AccessLog, AccessRecord};
use crate::config::DEFAULT_DOCUMENT_NAME;
use crate::error::{StoreError, StoreResult};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::warn;

/// Filenames servable by default: the handset provisioning configs plus
/// the directory document.
pub const DEFAULT_ALLOWED_FILES: [&str; 3] = [
    "f0DPH-150GEhw1.100.cfg",
    "a09f7a58f99f.cfg",
    DEFAULT_DOCUMENT_NAME,
];

/// A file resolved for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedFile {
    /// The requested filename.
    pub name: String,
    /// Content type for delivery (`text/xml` for `.xml`, `text/plain`
    /// otherwise).
    pub content_type: &'static str,
    /// The file's bytes.
    pub bytes: Vec<u8>,
}

/// Serves files from a base directory, gated by an allow-list.
///
/// Resolution is a pure filename lookup independent of any transport:
/// a name either is on the allow-list and present (served), on the list
/// but absent (`NotFound`), or not on the list at all (`AccessDenied`).
/// The optional access log records every [`FileServer::serve`] outcome.
pub struct FileServer {
    root: PathBuf,
    allowed: Vec<String>,
    log: Option<AccessLog>,
}

impl FileServer {
    /// Creates a server over `root` with the default allow-list.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_allowed(
            root,
            DEFAULT_ALLOWED_FILES.iter().map(|name| name.to_string()),
        )
    }

    /// Creates a server over `root` with an explicit allow-list.
    pub fn with_allowed(
        root: impl Into<PathBuf>,
        allowed: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            root: root.into(),
            allowed: allowed.into_iter().collect(),
            log: None,
        }
    }

    /// Attaches an access log; every serve outcome is recorded to it.
    #[must_use]
    pub fn with_access_log(mut self, log: AccessLog) -> Self {
        self.log = Some(log);
        self
    }

    /// Resolves a filename against the allow-list and the base directory.
    ///
    /// # Errors
    ///
    /// `AccessDenied` when the name is not allow-listed, `NotFound` when
    /// it is listed but absent on disk.
    pub fn resolve(&self, name: &str) -> StoreResult<ServedFile> {
        if !self.allowed.iter().any(|allowed| allowed == name) {
            return Err(StoreError::access_denied(name));
        }
        match std::fs::read(self.root.join(name)) {
            Ok(bytes) => Ok(ServedFile {
                name: name.to_string(),
                content_type: content_type_for(name),
                bytes,
            }),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(StoreError::not_found(name)),
            Err(err) => Err(err.into()),
        }
    }

    /// Resolves a filename and records the outcome for `subject`.
    ///
    /// A failed log append is downgraded to a warning; it never fails the
    /// serve itself.
    pub fn serve(&self, subject: &str, name: &str) -> StoreResult<ServedFile> {
        let result = self.resolve(name);
        let status = match &result {
            Ok(_) => 200,
            Err(StoreError::AccessDenied { .. }) => 403,
            Err(StoreError::NotFound { .. }) => 404,
            Err(_) => 500,
        };
        if let Some(log) = &self.log {
            if let Err(err) = log.append(&AccessRecord::now(subject, name, status)) {
                warn!(%err, resource = name, "access log append failed");
            }
        }
        result
    }
}

/// Content type used when delivering a file.
#[must_use]
pub fn content_type_for(name: &str) -> &'static str {
    if name.ends_with(".xml") {
        "text/xml"
    } else {
        "text/plain"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn unlisted_name_is_denied() {
        let dir = tempdir().unwrap();
        let server = FileServer::new(dir.path());
        assert!(matches!(
            server.resolve("../etc/passwd"),
            Err(StoreError::AccessDenied { .. })
        ));
    }

    #[test]
    fn listed_but_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let server = FileServer::new(dir.path());
        assert!(matches!(
            server.resolve("a09f7a58f99f.cfg"),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn listed_and_present_is_served_with_content_type() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_DOCUMENT_NAME), b"<x/>").unwrap();
        std::fs::write(dir.path().join("a09f7a58f99f.cfg"), b"cfg").unwrap();

        let server = FileServer::new(dir.path());
        let xml = server.resolve(DEFAULT_DOCUMENT_NAME).unwrap();
        assert_eq!(xml.content_type, "text/xml");
        assert_eq!(xml.bytes, b"<x/>");

        let cfg = server.resolve("a09f7a58f99f.cfg").unwrap();
        assert_eq!(cfg.content_type, "text/plain");
    }

    #[test]
    fn serve_records_outcomes() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_DOCUMENT_NAME), b"<x/>").unwrap();

        let log = AccessLog::new(dir.path().join("access.log"));
        let server = FileServer::new(dir.path()).with_access_log(log.clone());

        server.serve("10.0.0.1", DEFAULT_DOCUMENT_NAME).unwrap();
        let _ = server.serve("10.0.0.1", "a09f7a58f99f.cfg");
        let _ = server.serve("10.0.0.2", "secrets.txt");

        let records = log.read_all().unwrap();
        let statuses: Vec<u16> = records.iter().map(|record| record.status).collect();
        assert_eq!(statuses, vec![403, 404, 200]);
    }
}
