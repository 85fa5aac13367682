#![deny(missing_docs)]

//! # Implementation Sources
//!
//! The filesystem capability handed to the auditor. Files are addressed by
//! their stem (e.g. `roles-service`); each implementation decides where the
//! stem lives.

use crate::error::AppResult;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Read-only access to service implementation files.
///
/// Abstracted so the auditor can run against an in-memory tree in tests.
pub trait ServiceSources {
    /// Whether an implementation file with this stem exists.
    fn exists(&self, stem: &str) -> bool;

    /// Reads the implementation file with this stem.
    fn read(&self, stem: &str) -> AppResult<String>;
}

/// Implementation files stored as `<root>/<stem>.<extension>`.
#[derive(Debug, Clone)]
pub struct DirectorySources {
    root: PathBuf,
    extension: String,
}

impl DirectorySources {
    /// Creates a source tree rooted at `root`.
    ///
    /// A leading `.` on `extension` is ignored, so `ts` and `.ts` are equivalent.
    pub fn new(root: impl Into<PathBuf>, extension: &str) -> Self {
        Self {
            root: root.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Directory holding the implementation files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the file for `stem`.
    pub fn path_for(&self, stem: &str) -> PathBuf {
        if self.extension.is_empty() {
            self.root.join(stem)
        } else {
            self.root.join(format!("{}.{}", stem, self.extension))
        }
    }
}

impl ServiceSources for DirectorySources {
    fn exists(&self, stem: &str) -> bool {
        self.path_for(stem).is_file()
    }

    fn read(&self, stem: &str) -> AppResult<String> {
        Ok(fs::read_to_string(self.path_for(stem))?)
    }
}

/// Implementation files held in memory, keyed by stem.
#[derive(Debug, Clone, Default)]
pub struct MemorySources {
    files: HashMap<String, String>,
}

impl MemorySources {
    /// Adds (or replaces) a file.
    pub fn insert(&mut self, stem: impl Into<String>, text: impl Into<String>) {
        self.files.insert(stem.into(), text.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemorySources {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            files: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ServiceSources for MemorySources {
    fn exists(&self, stem: &str) -> bool {
        self.files.contains_key(stem)
    }

    fn read(&self, stem: &str) -> AppResult<String> {
        self.files.get(stem).cloned().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, format!("no file '{}'", stem)).into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_directory_sources_paths() {
        let with_dot = DirectorySources::new("src/services", ".ts");
        let without_dot = DirectorySources::new("src/services", "ts");
        assert_eq!(with_dot.path_for("roles"), PathBuf::from("src/services/roles.ts"));
        assert_eq!(with_dot.path_for("roles"), without_dot.path_for("roles"));
        assert_eq!(
            DirectorySources::new("svc", "").path_for("roles"),
            PathBuf::from("svc/roles")
        );
    }

    #[test]
    fn test_directory_sources_reads_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("roles.ts"), "this.operations.list").unwrap();
        fs::create_dir(dir.path().join("folder.ts")).unwrap();

        let sources = DirectorySources::new(dir.path(), "ts");
        assert!(sources.exists("roles"));
        assert!(!sources.exists("ghost"));
        assert!(!sources.exists("folder"));
        assert_eq!(sources.read("roles").unwrap(), "this.operations.list");
        assert!(sources.read("ghost").is_err());
    }

    #[test]
    fn test_memory_sources() {
        let sources: MemorySources = [("roles", "x")].into_iter().collect();
        assert!(sources.exists("roles"));
        assert!(!sources.exists("ghost"));
        assert_eq!(sources.read("roles").unwrap(), "x");
        assert!(sources.read("ghost").is_err());
    }
}
