//! Static data sources that collections load from.
//!
//! Paths are written the way the web app served them (`/data/igrs/cases.json`).
//! [`FileSource`] resolves them under a root directory; [`StaticSource`] keeps
//! the documents in memory.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// Somewhere a collection's raw JSON document can be fetched from.
pub trait DataSource: Send + Sync {
    /// Returns the document stored at `path`.
    fn read(&self, path: &str) -> Result<String>;
}

/// Reads documents from files under a root directory.
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File system location of `path`.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl DataSource for FileSource {
    fn read(&self, path: &str) -> Result<String> {
        std::fs::read_to_string(self.resolve(path))
            .map_err(|err| StoreError::load(path, io_status(&err)))
    }
}

fn io_status(err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::NotFound => "not found".to_string(),
        io::ErrorKind::PermissionDenied => "permission denied".to_string(),
        _ => err.to_string(),
    }
}

/// In-memory documents keyed by path.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    documents: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document.
    pub fn with(mut self, path: impl Into<String>, json: impl Into<String>) -> Self {
        self.insert(path, json);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, json: impl Into<String>) {
        self.documents.insert(path.into(), json.into());
    }
}

impl DataSource for StaticSource {
    fn read(&self, path: &str) -> Result<String> {
        self.documents
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::load(path, "not found"))
    }
}
