//! Document sources feeding the router.
//!
//! The router never queries storage itself: a source hands over the full
//! alias universe (live + expired) each time it is loaded.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::alias::Document;

/// Supplies every routable document.
pub trait DocumentSource: Send + Sync {
    /// Load the complete document set.
    fn load(&self) -> Result<Vec<Document>>;

    /// Human-readable name for logs.
    fn describe(&self) -> String;
}

/// Fixed in-memory document set.
impl DocumentSource for Vec<Document> {
    fn load(&self) -> Result<Vec<Document>> {
        Ok(self.clone())
    }

    fn describe(&self) -> String {
        format!("memory ({} documents)", self.len())
    }
}

/// JSON array of documents on disk.
///
/// ```json
/// [{ "id": "test_id", "aliases": [{ "path": "Product/Baz/", "key": "baz" }] }]
/// ```
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for JsonFileStore {
    fn load(&self) -> Result<Vec<Document>> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        let documents = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse documents in {}", self.path.display()))?;
        Ok(documents)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
