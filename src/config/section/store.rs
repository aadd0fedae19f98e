//! `[store]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [store]
//! documents = "documents.json"   # relative to the config file
//! watch = true                   # rebuild the index when the file changes
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Document store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON document file. Made absolute against the project root on load.
    pub documents: PathBuf,

    /// Watch the document file and refresh while serving.
    pub watch: bool,
}

impl StoreConfig {
    pub const DOCUMENTS: FieldPath = FieldPath::new("store.documents");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.documents.is_file() {
            diag.error_with_hint(
                Self::DOCUMENTS,
                format!("document file `{}` not found", self.documents.display()),
                "point `store.documents` at a JSON array of documents",
            );
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            documents: PathBuf::from("documents.json"),
            watch: true,
        }
    }
}
