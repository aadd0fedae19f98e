//! Document and alias records as supplied by the document store.

use serde::{Deserialize, Serialize};

/// One human-readable path claimed by a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    /// Path as recorded, canonical casing (e.g. `Product/Baz/`).
    #[serde(alias = "url")]
    pub path: String,
    /// Semantic slot this alias fills (language variant, naming scheme, ...)
    pub key: String,
}

impl AliasEntry {
    pub fn new(path: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
        }
    }

    /// Path without leading slashes, the form used for matching and output.
    #[inline]
    pub fn trimmed_path(&self) -> &str {
        self.path.trim_start_matches('/')
    }
}

/// A routable content document.
///
/// The router only references documents; storage and indexing belong to
/// the [`DocumentSource`](crate::store::DocumentSource) that supplies them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,

    /// Live aliases. Keys are unique within one document.
    #[serde(default, alias = "url")]
    pub aliases: Vec<AliasEntry>,

    /// Paths that were once canonical for this document.
    #[serde(default, alias = "expired_url")]
    pub expired_aliases: Vec<AliasEntry>,
}

impl Document {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Add a live alias.
    pub fn with_alias(mut self, path: impl Into<String>, key: impl Into<String>) -> Self {
        self.aliases.push(AliasEntry::new(path, key));
        self
    }

    /// Add an expired alias.
    pub fn with_expired(mut self, path: impl Into<String>, key: impl Into<String>) -> Self {
        self.expired_aliases.push(AliasEntry::new(path, key));
        self
    }

    /// First live alias filling `key`.
    pub fn alias_for_key(&self, key: &str) -> Option<&AliasEntry> {
        self.aliases.iter().find(|alias| alias.key == key)
    }
}
