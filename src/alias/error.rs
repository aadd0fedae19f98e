//! Alias index build errors.

use thiserror::Error;

use super::conflict::{AliasConflict, format_conflicts};

/// Reasons an alias index refuses to build.
///
/// A failed build never replaces a snapshot that is already in service.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("{} live alias conflict(s):\n{}", .0.len(), format_conflicts(.0))]
    Conflicts(Vec<AliasConflict>),

    #[error("document `{document_id}` declares alias key `{key}` more than once")]
    DuplicateKey { document_id: String, key: String },
}

impl IndexError {
    /// Conflicts carried by this error (empty for other variants).
    pub fn conflicts(&self) -> &[AliasConflict] {
        match self {
            Self::Conflicts(conflicts) => conflicts,
            Self::DuplicateKey { .. } => &[],
        }
    }
}
