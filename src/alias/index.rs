//! Case-insensitive alias index.
//!
//! Built once from the whole alias universe, then only read. Entries live
//! in an arena; the lookup table maps folded paths to arena slots.

use rustc_hash::{FxHashMap, FxHashSet};

use super::conflict::{AliasClaim, ClaimMap, detect_conflicts};
use super::{Document, IndexError, fold_path};
use crate::debug;

/// One resolvable path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasIndexEntry {
    /// Case-folded lookup key
    pub normalized_path: String,
    pub document_id: String,
    pub key: String,
    /// Path to serve or redirect to, in recorded casing, no leading slash.
    ///
    /// For expired entries this is the live alias of the same key.
    pub canonical_path: String,
    pub is_expired: bool,
}

/// Counters collected while building an index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Live aliases indexed
    pub live: usize,
    /// Expired aliases indexed as redirects
    pub expired: usize,
    /// Expired aliases hidden by a live alias or an earlier expired one
    pub shadowed: usize,
    /// Expired aliases whose key has no live alias anymore
    pub dropped: usize,
}

/// Folded path -> alias record.
#[derive(Debug, Default)]
pub struct AliasIndex {
    entries: Vec<AliasIndexEntry>,
    by_path: FxHashMap<String, usize>,
    stats: BuildStats,
}

impl AliasIndex {
    /// Build an index from every document's live and expired aliases.
    ///
    /// Fails if two live aliases fold to the same path or if a document
    /// repeats a live key. Expired aliases never shadow live ones.
    pub fn build<'a>(
        documents: impl IntoIterator<Item = &'a Document>,
    ) -> Result<Self, IndexError> {
        let documents: Vec<&Document> = documents.into_iter().collect();
        let mut index = Self::default();

        for doc in &documents {
            check_unique_keys(doc)?;
        }

        index.insert_live(&documents)?;
        index.insert_expired(&documents);

        debug!("index"; "built: {} live, {} expired, {} shadowed, {} dropped",
            index.stats.live, index.stats.expired, index.stats.shadowed, index.stats.dropped);

        Ok(index)
    }

    fn insert_live(&mut self, documents: &[&Document]) -> Result<(), IndexError> {
        let mut claims = ClaimMap::default();

        for doc in documents {
            for alias in &doc.aliases {
                let entry = AliasIndexEntry {
                    normalized_path: fold_path(&alias.path),
                    document_id: doc.id.clone(),
                    key: alias.key.clone(),
                    canonical_path: alias.trimmed_path().to_string(),
                    is_expired: false,
                };
                claims
                    .entry(entry.normalized_path.clone())
                    .or_default()
                    .push(AliasClaim::from(&entry));
                self.push(entry);
            }
        }

        let conflicts = detect_conflicts(claims);
        if !conflicts.is_empty() {
            return Err(IndexError::Conflicts(conflicts));
        }

        self.stats.live = self.entries.len();
        Ok(())
    }

    fn insert_expired(&mut self, documents: &[&Document]) {
        for doc in documents {
            for expired in &doc.expired_aliases {
                let normalized_path = fold_path(&expired.path);
                if self.by_path.contains_key(&normalized_path) {
                    debug!("index"; "expired alias shadowed: {} ({})", expired.path, doc.id);
                    self.stats.shadowed += 1;
                    continue;
                }

                let Some(live) = doc.alias_for_key(&expired.key) else {
                    debug!("index"; "expired alias dropped, no live key `{}`: {} ({})",
                        expired.key, expired.path, doc.id);
                    self.stats.dropped += 1;
                    continue;
                };

                self.push(AliasIndexEntry {
                    normalized_path,
                    document_id: doc.id.clone(),
                    key: expired.key.clone(),
                    canonical_path: live.trimmed_path().to_string(),
                    is_expired: true,
                });
                self.stats.expired += 1;
            }
        }
    }

    /// Insert unless the folded path is already taken. First insert wins.
    fn push(&mut self, entry: AliasIndexEntry) {
        let slot = self.entries.len();
        if let std::collections::hash_map::Entry::Vacant(vacant) =
            self.by_path.entry(entry.normalized_path.clone())
        {
            vacant.insert(slot);
            self.entries.push(entry);
        }
    }

    /// Find the entry whose folded path matches the folded `path`.
    pub fn lookup(&self, path: &str) -> Option<&AliasIndexEntry> {
        self.by_path
            .get(&fold_path(path))
            .map(|&slot| &self.entries[slot])
    }

    /// Number of indexed paths (live + expired).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }
}

fn check_unique_keys(doc: &Document) -> Result<(), IndexError> {
    let mut seen = FxHashSet::default();
    for alias in &doc.aliases {
        if !seen.insert(alias.key.as_str()) {
            return Err(IndexError::DuplicateKey {
                document_id: doc.id.clone(),
                key: alias.key.clone(),
            });
        }
    }
    Ok(())
}
