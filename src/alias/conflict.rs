//! Live alias conflict detection.
//!
//! Two live aliases that fold to the same key make resolution ambiguous,
//! so the index refuses to build while any conflict exists.

use rustc_hash::FxHashMap;

use super::AliasIndexEntry;
use crate::log;
use crate::utils::plural_s;

/// Folded path -> every live alias claiming it, in input order.
pub(super) type ClaimMap = FxHashMap<String, Vec<AliasClaim>>;

/// One live alias claiming a folded path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasClaim {
    pub document_id: String,
    pub key: String,
    /// Alias path in its recorded casing
    pub path: String,
}

impl From<&AliasIndexEntry> for AliasClaim {
    fn from(entry: &AliasIndexEntry) -> Self {
        Self {
            document_id: entry.document_id.clone(),
            key: entry.key.clone(),
            path: entry.canonical_path.clone(),
        }
    }
}

/// A folded path claimed by more than one live alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasConflict {
    /// The shared folded path
    pub normalized_path: String,
    pub claims: Vec<AliasClaim>,
}

/// Collect every folded path with more than one claim.
///
/// Sorted by folded path so the report is stable across builds.
pub(super) fn detect_conflicts(claims: ClaimMap) -> Vec<AliasConflict> {
    let mut conflicts: Vec<_> = claims
        .into_iter()
        .filter(|(_, claims)| claims.len() > 1)
        .map(|(normalized_path, claims)| AliasConflict {
            normalized_path,
            claims,
        })
        .collect();
    conflicts.sort_by(|a, b| a.normalized_path.cmp(&b.normalized_path));
    conflicts
}

/// Print conflicts using the standard log format.
///
/// Output format:
/// ```text
/// [error] alias conflicts (1 path, 2 claims)
/// [alias] product/baz/ (2 claims)
///   - test_id: Product/Baz/ (baz)
///   - other_id: product/BAZ/ (baz)
/// ```
pub fn print_conflicts(conflicts: &[AliasConflict]) {
    if conflicts.is_empty() {
        return;
    }

    let total: usize = conflicts.iter().map(|c| c.claims.len()).sum();
    log!("error"; "alias conflicts ({} path{}, {} claim{})",
        conflicts.len(), plural_s(conflicts.len()),
        total, plural_s(total));

    for conflict in conflicts {
        eprintln!();
        log!("alias"; "{} ({} claim{})", conflict.normalized_path, conflict.claims.len(), plural_s(conflict.claims.len()));
        for claim in &conflict.claims {
            eprintln!("  - {}", format_claim(claim));
        }
    }
}

/// Format conflicts as a string (for error messages).
pub fn format_conflicts(conflicts: &[AliasConflict]) -> String {
    conflicts
        .iter()
        .map(format_single_conflict)
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_single_conflict(conflict: &AliasConflict) -> String {
    let mut lines = vec![format!(
        "{} ({})",
        conflict.normalized_path,
        conflict.claims.len()
    )];
    for claim in &conflict.claims {
        lines.push(format!("  - {}", format_claim(claim)));
    }
    lines.join("\n")
}

fn format_claim(claim: &AliasClaim) -> String {
    format!("{}: {} ({})", claim.document_id, claim.path, claim.key)
}
