//! Case folding for alias matching.
//!
//! Folded strings are lookup keys only. They are never stored as a path
//! and never written to output.

/// Full Unicode case fold of an alias or request path.
///
/// Leading slashes are dropped so `/Product/Baz/` and `Product/Baz/` fold
/// to the same key.
pub fn fold_path(path: &str) -> String {
    caseless::default_case_fold_str(path.trim_start_matches('/'))
}
