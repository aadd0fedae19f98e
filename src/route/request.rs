//! Incoming request targets and origins.
//!
//! - Raw path: as received (percent-encoded), used for fallback matching
//! - Decoded path: human-readable, used for alias matching

use percent_encoding::percent_decode_str;
use url::Url;

use super::{ResolveError, escape_path};

/// Path and query of an incoming request.
///
/// Accepts origin-form (`/a/b/?q=1`) and absolute-form
/// (`http://host/a/b/?q=1`); scheme and host of the latter are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    raw_path: String,
    path: String,
    query: Option<String>,
}

impl RequestTarget {
    pub fn parse(request: &str) -> Self {
        let request = request.trim();
        let (raw_path, query) = split_origin_form(strip_authority(request).unwrap_or(request));
        let path = decode(&raw_path);

        Self {
            raw_path,
            path,
            query,
        }
    }

    /// Path as received, always starting with `/`.
    pub fn raw_path(&self) -> &str {
        &self.raw_path
    }

    /// Percent-decoded path, always starting with `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query string without `?`, carried through unmodified.
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }
}

/// Strip `scheme://authority` from an absolute-form request.
///
/// The remainder is kept byte for byte: no dot-segment removal and no
/// re-encoding of path or query.
fn strip_authority(request: &str) -> Option<&str> {
    let (scheme, rest) = request.split_once("://")?;
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid {
        return None;
    }

    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(&rest[end..])
}

/// Split `/path?query#fragment`, dropping the fragment.
fn split_origin_form(request: &str) -> (String, Option<String>) {
    let without_fragment = request.split('#').next().unwrap_or(request);
    let (path, query) = match without_fragment.split_once('?') {
        Some((path, query)) => (path, Some(query.to_string())),
        None => (without_fragment, None),
    };

    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    (path, query)
}

/// Decode percent-encoding; invalid UTF-8 leaves the path as received.
fn decode(raw: &str) -> String {
    percent_decode_str(raw)
        .decode_utf8()
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

/// Scheme and authority of the incoming request, e.g. `http://localhost`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOrigin(String);

impl RequestOrigin {
    /// Parse an origin. Anything without a scheme and a host is rejected.
    pub fn parse(origin: &str) -> Result<Self, ResolveError> {
        let malformed = || ResolveError::MalformedOrigin(origin.to_string());
        let url = Url::parse(origin.trim()).map_err(|_| malformed())?;
        if !url.has_host() || url.cannot_be_a_base() {
            return Err(malformed());
        }

        let serialized = url.origin().ascii_serialization();
        // Opaque origins (non-special schemes) serialize as "null"
        if serialized == "null" {
            return Err(malformed());
        }
        Ok(Self(serialized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Absolute URL for `path` (no leading slash) and an optional query.
    pub fn join(&self, path: &str, query: Option<&str>) -> String {
        let path = escape_path(path);
        match query {
            Some(query) => format!("{}/{}?{}", self.0, path, query),
            None => format!("{}/{}", self.0, path),
        }
    }
}
