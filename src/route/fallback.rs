//! Identifier-based fallback route.
//!
//! Every document is addressable through this route even without aliases.
//! `format` and `match_path` are exact inverses: whatever one produces the
//! other recognizes.

use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode};
use regex::Regex;

use super::{RouteError, SEGMENT};

/// Placeholder replaced by the document id.
pub const ID_PLACEHOLDER: &str = "{id}";

/// Default template, `/test/{id}/`.
pub const DEFAULT_TEMPLATE: &str = "/test/{id}/";

/// A path template with exactly one `{id}` placeholder.
#[derive(Debug, Clone)]
pub struct FallbackRoute {
    template: String,
    prefix: String,
    suffix: String,
    pattern: Regex,
}

impl FallbackRoute {
    /// Parse a template such as `/test/{id}/`.
    pub fn parse(template: &str) -> Result<Self, RouteError> {
        let template = template.trim();
        if !template.starts_with('/') {
            return Err(RouteError::NotAbsolute(template.to_string()));
        }

        let (prefix, suffix) = match template.matches(ID_PLACEHOLDER).count() {
            0 => return Err(RouteError::MissingPlaceholder(template.to_string())),
            1 => template
                .split_once(ID_PLACEHOLDER)
                .ok_or_else(|| RouteError::MissingPlaceholder(template.to_string()))?,
            _ => return Err(RouteError::MultiplePlaceholders(template.to_string())),
        };

        if prefix.contains(['?', '#']) || suffix.contains(['?', '#']) {
            return Err(RouteError::QueryInTemplate(template.to_string()));
        }

        let pattern = Regex::new(&format!(
            "^{}(?P<id>[^/?#]+){}$",
            regex::escape(prefix),
            regex::escape(suffix)
        ))?;

        Ok(Self {
            template: template.to_string(),
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            pattern,
        })
    }

    /// Path for a document id. The id is encoded as a single path segment.
    pub fn format(&self, id: &str) -> String {
        format!(
            "{}{}{}",
            self.prefix,
            utf8_percent_encode(id, SEGMENT),
            self.suffix
        )
    }

    /// Extract the document id from a raw (still percent-encoded) path.
    pub fn match_path(&self, raw_path: &str) -> Option<String> {
        let captures = self.pattern.captures(raw_path)?;
        let id = captures.name("id")?.as_str();
        percent_decode_str(id)
            .decode_utf8()
            .ok()
            .map(|id| id.into_owned())
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl Default for FallbackRoute {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            prefix: "/test/".to_string(),
            suffix: "/".to_string(),
            pattern: Regex::new("^/test/(?P<id>[^/?#]+)/$").expect("default fallback pattern"),
        }
    }
}

impl fmt::Display for FallbackRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}
