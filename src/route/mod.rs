//! Route generation and resolution on top of the alias index.
//!
//! | Direction  | Input                          | Output                  |
//! |------------|--------------------------------|-------------------------|
//! | generate   | document + key + params        | `/Product/Baz/?test=1`  |
//! | resolve    | request path + origin          | [`ResolutionOutcome`]   |
//!
//! Both directions share one [`RoutePolicy`], so the fallback route they
//! produce and recognize is always the same.

mod fallback;
mod generate;
mod query;
mod request;
mod resolve;

use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;

pub use fallback::{DEFAULT_TEMPLATE, FallbackRoute, ID_PLACEHOLDER};
pub use generate::UrlGenerator;
pub use query::encode_query;
pub use request::{RequestOrigin, RequestTarget};
pub use resolve::{ResolutionOutcome, Resolver};

/// Everything outside RFC 3986 unreserved characters is encoded.
pub(crate) const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Encoding for a single path segment (ids in fallback paths).
pub(crate) const SEGMENT: &AsciiSet = COMPONENT;

/// Escape `%`, `?` and `#` in an alias path.
///
/// Those three would be read back as an escape, a query or a fragment.
/// Everything else, non-ASCII included, is written as recorded, so a
/// generated path decodes to the alias it came from.
pub(crate) fn escape_path(path: &str) -> Cow<'_, str> {
    if !path.contains(['%', '?', '#']) {
        return Cow::Borrowed(path);
    }

    let mut escaped = String::with_capacity(path.len() + 8);
    for ch in path.chars() {
        match ch {
            '%' => escaped.push_str("%25"),
            '?' => escaped.push_str("%3F"),
            '#' => escaped.push_str("%23"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

/// Default parameter naming the alias key when generating from params.
pub const DEFAULT_KEY_PARAM: &str = "_seo_key";

/// Invalid fallback route template.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("fallback template `{0}` must start with `/`")]
    NotAbsolute(String),

    #[error("fallback template `{0}` has no `{{id}}` placeholder")]
    MissingPlaceholder(String),

    #[error("fallback template `{0}` has more than one `{{id}}` placeholder")]
    MultiplePlaceholders(String),

    #[error("fallback template `{0}` must not contain a query or fragment")]
    QueryInTemplate(String),

    #[error("fallback template pattern")]
    Pattern(#[from] regex::Error),
}

/// Precondition failures of [`Resolver::resolve`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("malformed request origin `{0}`: scheme and host are required")]
    MalformedOrigin(String),
}

/// Shared, read-only routing configuration.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    fallback: FallbackRoute,
    key_param: String,
    /// Parameters never written to generated query strings.
    /// Always contains `key_param`.
    reserved: Vec<String>,
}

impl RoutePolicy {
    pub fn new(
        fallback: FallbackRoute,
        key_param: impl Into<String>,
        reserved: impl IntoIterator<Item = String>,
    ) -> Self {
        let key_param = key_param.into();
        let mut all: Vec<String> = reserved.into_iter().collect();
        if !all.contains(&key_param) {
            all.push(key_param.clone());
        }

        Self {
            fallback,
            key_param,
            reserved: all,
        }
    }

    pub fn fallback(&self) -> &FallbackRoute {
        &self.fallback
    }

    pub fn key_param(&self) -> &str {
        &self.key_param
    }

    pub fn reserved(&self) -> &[String] {
        &self.reserved
    }
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self::new(
            FallbackRoute::default(),
            DEFAULT_KEY_PARAM,
            ["document".to_string()],
        )
    }
}
