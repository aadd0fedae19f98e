//! Outbound path generation.

use super::{RoutePolicy, encode_query, escape_path};
use crate::alias::Document;

/// Generates canonical paths for documents.
#[derive(Debug, Clone, Copy)]
pub struct UrlGenerator<'a> {
    policy: &'a RoutePolicy,
}

impl<'a> UrlGenerator<'a> {
    pub fn new(policy: &'a RoutePolicy) -> Self {
        Self { policy }
    }

    /// Path for `document` in the slot `key`, with `params` as query string.
    ///
    /// Falls back to the identifier route when `key` is absent or the
    /// document has no alias for it. Never fails.
    pub fn generate(&self, document: &Document, key: Option<&str>, params: &[(&str, &str)]) -> String {
        let path = match key.and_then(|key| document.alias_for_key(key)) {
            Some(alias) => format!("/{}", escape_path(alias.trimmed_path())),
            None => self.policy.fallback().format(&document.id),
        };

        format!("{path}{}", encode_query(params, self.policy.reserved()))
    }

    /// Like [`generate`](Self::generate), reading the key from the key
    /// parameter (`_seo_key` by default) inside `params`.
    pub fn generate_from_params(&self, document: &Document, params: &[(&str, &str)]) -> String {
        let key = params
            .iter()
            .find(|(name, _)| *name == self.policy.key_param())
            .map(|(_, value)| *value);
        self.generate(document, key, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::FallbackRoute;

    fn test_doc() -> Document {
        Document::new("test_id")
            .with_alias("Product/Foo/Bär/", "foo_bar")
            .with_alias("Product/Baz/", "baz")
    }

    #[test]
    fn test_generate_by_key() {
        let policy = RoutePolicy::default();
        let generator = UrlGenerator::new(&policy);

        let url = generator.generate(&test_doc(), Some("baz"), &[("test", "test")]);
        assert_eq!(url, "/Product/Baz/?test=test");
    }

    #[test]
    fn test_generate_without_aliases() {
        let policy = RoutePolicy::default();
        let generator = UrlGenerator::new(&policy);

        let doc = Document::new("non_matching_id_2");
        let url = generator.generate(&doc, None, &[("test", "test")]);
        assert_eq!(url, "/test/non_matching_id_2/?test=test");
    }

    #[test]
    fn test_generate_unknown_key_falls_back() {
        let policy = RoutePolicy::default();
        let generator = UrlGenerator::new(&policy);

        assert_eq!(generator.generate(&test_doc(), Some("nope"), &[]), "/test/test_id/");
        assert_eq!(generator.generate(&test_doc(), None, &[]), "/test/test_id/");
    }

    #[test]
    fn test_generate_keeps_canonical_casing() {
        let policy = RoutePolicy::default();
        let generator = UrlGenerator::new(&policy);

        assert_eq!(
            generator.generate(&test_doc(), Some("foo_bar"), &[]),
            "/Product/Foo/Bär/"
        );
    }

    #[test]
    fn test_generate_leading_slash_alias() {
        let policy = RoutePolicy::default();
        let generator = UrlGenerator::new(&policy);

        let doc = Document::new("a").with_alias("/About/", "main");
        assert_eq!(generator.generate(&doc, Some("main"), &[]), "/About/");
    }

    #[test]
    fn test_generate_from_params() {
        let policy = RoutePolicy::default();
        let generator = UrlGenerator::new(&policy);

        let url = generator.generate_from_params(
            &test_doc(),
            &[("_seo_key", "baz"), ("document", "test_id"), ("test", "test")],
        );
        assert_eq!(url, "/Product/Baz/?test=test");

        let url = generator.generate_from_params(&Document::new("bare"), &[("test", "test")]);
        assert_eq!(url, "/test/bare/?test=test");
    }

    #[test]
    fn test_generate_custom_fallback() {
        let policy = RoutePolicy::new(
            FallbackRoute::parse("/doc/{id}").unwrap(),
            "_seo_key",
            Vec::new(),
        );
        let generator = UrlGenerator::new(&policy);

        let doc = Document::new("id with space");
        assert_eq!(generator.generate(&doc, None, &[]), "/doc/id%20with%20space");
    }

    #[test]
    fn test_fallback_always_contains_id() {
        let policy = RoutePolicy::default();
        let generator = UrlGenerator::new(&policy);

        for id in ["a", "non_matching_id_2", "X-1"] {
            let url = generator.generate(&Document::new(id), None, &[]);
            assert!(!url.is_empty());
            assert!(url.contains(id));
        }
    }
}
