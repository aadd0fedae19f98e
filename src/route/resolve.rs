//! Inbound request resolution.
//!
//! Decision order, first match wins:
//!
//! 1. alias index (live exact -> serve, live other casing -> redirect,
//!    expired -> redirect)
//! 2. fallback identifier route -> serve by id
//! 3. not found

use serde::Serialize;

use super::{RequestOrigin, RequestTarget, ResolveError, RoutePolicy};
use crate::alias::AliasIndex;

/// What to do with an incoming request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// Request path is a live alias in canonical casing.
    ServeDirect { document_id: String, key: String },

    /// Request path differs in casing from a live alias, or is expired.
    RedirectToCanonical {
        /// Absolute URL, query string of the request carried through
        location: String,
    },

    /// No alias matched; the fallback route named the document.
    ServeById { document_id: String },

    NotFound,
}

impl ResolutionOutcome {
    /// Document to serve, if any.
    pub fn document_id(&self) -> Option<&str> {
        match self {
            Self::ServeDirect { document_id, .. } | Self::ServeById { document_id } => {
                Some(document_id)
            }
            Self::RedirectToCanonical { .. } | Self::NotFound => None,
        }
    }
}

/// Resolves request paths against one index snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    index: &'a AliasIndex,
    policy: &'a RoutePolicy,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a AliasIndex, policy: &'a RoutePolicy) -> Self {
        Self { index, policy }
    }

    /// Resolve `request` (origin-form or absolute-form).
    ///
    /// `origin` is only needed to build redirect targets; a malformed origin
    /// is reported only when a redirect has to be built.
    pub fn resolve(&self, request: &str, origin: &str) -> Result<ResolutionOutcome, ResolveError> {
        let target = RequestTarget::parse(request);

        if let Some(entry) = self.index.lookup(target.path()) {
            let exact = target.path().strip_prefix('/') == Some(entry.canonical_path.as_str());
            if !entry.is_expired && exact {
                return Ok(ResolutionOutcome::ServeDirect {
                    document_id: entry.document_id.clone(),
                    key: entry.key.clone(),
                });
            }

            let origin = RequestOrigin::parse(origin)?;
            return Ok(ResolutionOutcome::RedirectToCanonical {
                location: origin.join(&entry.canonical_path, target.query()),
            });
        }

        if let Some(document_id) = self.policy.fallback().match_path(target.raw_path()) {
            return Ok(ResolutionOutcome::ServeById { document_id });
        }

        Ok(ResolutionOutcome::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alias::Document;
    use crate::route::UrlGenerator;

    const ORIGIN: &str = "http://localhost";

    fn fixture() -> Vec<Document> {
        vec![
            Document::new("non_matching_id_1").with_alias("Product/Foo/Bär2/", "foo_bar"),
            Document::new("test_id")
                .with_alias("Product/Foo/Bär/", "foo_bar")
                .with_alias("Product/Foö/Büg/", "foo_bug")
                .with_alias("Product/Baz/", "baz")
                .with_alias("Product/Baz/baz/", "baz_baz")
                .with_alias("Product/Büz/bäß/", "buz_bas")
                .with_expired("Product/Old-Baz/", "baz"),
            Document::new("non_matching_id_2"),
        ]
    }

    fn resolve(request: &str) -> ResolutionOutcome {
        let docs = fixture();
        let index = AliasIndex::build(&docs).unwrap();
        let policy = RoutePolicy::default();
        Resolver::new(&index, &policy).resolve(request, ORIGIN).unwrap()
    }

    fn redirect(location: &str) -> ResolutionOutcome {
        ResolutionOutcome::RedirectToCanonical {
            location: location.to_string(),
        }
    }

    #[test]
    fn test_serve_direct() {
        assert_eq!(
            resolve("/Product/Foo/Bär/"),
            ResolutionOutcome::ServeDirect {
                document_id: "test_id".to_string(),
                key: "foo_bar".to_string(),
            }
        );
        assert_eq!(
            resolve("/Product/Foö/Büg/"),
            ResolutionOutcome::ServeDirect {
                document_id: "test_id".to_string(),
                key: "foo_bug".to_string(),
            }
        );
    }

    #[test]
    fn test_serve_direct_percent_encoded() {
        assert_eq!(
            resolve("/Product/Fo%C3%B6/B%C3%BCg/"),
            ResolutionOutcome::ServeDirect {
                document_id: "test_id".to_string(),
                key: "foo_bug".to_string(),
            }
        );
    }

    #[test]
    fn test_redirect_case_mismatch() {
        assert_eq!(
            resolve("http://localhost/Product/baz/"),
            redirect("http://localhost/Product/Baz/")
        );
        assert_eq!(
            resolve("/Product/BÜz/bÄß/"),
            redirect("http://localhost/Product/Büz/bäß/")
        );
    }

    #[test]
    fn test_redirect_keeps_query() {
        assert_eq!(
            resolve("/product/baz/?page=2&sort=asc"),
            redirect("http://localhost/Product/Baz/?page=2&sort=asc")
        );
    }

    #[test]
    fn test_redirect_expired() {
        assert_eq!(
            resolve("/Product/Old-Baz/"),
            redirect("http://localhost/Product/Baz/")
        );
        assert_eq!(
            resolve("/PRODUCT/old-baz/?x=1"),
            redirect("http://localhost/Product/Baz/?x=1")
        );
    }

    #[test]
    fn test_serve_by_id() {
        assert_eq!(
            resolve("http://localhost/test/non_matching_id_2/"),
            ResolutionOutcome::ServeById {
                document_id: "non_matching_id_2".to_string(),
            }
        );
    }

    #[test]
    fn test_not_found() {
        assert_eq!(resolve("/Product/Unknown/"), ResolutionOutcome::NotFound);
        assert_eq!(resolve("/test/a/b/"), ResolutionOutcome::NotFound);
        assert_eq!(resolve("/"), ResolutionOutcome::NotFound);
    }

    #[test]
    fn test_alias_checked_before_fallback() {
        let docs = vec![Document::new("a").with_alias("test/b/", "main")];
        let index = AliasIndex::build(&docs).unwrap();
        let policy = RoutePolicy::default();

        let outcome = Resolver::new(&index, &policy)
            .resolve("/test/b/", ORIGIN)
            .unwrap();
        assert_eq!(outcome.document_id(), Some("a"));
        assert!(matches!(outcome, ResolutionOutcome::ServeDirect { .. }));
    }

    #[test]
    fn test_malformed_origin_only_for_redirects() {
        let docs = fixture();
        let index = AliasIndex::build(&docs).unwrap();
        let policy = RoutePolicy::default();
        let resolver = Resolver::new(&index, &policy);

        assert!(matches!(
            resolver.resolve("/Product/Foo/Bär/", "localhost"),
            Ok(ResolutionOutcome::ServeDirect { .. })
        ));
        assert_eq!(
            resolver.resolve("/product/baz/", "localhost"),
            Err(ResolveError::MalformedOrigin("localhost".to_string()))
        );
    }

    #[test]
    fn test_round_trip_every_alias() {
        let docs = fixture();
        let index = AliasIndex::build(&docs).unwrap();
        let policy = RoutePolicy::default();
        let generator = UrlGenerator::new(&policy);
        let resolver = Resolver::new(&index, &policy);

        for doc in &docs {
            for alias in &doc.aliases {
                let path = generator.generate(doc, Some(&alias.key), &[]);
                assert_eq!(
                    resolver.resolve(&path, ORIGIN).unwrap(),
                    ResolutionOutcome::ServeDirect {
                        document_id: doc.id.clone(),
                        key: alias.key.clone(),
                    },
                    "path: {path}"
                );
            }
        }
    }

    #[test]
    fn test_round_trip_reserved_characters() {
        let docs = vec![
            Document::new("faq").with_alias("FAQ/Why?/", "main"),
            Document::new("sale").with_alias("Sale/50%41/", "main"),
            Document::new("csharp").with_alias("C#/Intro/", "main"),
            Document::new("cafe").with_alias("Café/Menü/", "main"),
        ];
        let index = AliasIndex::build(&docs).unwrap();
        let policy = RoutePolicy::default();
        let generator = UrlGenerator::new(&policy);
        let resolver = Resolver::new(&index, &policy);

        for doc in &docs {
            let path = generator.generate(doc, Some("main"), &[("page", "2")]);
            assert_eq!(
                resolver.resolve(&path, ORIGIN).unwrap(),
                ResolutionOutcome::ServeDirect {
                    document_id: doc.id.clone(),
                    key: "main".to_string(),
                },
                "path: {path}"
            );
        }
        assert_eq!(generator.generate(&docs[3], Some("main"), &[]), "/Café/Menü/");

        assert_eq!(
            resolver.resolve("/faq/why%3f/?page=2", ORIGIN).unwrap(),
            redirect("http://localhost/FAQ/Why%3F/?page=2")
        );
        assert_eq!(
            resolver.resolve("/c%23/intro/", ORIGIN).unwrap(),
            redirect("http://localhost/C%23/Intro/")
        );
    }

    #[test]
    fn test_absolute_form_query_and_dot_segments() {
        assert_eq!(
            resolve("http://localhost/product/baz/?q=ä b&x=\"1\""),
            redirect("http://localhost/Product/Baz/?q=ä b&x=\"1\"")
        );
        assert_eq!(
            resolve("http://localhost/product/baz/?q=ä b&x=\"1\""),
            resolve("/product/baz/?q=ä b&x=\"1\"")
        );
        assert!(!matches!(
            resolve("http://localhost/Product/x/../Baz/"),
            ResolutionOutcome::ServeDirect { .. }
        ));
    }

    #[test]
    fn test_round_trip_fallback() {
        let docs = fixture();
        let index = AliasIndex::build(&docs).unwrap();
        let policy = RoutePolicy::default();
        let generator = UrlGenerator::new(&policy);
        let resolver = Resolver::new(&index, &policy);

        let path = generator.generate(&docs[2], None, &[("test", "test")]);
        assert_eq!(
            resolver.resolve(&path, ORIGIN).unwrap(),
            ResolutionOutcome::ServeById {
                document_id: "non_matching_id_2".to_string(),
            }
        );
    }

    #[test]
    fn test_case_variants_never_not_found() {
        let docs = fixture();
        let index = AliasIndex::build(&docs).unwrap();
        let policy = RoutePolicy::default();
        let resolver = Resolver::new(&index, &policy);

        for alias in &docs[1].aliases {
            for variant in [alias.path.to_uppercase(), alias.path.to_lowercase()] {
                let outcome = resolver.resolve(&format!("/{variant}"), ORIGIN).unwrap();
                if variant == alias.path {
                    assert!(matches!(outcome, ResolutionOutcome::ServeDirect { .. }));
                } else {
                    assert_eq!(outcome, redirect(&format!("{ORIGIN}/{}", alias.path)));
                }
            }
        }
    }

    #[test]
    fn test_outcome_json() {
        let json = serde_json::to_string(&resolve("/Product/Baz/")).unwrap();
        assert_eq!(
            json,
            r#"{"outcome":"serve_direct","document_id":"test_id","key":"baz"}"#
        );
        let json = serde_json::to_string(&ResolutionOutcome::NotFound).unwrap();
        assert_eq!(json, r#"{"outcome":"not_found"}"#);
    }
}
