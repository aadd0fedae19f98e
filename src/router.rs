//! Shared router with atomic snapshot replacement.
//!
//! Uses `arc-swap` for lock-free reads: every request loads the current
//! [`Catalog`] once and works on it until done, while a refresh builds a
//! new catalog off to the side and swaps it in. A failed build leaves the
//! current catalog in service.

use std::sync::Arc;

use arc_swap::ArcSwap;
use rustc_hash::FxHashMap;

use crate::alias::{AliasIndex, BuildStats, Document, IndexError};
use crate::log;
use crate::route::{ResolutionOutcome, ResolveError, Resolver, RoutePolicy, UrlGenerator};

/// One immutable snapshot: documents by id plus their alias index.
#[derive(Debug, Default)]
pub struct Catalog {
    documents: Vec<Document>,
    by_id: FxHashMap<String, usize>,
    index: AliasIndex,
}

impl Catalog {
    /// Build a catalog, keeping input order.
    ///
    /// A repeated id replaces the earlier document in place.
    pub fn build(documents: Vec<Document>) -> Result<Self, IndexError> {
        let mut by_id = FxHashMap::default();
        let mut unique: Vec<Document> = Vec::with_capacity(documents.len());

        for doc in documents {
            match by_id.get(&doc.id) {
                Some(&slot) => {
                    log!("warning"; "duplicate document id `{}`, keeping the last one", doc.id);
                    unique[slot] = doc;
                }
                None => {
                    by_id.insert(doc.id.clone(), unique.len());
                    unique.push(doc);
                }
            }
        }

        let index = AliasIndex::build(&unique)?;
        Ok(Self {
            documents: unique,
            by_id,
            index,
        })
    }

    pub fn document(&self, id: &str) -> Option<&Document> {
        self.by_id.get(id).map(|&slot| &self.documents[slot])
    }

    /// Documents in input order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn index(&self) -> &AliasIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Counters reported after a successful refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshStats {
    pub documents: usize,
    pub index: BuildStats,
}

/// Catalog pointer plus the routing policy.
#[derive(Debug)]
pub struct Router {
    catalog: ArcSwap<Catalog>,
    policy: RoutePolicy,
}

impl Router {
    /// Router with an empty catalog.
    pub fn new(policy: RoutePolicy) -> Self {
        Self {
            catalog: ArcSwap::from_pointee(Catalog::default()),
            policy,
        }
    }

    /// Router with an initial catalog built from `documents`.
    pub fn with_documents(policy: RoutePolicy, documents: Vec<Document>) -> Result<Self, IndexError> {
        let router = Self::new(policy);
        router.refresh(documents)?;
        Ok(router)
    }

    /// Current snapshot. Holders keep it alive across later refreshes.
    #[inline]
    pub fn snapshot(&self) -> Arc<Catalog> {
        self.catalog.load_full()
    }

    /// Rebuild from the full document set and swap the new catalog in.
    pub fn refresh(&self, documents: Vec<Document>) -> Result<RefreshStats, IndexError> {
        let catalog = Catalog::build(documents)?;
        let stats = RefreshStats {
            documents: catalog.len(),
            index: catalog.index().stats(),
        };
        self.catalog.store(Arc::new(catalog));
        Ok(stats)
    }

    pub fn policy(&self) -> &RoutePolicy {
        &self.policy
    }

    /// Resolve a request against the current snapshot.
    pub fn resolve(&self, request: &str, origin: &str) -> Result<ResolutionOutcome, ResolveError> {
        let catalog = self.catalog.load();
        Resolver::new(catalog.index(), &self.policy).resolve(request, origin)
    }

    /// Generate a path for a document known to the current snapshot.
    ///
    /// Returns `None` only when the id is unknown.
    pub fn generate(&self, document_id: &str, key: Option<&str>, params: &[(&str, &str)]) -> Option<String> {
        let catalog = self.catalog.load();
        let document = catalog.document(document_id)?;
        Some(UrlGenerator::new(&self.policy).generate(document, key, params))
    }

    /// Like [`generate`](Self::generate), taking the key from the key
    /// parameter inside `params`.
    pub fn generate_from_params(&self, document_id: &str, params: &[(&str, &str)]) -> Option<String> {
        let catalog = self.catalog.load();
        let document = catalog.document(document_id)?;
        Some(UrlGenerator::new(&self.policy).generate_from_params(document, params))
    }
}
