//! Command-line interface module.

mod args;
pub mod check;
pub mod query;
pub mod serve;

pub use args::{Cli, Commands};

use anyhow::{Context, Result};

use crate::{
    alias::conflict::print_conflicts,
    config::RouterConfig,
    debug,
    router::Router,
    store::DocumentSource,
};

/// Build a router from `store`, printing conflicts in full on failure.
pub fn load_router(config: &RouterConfig, store: &dyn DocumentSource) -> Result<Router> {
    let policy = config.policy()?;
    let documents = store.load()?;

    match Router::with_documents(policy, documents) {
        Ok(router) => {
            let catalog = router.snapshot();
            let stats = catalog.index().stats();
            debug!("store"; "{} documents, {} live aliases, {} expired from {}",
                catalog.len(), stats.live, stats.expired, store.describe());
            Ok(router)
        }
        Err(err) => {
            print_conflicts(err.conflicts());
            Err(err).with_context(|| format!("Failed to index {}", store.describe()))
        }
    }
}
