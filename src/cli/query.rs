//! `resolve` and `generate` commands.
//!
//! Both print a single result to stdout so they can be piped; diagnostics
//! go through the logger, which `main` points at stderr for these commands.

use std::io::{self, Write};

use anyhow::{Context, Result, bail};

use super::load_router;
use crate::config::RouterConfig;
use crate::debug;
use crate::router::Router;
use crate::store::JsonFileStore;

/// Resolve `request` and print the outcome as JSON.
pub fn run_resolve(config: &RouterConfig, request: &str, origin: &str) -> Result<()> {
    let router = load_router(config, &JsonFileStore::new(&config.store.documents))?;
    write_resolve(&router, request, origin, &mut io::stdout().lock())
}

/// Generate the path for `id` and print it.
pub fn run_generate(
    config: &RouterConfig,
    id: &str,
    key: Option<&str>,
    query: &[(String, String)],
) -> Result<()> {
    let router = load_router(config, &JsonFileStore::new(&config.store.documents))?;
    write_generate(&router, id, key, query, &mut io::stdout().lock())
}

fn write_resolve(router: &Router, request: &str, origin: &str, out: &mut impl Write) -> Result<()> {
    let outcome = router
        .resolve(request, origin)
        .with_context(|| format!("Failed to resolve `{request}`"))?;
    debug!("resolve"; "{} -> {:?}", request, outcome);

    serde_json::to_writer_pretty(&mut *out, &outcome)?;
    writeln!(out)?;
    Ok(())
}

fn write_generate(
    router: &Router,
    id: &str,
    key: Option<&str>,
    query: &[(String, String)],
    out: &mut impl Write,
) -> Result<()> {
    let params: Vec<(&str, &str)> = query
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    // without `-k`, `-q _seo_key=baz` names the key
    let path = match key {
        Some(key) => router.generate(id, Some(key), &params),
        None => router.generate_from_params(id, &params),
    };
    let Some(path) = path else {
        bail!("unknown document id `{id}`");
    };
    writeln!(out, "{path}")?;
    Ok(())
}
