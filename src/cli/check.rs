//! `check` command: build the alias index once and report.

use std::io::{self, Write};

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};

use crate::alias::{AliasIndex, BuildStats, IndexError, conflict::print_conflicts};
use crate::config::RouterConfig;
use crate::log;
use crate::router::Catalog;
use crate::store::{DocumentSource, JsonFileStore};
use crate::utils::plural_s;

/// Index the configured document file; fails on any conflict.
pub fn check_documents(config: &RouterConfig) -> Result<()> {
    let store = JsonFileStore::new(&config.store.documents);
    config.policy()?;

    let documents = store.load()?;
    let catalog = match Catalog::build(documents) {
        Ok(catalog) => catalog,
        Err(err) => {
            if let IndexError::Conflicts(conflicts) = &err {
                print_conflicts(conflicts);
            }
            return Err(err).with_context(|| format!("{} failed the check", store.describe()));
        }
    };

    let mut stdout = io::stdout().lock();
    write_report(&mut stdout, catalog.len(), catalog.index())?;
    log!("check"; "{} ok", store.describe());
    Ok(())
}

fn write_report(out: &mut impl Write, documents: usize, index: &AliasIndex) -> io::Result<()> {
    let BuildStats {
        live,
        expired,
        shadowed,
        dropped,
    } = index.stats();

    writeln!(out, "{:>8} document{}", documents, plural_s(documents))?;
    writeln!(out, "{:>8} live", live)?;
    writeln!(out, "{:>8} expired", expired)?;
    if shadowed > 0 {
        let note = "(hidden by another alias)";
        writeln!(out, "{:>8} shadowed {}", shadowed, note.if_supports_color(Stream::Stdout, |t| t.dimmed()))?;
    }
    if dropped > 0 {
        let note = "(key has no live alias)";
        writeln!(out, "{:>8} dropped {}", dropped, note.if_supports_color(Stream::Stdout, |t| t.dimmed()))?;
    }
    Ok(())
}
