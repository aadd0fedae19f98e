//! seoroute - SEO alias router.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use seoroute::cli::{self, Cli, Commands};
use seoroute::config::RouterConfig;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    seoroute::core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    // stdout carries the result of these commands
    if matches!(cli.command, Commands::Resolve { .. } | Commands::Generate { .. }) {
        seoroute::logger::set_stderr(true);
    }

    let config = RouterConfig::load(&cli)?;

    match &cli.command {
        Commands::Serve { .. } => cli::serve::serve(&config),
        Commands::Resolve { request, origin } => cli::query::run_resolve(&config, request, origin),
        Commands::Generate { id, key, query } => {
            cli::query::run_generate(&config, id, key.as_deref(), query)
        }
        Commands::Check => cli::check::check_documents(&config),
    }
}
