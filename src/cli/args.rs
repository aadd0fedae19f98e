//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// SEO alias router CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: seoroute.toml)
    #[arg(short = 'C', long, global = true, default_value = "seoroute.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Document file path, overrides `store.documents`
    #[arg(short, long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub documents: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Serve alias resolution over HTTP
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// Rebuild the index when the document file changes
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        watch: Option<bool>,
    },

    /// Resolve a request path and print the outcome as JSON
    #[command(visible_alias = "r")]
    Resolve {
        /// Request path or absolute URL (e.g. /Product/baz/)
        request: String,

        /// Origin used for redirect targets
        #[arg(short, long, default_value = "http://localhost", value_hint = clap::ValueHint::Url)]
        origin: String,
    },

    /// Generate the path for a document
    #[command(visible_alias = "g")]
    Generate {
        /// Document id
        id: String,

        /// Alias key to generate for
        #[arg(short, long)]
        key: Option<String>,

        /// Extra query parameter, repeatable (`-q page=2`)
        #[arg(short, long = "query", value_name = "KEY=VALUE", value_parser = parse_param)]
        query: Vec<(String, String)>,
    },

    /// Build the alias index and report conflicts
    #[command(visible_alias = "c")]
    Check,
}

/// Parse `key=value`. A missing `=` yields an empty value.
fn parse_param(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw.split_once('=').unwrap_or((raw, ""));
    if key.is_empty() {
        return Err(format!("empty parameter name in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(parse_param("a=1"), Ok(("a".into(), "1".into())));
        assert_eq!(parse_param("a=b=c"), Ok(("a".into(), "b=c".into())));
        assert_eq!(parse_param("flag"), Ok(("flag".into(), String::new())));
        assert!(parse_param("=x").is_err());
    }

    #[test]
    fn test_generate_args() {
        let cli = Cli::try_parse_from([
            "seoroute", "generate", "test_id", "-k", "baz", "-q", "test=test", "-q", "page=2",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate { id, key, query } => {
                assert_eq!(id, "test_id");
                assert_eq!(key.as_deref(), Some("baz"));
                assert_eq!(
                    query,
                    vec![("test".into(), "test".into()), ("page".into(), "2".into())]
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_serve_args() {
        let cli = Cli::try_parse_from(["seoroute", "-v", "serve", "-p", "8080", "-w", "false"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Serve { port, watch, interface } => {
                assert_eq!(port, Some(8080));
                assert_eq!(watch, Some(false));
                assert!(interface.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_resolve_default_origin() {
        let cli = Cli::try_parse_from(["seoroute", "resolve", "/Product/baz/"]).unwrap();
        match cli.command {
            Commands::Resolve { request, origin } => {
                assert_eq!(request, "/Product/baz/");
                assert_eq!(origin, "http://localhost");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
