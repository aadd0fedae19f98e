//! seoroute - SEO alias routing for document catalogs.
//!
//! Maps documents to human-readable alias paths and back:
//!
//! - [`alias`]: documents, case folding, the alias index
//! - [`route`]: fallback route, request parsing, resolver, generator
//! - [`router`]: catalog snapshots behind an atomic pointer
//! - [`store`]: document sources
//! - [`watch`]: file watcher that refreshes the router

pub mod alias;
pub mod cli;
pub mod config;
pub mod core;
pub mod logger;
pub mod route;
pub mod router;
pub mod store;
pub mod utils;
pub mod watch;
