//! Alias model and index - the case-insensitive path space of all documents.
//!
//! # Architecture
//!
//! ```text
//! Documents                              Alias Index
//! =========                              ===========
//! test_id  aliases  Product/Baz/   ->    product/baz/    live
//!          expired  Product/Old/   ->    product/old/    expired -> Product/Baz/
//! ```
//!
//! # Module Structure
//!
//! - [`conflict`]: live alias collision detection and reporting
//! - `document`: [`Document`] and [`AliasEntry`] records
//! - `fold`: Unicode case folding used for matching
//! - `index`: [`AliasIndex`] build and lookup

pub mod conflict;
mod document;
mod error;
mod fold;
mod index;

pub use conflict::{AliasClaim, AliasConflict};
pub use document::{AliasEntry, Document};
pub use error::IndexError;
pub use fold::fold_path;
pub use index::{AliasIndex, AliasIndexEntry, BuildStats};
