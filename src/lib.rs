//! shelfmark - Flat-file catalog of library titles
//!
//! Keeps books and periodicals in a small in-memory catalog backed by a
//! pipe-delimited text file, with exact-match lookups, a stable sort by
//! publication year, and a restoration workflow for titles at least
//! fifty years old.
//!
//! # Modules
//!
//! - `catalog`: Title records, call number checks, storage and persistence
//! - `config`: Catalog file location and collection sizes
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Show the catalog
//! shelfmark --file titles.txt list
//!
//! # Look up a title
//! shelfmark find call-number B-111-111-111
//!
//! # Archive everything due for restoration
//! shelfmark restore
//! ```

pub mod catalog;
pub mod cli;
pub mod config;

// Re-export main types at crate root for convenience
pub use catalog::{Capacity, Catalog, CatalogError, RestoredTitle, Title, TitleKind};
