//! Catalog error types.

use std::path::PathBuf;

use thiserror::Error;

/// Which collection of the catalog an operation touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Titles,
    Restored,
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Collection::Titles => write!(f, "titles"),
            Collection::Restored => write!(f, "restored titles"),
        }
    }
}

/// Failures of catalog storage and persistence
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write to the {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Capacity exceeded for {collection}: limit is {capacity}")]
    CapacityExceeded {
        collection: Collection,
        capacity: usize,
    },
}

/// Reasons a file record could not be turned into a title
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("expected at least 7 fields, found {found}")]
    MissingFields { found: usize },

    #[error("invalid {field} '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("invalid restoration date '{value}'")]
    InvalidDate { value: String },

    #[error("line is not valid UTF-8")]
    InvalidEncoding,
}
