//! Error types for the catalog crate.
//!
//! Two families live here:
//! - `CatalogError` covers loading and validating catalog files
//! - `StoreError` covers failures of the read interfaces the engine consumes

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading and validating a catalog directory
#[derive(Error, Debug)]
pub enum CatalogError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: PathBuf },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A JSON document could not be decoded
    ///
    /// Carries the file name so the caller knows which collection is broken
    #[error("Parse error in {file}: {source}")]
    ParseError {
        file: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record field had an invalid value
    #[error("Invalid value for {field} on {entity} {id}: {value}")]
    InvalidValue {
        entity: String,
        id: String,
        field: String,
        value: String,
    },

    /// Two records of the same collection share an id
    #[error("Duplicate {entity} id: {id}")]
    DuplicateId { entity: String, id: String },
}

/// Errors surfaced by the store read interfaces.
///
/// The recommendation engine never retries or swallows these; they travel
/// up to the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// The backing store could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store was reachable but the query failed
    #[error("Query failed on {collection}: {reason}")]
    Query { collection: String, reason: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
