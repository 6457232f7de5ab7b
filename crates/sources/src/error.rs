//! Error types for candidate sources.

use catalog::{StoreError, TourId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    /// The reference tour of a similarity lookup does not exist
    #[error("Tour not found: {tour_id}")]
    TourNotFound { tour_id: TourId },

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T> = std::result::Result<T, SourceError>;
