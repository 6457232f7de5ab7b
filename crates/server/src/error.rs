//! Errors returned by the recommendation service.

use catalog::{StoreError, TourId};
use sources::SourceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommendationError {
    /// The reference tour of a similar-tours request does not exist
    #[error("Tour not found: {tour_id}")]
    NotFound { tour_id: TourId },

    /// A store read failed; never retried here
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The blocking scoring task panicked or was cancelled
    #[error("Scoring task failed: {0}")]
    Scoring(#[from] tokio::task::JoinError),
}

impl From<SourceError> for RecommendationError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::TourNotFound { tour_id } => RecommendationError::NotFound { tour_id },
            SourceError::Store(err) => RecommendationError::Store(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, RecommendationError>;
