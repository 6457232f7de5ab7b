//! Final ordering of scored recommendations.

use crate::types::TourRecommendation;
use std::cmp::Ordering;

/// Sort by relevance score descending and keep the first `limit`.
///
/// The sort is stable: equal scores keep their incoming order. Unscored
/// entries sort as zero.
pub fn rank_and_select(
    mut scored: Vec<TourRecommendation>,
    limit: usize,
) -> Vec<TourRecommendation> {
    scored.sort_by(|a, b| {
        let a = a.relevance_score.unwrap_or(0.0);
        let b = b.relevance_score.unwrap_or(0.0);
        b.partial_cmp(&a).unwrap_or(Ordering::Equal)
    });
    scored.truncate(limit);
    scored
}
