//! Output types of the scoring stage.

use catalog::Tour;
use serde::Serialize;
use std::fmt;

/// Which path produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationSource {
    /// Matched against the user's preference profile and scored
    Personalized,
    /// Popular-tours fallback, unscored
    Popular,
}

impl fmt::Display for RecommendationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationSource::Personalized => f.write_str("personalized"),
            RecommendationSource::Popular => f.write_str("popular"),
        }
    }
}

/// The individual terms of a relevance score
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub tour_type: f64,
    pub difficulty: f64,
    pub duration: f64,
    pub price: f64,
    pub rating: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.tour_type + self.difficulty + self.duration + self.price + self.rating
    }
}

/// A tour as returned to callers.
///
/// Serializes as the tour's own fields plus `relevanceScore` (scored
/// results only) and `source`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TourRecommendation {
    #[serde(flatten)]
    pub tour: Tour,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<f64>,

    pub source: RecommendationSource,

    #[serde(skip)]
    pub breakdown: Option<ScoreBreakdown>,
}

impl TourRecommendation {
    pub fn scored(tour: Tour, breakdown: ScoreBreakdown) -> Self {
        Self {
            tour,
            relevance_score: Some(breakdown.total()),
            source: RecommendationSource::Personalized,
            breakdown: Some(breakdown),
        }
    }

    pub fn popular(tour: Tour) -> Self {
        Self {
            tour,
            relevance_score: None,
            source: RecommendationSource::Popular,
            breakdown: None,
        }
    }
}
