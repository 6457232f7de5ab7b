//! Relevance scoring of candidate tours against a preference profile.
//!
//! score = type weight + difficulty weight + duration weight
//!       + price score + ratingsAverage
//!
//! The price score decays linearly from its maximum (5) by one point per
//! $20 of distance from the preferred price, bottoming out at zero.

use crate::ranking::rank_and_select;
use crate::types::{ScoreBreakdown, TourRecommendation};
use catalog::Tour;
use rayon::prelude::*;
use sources::{categorize, PreferenceProfile};
use tracing::debug;

/// Price score for a tour priced `price` against a `preferred` price
pub fn price_score(price: f64, preferred: f64, decay: f64, max_score: f64) -> f64 {
    let penalty = ((price - preferred).abs() / decay).min(max_score);
    (max_score - penalty).clamp(0.0, max_score)
}

/// Scores candidates in parallel.
#[derive(Debug, Clone)]
pub struct RelevanceScorer {
    /// Dollars of price distance per lost point
    price_decay: f64,

    /// Price score of a tour at exactly the preferred price
    max_price_score: f64,
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self {
            price_decay: 20.0,
            max_price_score: 5.0,
        }
    }
}

impl RelevanceScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the price decay in dollars per point (default: 20)
    pub fn with_price_decay(mut self, decay: f64) -> Self {
        self.price_decay = decay;
        self
    }

    /// Configure the maximum price score (default: 5)
    pub fn with_max_price_score(mut self, max_score: f64) -> Self {
        self.max_price_score = max_score;
        self
    }

    /// Score terms for a single tour
    pub fn breakdown(&self, tour: &Tour, profile: &PreferenceProfile) -> ScoreBreakdown {
        ScoreBreakdown {
            tour_type: profile.tour_types.get(&tour.tour_type),
            difficulty: profile.difficulties.get(&tour.difficulty),
            duration: profile.durations.get(&categorize(i64::from(tour.duration))),
            price: price_score(
                tour.price,
                profile.price_range.preferred,
                self.price_decay,
                self.max_price_score,
            ),
            rating: tour.ratings_average,
        }
    }

    /// Score every candidate, keeping the input order
    pub fn score_candidates(
        &self,
        candidates: Vec<Tour>,
        profile: &PreferenceProfile,
    ) -> Vec<TourRecommendation> {
        candidates
            .into_par_iter()
            .map(|tour| {
                let breakdown = self.breakdown(&tour, profile);
                TourRecommendation::scored(tour, breakdown)
            })
            .collect()
    }

    /// Score, sort by score descending, and keep the top `limit`
    pub fn rank(
        &self,
        candidates: Vec<Tour>,
        profile: &PreferenceProfile,
        limit: usize,
    ) -> Vec<TourRecommendation> {
        let scored = self.score_candidates(candidates, profile);
        debug!("Scored {} candidates", scored.len());
        rank_and_select(scored, limit)
    }
}
