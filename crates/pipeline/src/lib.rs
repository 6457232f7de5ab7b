//! Scoring and ranking of tour candidates.
//!
//! This crate provides:
//! - RelevanceScorer for computing per-candidate relevance scores
//! - rank_and_select for the final stable ordering and cut
//! - TourRecommendation, the shape returned to callers
//!
//! ## Architecture
//! Candidates arrive from a source already limited to the top `limit` by
//! rating. The scorer re-sorts that set by composite score:
//! 1. Per-candidate score terms are computed in parallel
//! 2. Candidates are stably sorted by score, descending
//! 3. The list is truncated to `limit`
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::RelevanceScorer;
//!
//! let scorer = RelevanceScorer::new();
//! let recommendations = scorer.rank(candidates, &profile, 5);
//! ```

pub mod types;
pub mod scoring;
pub mod ranking;

// Re-export main types
pub use ranking::rank_and_select;
pub use scoring::{price_score, RelevanceScorer};
pub use types::{RecommendationSource, ScoreBreakdown, TourRecommendation};
