//! Candidate Query Builder
//!
//! Translates a preference profile into a catalog query:
//! - tour type is one of the user's top types, OR
//! - difficulty is one of the user's top difficulties, OR
//! - price lies inside the profile's price band
//!
//! AND the tour is not already booked AND its rating clears a floor of
//! `min(averageRating, 4)`. Results are requested best-rated first.

use crate::profile::PreferenceProfile;
use catalog::{Criterion, TourFilter, TourId, TourQuery, TourSort};
use std::collections::HashSet;

pub struct CandidateQueryBuilder {
    /// How many of the heaviest types and difficulties to keep
    top_preferences: usize,

    /// Upper bound applied to the user's own average rating
    rating_floor_cap: f64,
}

impl Default for CandidateQueryBuilder {
    fn default() -> Self {
        Self {
            top_preferences: 2,
            rating_floor_cap: 4.0,
        }
    }
}

impl CandidateQueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure how many top types/difficulties are used (default: 2)
    pub fn with_top_preferences(mut self, n: usize) -> Self {
        self.top_preferences = n;
        self
    }

    /// Configure the rating floor cap (default: 4.0)
    pub fn with_rating_floor_cap(mut self, cap: f64) -> Self {
        self.rating_floor_cap = cap;
        self
    }

    /// Build the candidate query.
    ///
    /// Empty type or difficulty lists are still emitted and simply match
    /// nothing, leaving the price band as the only live alternative.
    pub fn build(
        &self,
        profile: &PreferenceProfile,
        booked: &HashSet<TourId>,
        limit: usize,
    ) -> TourQuery {
        let top_types = profile.tour_types.top(self.top_preferences);
        let top_difficulties = profile.difficulties.top(self.top_preferences);
        let rating_floor = profile.average_rating.min(self.rating_floor_cap);

        let filter = TourFilter::new()
            .excluding(booked.iter().cloned())
            .or_matching(Criterion::TypeIn(top_types))
            .or_matching(Criterion::DifficultyIn(top_difficulties))
            .or_matching(Criterion::PriceBetween {
                min: profile.price_range.min,
                max: profile.price_range.max,
            })
            .with_min_rating(rating_floor);

        TourQuery::new(filter, TourSort::RatingDesc, limit)
    }
}

/// Build a candidate query with the default settings
pub fn build_query(
    profile: &PreferenceProfile,
    booked: &HashSet<TourId>,
    limit: usize,
) -> TourQuery {
    CandidateQueryBuilder::default().build(profile, booked, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{Difficulty, TourType};

    fn profile() -> PreferenceProfile {
        let mut profile = PreferenceProfile::default();
        profile.tour_types.add(TourType::Bike, 5.0);
        profile.tour_types.add(TourType::Walking, 3.0);
        profile.tour_types.add(TourType::Bus, 1.0);
        profile.difficulties.add(Difficulty::Easy, 2.0);
        profile.price_range.min = 35.0;
        profile.price_range.max = 65.0;
        profile.price_range.preferred = 50.0;
        profile.average_rating = 4.6;
        profile.total_interactions = 9.0;
        profile
    }

    #[test]
    fn test_query_shape() {
        let booked: HashSet<TourId> = ["t1".to_string()].into_iter().collect();
        let query = build_query(&profile(), &booked, 10);

        assert_eq!(query.limit, 10);
        assert_eq!(query.sort, TourSort::RatingDesc);
        assert!(query.filter.excluded_ids.contains("t1"));
        assert_eq!(
            query.filter.any_of,
            vec![
                Criterion::TypeIn(vec![TourType::Bike, TourType::Walking]),
                Criterion::DifficultyIn(vec![Difficulty::Easy]),
                Criterion::PriceBetween { min: 35.0, max: 65.0 },
            ]
        );
    }

    #[test]
    fn test_rating_floor_is_capped() {
        let query = build_query(&profile(), &HashSet::new(), 10);
        assert_eq!(query.filter.min_rating, Some(4.0));

        let mut harsh = profile();
        harsh.average_rating = 2.5;
        let query = build_query(&harsh, &HashSet::new(), 10);
        assert_eq!(query.filter.min_rating, Some(2.5));
    }

    #[test]
    fn test_no_reviews_means_no_effective_floor() {
        let mut quiet = profile();
        quiet.average_rating = 0.0;
        let query = build_query(&quiet, &HashSet::new(), 10);
        assert_eq!(query.filter.min_rating, Some(0.0));
    }

    #[test]
    fn test_custom_top_preferences() {
        let builder = CandidateQueryBuilder::new().with_top_preferences(1);
        let query = builder.build(&profile(), &HashSet::new(), 10);
        assert_eq!(query.filter.any_of[0], Criterion::TypeIn(vec![TourType::Bike]));
    }
}
