//! Builds a PreferenceProfile from a user's interaction history.
//!
//! Three sources feed the profile, each with its own weight:
//! - bookings (strongest signal)
//! - favorites
//! - reviews, weighted by the rating the user gave
//!
//! The accumulator is a pure transform over records already fetched from
//! the store. Interactions whose tour no longer exists are skipped.

use crate::duration::categorize;
use crate::profile::PreferenceProfile;
use catalog::{Interaction, ReviewInteraction, Tour};
use serde::Deserialize;

/// Weight each kind of interaction contributes to the profile
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionWeights {
    pub booking: f64,
    pub favorite: f64,
    /// Reviews rated 4 or above
    pub positive_review: f64,
    /// Reviews rated at least 3 but below 4
    pub neutral_review: f64,
}

impl Default for InteractionWeights {
    fn default() -> Self {
        Self {
            booking: 3.0,
            favorite: 2.0,
            positive_review: 2.0,
            neutral_review: 1.0,
        }
    }
}

impl InteractionWeights {
    /// Weight of a review with the given rating; below 3 it is zero
    pub fn review_weight(&self, rating: f64) -> f64 {
        if rating >= 4.0 {
            self.positive_review
        } else if rating >= 3.0 {
            self.neutral_review
        } else {
            0.0
        }
    }
}

/// Turns interaction history into a PreferenceProfile
#[derive(Debug, Clone)]
pub struct ProfileAccumulator {
    weights: InteractionWeights,
    /// Half-width of the price band around the preferred price, as a fraction
    price_band: f64,
}

impl Default for ProfileAccumulator {
    fn default() -> Self {
        Self {
            weights: InteractionWeights::default(),
            price_band: 0.3,
        }
    }
}

impl ProfileAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure interaction weights (default: 3 / 2 / 2 / 1)
    pub fn with_weights(mut self, weights: InteractionWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Configure the price band fraction (default: 0.3)
    pub fn with_price_band(mut self, price_band: f64) -> Self {
        self.price_band = price_band;
        self
    }

    /// Build the profile.
    ///
    /// `average_rating` divides by the full review count, including reviews
    /// whose tour could not be resolved.
    pub fn build(
        &self,
        bookings: &[Interaction],
        favorites: &[Interaction],
        reviews: &[ReviewInteraction],
    ) -> PreferenceProfile {
        let mut tally = Tally::default();

        for tour in bookings.iter().filter_map(|b| b.tour.as_ref()) {
            tally.record(tour, self.weights.booking);
        }

        for tour in favorites.iter().filter_map(|f| f.tour.as_ref()) {
            tally.record(tour, self.weights.favorite);
        }

        for review in reviews {
            let Some(tour) = review.tour.as_ref() else {
                continue;
            };
            let weight = self.weights.review_weight(review.rating);
            if weight > 0.0 {
                tally.record(tour, weight);
            }
            tally.rating_sum += review.rating;
        }

        let mut profile = tally.profile;

        if profile.total_interactions > 0.0 {
            let preferred = (tally.price_sum / profile.total_interactions).round();
            profile.price_range.preferred = preferred;
            profile.price_range.min = (preferred * (1.0 - self.price_band)).max(0.0);
            profile.price_range.max = preferred * (1.0 + self.price_band);
        }

        if !reviews.is_empty() {
            profile.average_rating = tally.rating_sum / reviews.len() as f64;
        }

        profile
    }
}

/// Running sums while walking the interaction lists
#[derive(Default)]
struct Tally {
    profile: PreferenceProfile,
    price_sum: f64,
    rating_sum: f64,
}

impl Tally {
    fn record(&mut self, tour: &Tour, weight: f64) {
        let profile = &mut self.profile;
        profile.tour_types.add(tour.tour_type, weight);
        profile.difficulties.add(tour.difficulty, weight);
        profile
            .durations
            .add(categorize(i64::from(tour.duration)), weight);
        if let Some(address) = tour.start_address() {
            profile.locations.add(address.to_string(), weight);
        }
        profile.total_interactions += weight;
        self.price_sum += tour.price * weight;
    }
}

/// Build a profile with the default weights and price band
pub fn build_profile(
    bookings: &[Interaction],
    favorites: &[Interaction],
    reviews: &[ReviewInteraction],
) -> PreferenceProfile {
    ProfileAccumulator::default().build(bookings, favorites, reviews)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duration::DurationCategory;
    use crate::profile::PriceRange;
    use catalog::{Difficulty, TourType};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn bike_tour() -> Tour {
        Tour::new("bike", "Harbour Ride", TourType::Bike, Difficulty::Moderate, 150, 50.0)
    }

    fn walking_tour() -> Tour {
        Tour::new("walk", "Old Town", TourType::Walking, Difficulty::Easy, 45, 20.0)
            .with_address("Lisbon, PT")
    }

    #[test]
    fn test_empty_history_gives_default_profile() {
        let profile = build_profile(&[], &[], &[]);

        assert_eq!(profile.total_interactions, 0.0);
        assert!(profile.tour_types.is_empty());
        assert!(profile.difficulties.is_empty());
        assert!(profile.durations.is_empty());
        assert!(profile.locations.is_empty());
        assert_eq!(profile.price_range, PriceRange::default());
        assert_eq!(profile.average_rating, 0.0);
    }

    #[test]
    fn test_single_booking_profile() {
        let bookings = vec![Interaction::new(Some(bike_tour()))];
        let profile = build_profile(&bookings, &[], &[]);

        assert_eq!(profile.tour_types.get(&TourType::Bike), 3.0);
        assert_eq!(profile.tour_types.len(), 1);
        assert_eq!(profile.difficulties.get(&Difficulty::Moderate), 3.0);
        assert_eq!(profile.durations.get(&DurationCategory::Medium), 3.0);
        assert!(profile.locations.is_empty());
        assert_eq!(profile.price_range.preferred, 50.0);
        assert!(approx(profile.price_range.min, 35.0));
        assert!(approx(profile.price_range.max, 65.0));
        assert_eq!(profile.total_interactions, 3.0);
    }

    #[test]
    fn test_source_weights() {
        let walking = || Some(walking_tour());

        let booked = build_profile(&[Interaction::new(walking())], &[], &[]);
        assert_eq!(booked.tour_types.get(&TourType::Walking), 3.0);

        let favorited = build_profile(&[], &[Interaction::new(walking())], &[]);
        assert_eq!(favorited.tour_types.get(&TourType::Walking), 2.0);

        let loved = build_profile(&[], &[], &[ReviewInteraction::new(5.0, walking())]);
        assert_eq!(loved.tour_types.get(&TourType::Walking), 2.0);

        let neutral = build_profile(&[], &[], &[ReviewInteraction::new(3.0, walking())]);
        assert_eq!(neutral.tour_types.get(&TourType::Walking), 1.0);

        let disliked = build_profile(&[], &[], &[ReviewInteraction::new(2.0, walking())]);
        assert_eq!(disliked.tour_types.get(&TourType::Walking), 0.0);
        assert_eq!(disliked.total_interactions, 0.0);
        assert_eq!(disliked.average_rating, 2.0);
        assert_eq!(disliked.price_range, PriceRange::default());
    }

    #[test]
    fn test_location_only_recorded_when_present() {
        let bookings = vec![
            Interaction::new(Some(walking_tour())),
            Interaction::new(Some(bike_tour())),
        ];
        let profile = build_profile(&bookings, &[], &[]);

        assert_eq!(profile.locations.len(), 1);
        assert_eq!(profile.locations.get("Lisbon, PT"), 3.0);
    }

    #[test]
    fn test_unresolved_tours_are_skipped() {
        let bookings = vec![Interaction::new(None)];
        let favorites = vec![Interaction::new(None)];
        let reviews = vec![
            ReviewInteraction::new(5.0, None),
            ReviewInteraction::new(4.0, Some(walking_tour())),
        ];
        let profile = build_profile(&bookings, &favorites, &reviews);

        assert_eq!(profile.total_interactions, 2.0);
        assert_eq!(profile.tour_types.len(), 1);
        // Divided by both reviews even though only one resolved
        assert_eq!(profile.average_rating, 2.0);
    }

    #[test]
    fn test_weighted_price_average_is_rounded() {
        // (3 * 50 + 2 * 20) / 5 = 38
        let bookings = vec![Interaction::new(Some(bike_tour()))];
        let favorites = vec![Interaction::new(Some(walking_tour()))];
        let profile = build_profile(&bookings, &favorites, &[]);
        assert_eq!(profile.price_range.preferred, 38.0);

        // (3 * 50 + 1 * 20) / 4 = 42.5 -> 43
        let reviews = vec![ReviewInteraction::new(3.0, Some(walking_tour()))];
        let profile = build_profile(&bookings, &[], &reviews);
        assert_eq!(profile.price_range.preferred, 43.0);
    }

    #[test]
    fn test_average_rating_counts_every_review() {
        let reviews = vec![
            ReviewInteraction::new(5.0, Some(walking_tour())),
            ReviewInteraction::new(3.0, Some(bike_tour())),
            ReviewInteraction::new(1.0, Some(bike_tour())),
        ];
        let profile = build_profile(&[], &[], &reviews);

        assert!(approx(profile.average_rating, 3.0));
        assert_eq!(profile.total_interactions, 3.0);
    }

    #[test]
    fn test_build_is_idempotent() {
        let bookings = vec![Interaction::new(Some(bike_tour()))];
        let favorites = vec![Interaction::new(Some(walking_tour()))];
        let reviews = vec![ReviewInteraction::new(4.5, Some(walking_tour()))];

        let first = build_profile(&bookings, &favorites, &reviews);
        let second = build_profile(&bookings, &favorites, &reviews);
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_weights() {
        let accumulator = ProfileAccumulator::new().with_weights(InteractionWeights {
            booking: 10.0,
            ..InteractionWeights::default()
        });
        let profile = accumulator.build(&[Interaction::new(Some(bike_tour()))], &[], &[]);
        assert_eq!(profile.tour_types.get(&TourType::Bike), 10.0);
    }
}
