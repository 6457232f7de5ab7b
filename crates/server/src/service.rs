//! # Recommendation Service
//!
//! This module coordinates the recommendation pipeline:
//! 1. Fetch the user's bookings, favorites, reviews and booked tour ids
//! 2. Build the preference profile
//! 3. Query candidates matching the profile
//! 4. Score and rank candidates
//! 5. Fall back to popular tours when there is nothing to personalize
//!
//! The service holds no per-request state. It is cheap to clone and safe to
//! share between tasks; every store is injected at construction.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use catalog::{InteractionStore, Tour, TourId, TourStore, UserId};
use pipeline::{RelevanceScorer, TourRecommendation};
use sources::{
    CandidateQueryBuilder, PersonalizedSource, PopularSource, PreferenceProfile,
    ProfileAccumulator, SimilarSource,
};

use crate::config::EngineConfig;
use crate::error::Result;

#[derive(Clone)]
pub struct RecommendationService {
    interactions: Arc<dyn InteractionStore>,
    accumulator: ProfileAccumulator,
    personalized: Arc<PersonalizedSource>,
    popular: Arc<PopularSource>,
    similar: Arc<SimilarSource>,
    scorer: RelevanceScorer,
    config: EngineConfig,
}

impl RecommendationService {
    /// Create a service with the default configuration
    pub fn new(interactions: Arc<dyn InteractionStore>, tours: Arc<dyn TourStore>) -> Self {
        Self::with_config(interactions, tours, EngineConfig::default())
    }

    /// Create a service wired from `config`
    pub fn with_config(
        interactions: Arc<dyn InteractionStore>,
        tours: Arc<dyn TourStore>,
        config: EngineConfig,
    ) -> Self {
        let accumulator = ProfileAccumulator::new()
            .with_weights(config.weights)
            .with_price_band(config.price_band);
        let personalized = PersonalizedSource::new(tours.clone()).with_query_builder(
            CandidateQueryBuilder::new()
                .with_top_preferences(config.top_preferences)
                .with_rating_floor_cap(config.rating_floor_cap),
        );
        let popular = PopularSource::new(tours.clone()).with_min_rating(config.popular_min_rating);
        let similar = SimilarSource::new(tours).with_price_band(config.price_band);
        let scorer = RelevanceScorer::new()
            .with_price_decay(config.price_decay)
            .with_max_price_score(config.max_price_score);

        Self {
            interactions,
            accumulator,
            personalized: Arc::new(personalized),
            popular: Arc::new(popular),
            similar: Arc::new(similar),
            scorer,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Recommendations for `user_id`, or popular tours for anonymous callers.
    ///
    /// `limit` defaults to `limits.personalized`. Users without usable
    /// history, or whose profile matches nothing, get popular tours minus the
    /// tours they already booked.
    pub async fn get_personalized_recommendations(
        &self,
        user_id: Option<&UserId>,
        limit: Option<usize>,
    ) -> Result<Vec<TourRecommendation>> {
        let start_time = Instant::now();
        let limit = limit.unwrap_or(self.config.limits.personalized);

        let Some(user_id) = user_id else {
            debug!("No user given, serving popular tours");
            return self.popular_fallback(&HashSet::new(), limit).await;
        };

        let (bookings, favorites, reviews, booked) = tokio::try_join!(
            self.interactions.find_bookings_by_user(user_id),
            self.interactions.find_favorites_by_user(user_id),
            self.interactions.find_reviews_by_user(user_id),
            self.interactions.find_distinct_booked_tour_ids(user_id),
        )?;
        debug!(
            "Fetched history for user {}: {} bookings, {} favorites, {} reviews",
            user_id,
            bookings.len(),
            favorites.len(),
            reviews.len()
        );

        let profile = self.accumulator.build(&bookings, &favorites, &reviews);
        if profile.is_empty() {
            info!("User {} has no usable history, serving popular tours", user_id);
            return self.popular_fallback(&booked, limit).await;
        }

        let candidates = self.personalized.get_candidates(&profile, &booked, limit).await?;
        if candidates.is_empty() {
            warn!("No candidates matched profile of user {}, serving popular tours", user_id);
            return self.popular_fallback(&booked, limit).await;
        }

        // Scoring is CPU-bound and fans out over rayon
        let scorer = self.scorer.clone();
        let recommendations =
            tokio::task::spawn_blocking(move || scorer.rank(candidates, &profile, limit)).await?;

        info!(
            "Selected {} recommendations for user {} in {:.2?}",
            recommendations.len(),
            user_id,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Well-rated tours by rating count; `limit` defaults to `limits.popular`
    pub async fn get_popular_tours(&self, limit: Option<usize>) -> Result<Vec<Tour>> {
        let limit = limit.unwrap_or(self.config.limits.popular);
        Ok(self.popular.get_candidates(&HashSet::new(), limit).await?)
    }

    /// Tours resembling `tour_id`; `limit` defaults to `limits.similar`.
    ///
    /// Fails with `NotFound` when `tour_id` does not exist.
    pub async fn get_similar_tours(
        &self,
        tour_id: &TourId,
        limit: Option<usize>,
    ) -> Result<Vec<Tour>> {
        let limit = limit.unwrap_or(self.config.limits.similar);
        Ok(self.similar.get_candidates(tour_id, limit).await?)
    }

    /// The preference profile the engine would use for `user_id`
    pub async fn build_profile(&self, user_id: &UserId) -> Result<PreferenceProfile> {
        let (bookings, favorites, reviews) = tokio::try_join!(
            self.interactions.find_bookings_by_user(user_id),
            self.interactions.find_favorites_by_user(user_id),
            self.interactions.find_reviews_by_user(user_id),
        )?;
        Ok(self.accumulator.build(&bookings, &favorites, &reviews))
    }

    async fn popular_fallback(
        &self,
        excluded: &HashSet<TourId>,
        limit: usize,
    ) -> Result<Vec<TourRecommendation>> {
        let tours = self.popular.get_candidates(excluded, limit).await?;
        Ok(tours.into_iter().map(TourRecommendation::popular).collect())
    }
}
