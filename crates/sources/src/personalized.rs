//! Personalized Source - Preference-driven candidate retrieval
//!
//! Asks the tour store for tours matching the user's preference profile,
//! excluding everything the user already booked. The store returns them
//! best-rated first; scoring and final ranking happen downstream.

use crate::profile::PreferenceProfile;
use crate::query_builder::CandidateQueryBuilder;
use catalog::{StoreError, Tour, TourId, TourStore};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct PersonalizedSource {
    store: Arc<dyn TourStore>,
    builder: CandidateQueryBuilder,
}

impl PersonalizedSource {
    pub fn new(store: Arc<dyn TourStore>) -> Self {
        Self {
            store,
            builder: CandidateQueryBuilder::default(),
        }
    }

    /// Replace the query builder (e.g. to change the rating floor cap)
    pub fn with_query_builder(mut self, builder: CandidateQueryBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Fetch at most `limit` candidates for the profile
    #[instrument(skip(self, profile, booked), fields(booked = booked.len()))]
    pub async fn get_candidates(
        &self,
        profile: &PreferenceProfile,
        booked: &HashSet<TourId>,
        limit: usize,
    ) -> Result<Vec<Tour>, StoreError> {
        let query = self.builder.build(profile, booked, limit);
        let candidates = self.store.query_tours(&query).await?;

        debug!("Generated {} personalized candidates", candidates.len());
        Ok(candidates)
    }
}
