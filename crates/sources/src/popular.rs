//! Popular Source - Non-personalized fallback
//!
//! Well-rated tours ordered by how many ratings they collected, then by
//! their average. Serves anonymous users and users without usable history.

use catalog::{StoreError, Tour, TourFilter, TourId, TourQuery, TourSort, TourStore};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct PopularSource {
    store: Arc<dyn TourStore>,

    /// Minimum `ratingsAverage` for a tour to count as popular
    min_rating: f64,
}

impl PopularSource {
    pub fn new(store: Arc<dyn TourStore>) -> Self {
        Self {
            store,
            min_rating: 4.0,
        }
    }

    /// Configure the minimum average rating (default: 4.0)
    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = min_rating;
        self
    }

    /// The query this source sends to the store
    pub fn query(&self, excluded: &HashSet<TourId>, limit: usize) -> TourQuery {
        let filter = TourFilter::new()
            .excluding(excluded.iter().cloned())
            .with_min_rating(self.min_rating);
        TourQuery::new(filter, TourSort::PopularityDesc, limit)
    }

    /// Fetch the `limit` most popular tours not in `excluded`
    #[instrument(skip(self, excluded), fields(excluded = excluded.len()))]
    pub async fn get_candidates(
        &self,
        excluded: &HashSet<TourId>,
        limit: usize,
    ) -> Result<Vec<Tour>, StoreError> {
        let tours = self.store.query_tours(&self.query(excluded, limit)).await?;

        debug!("Generated {} popular candidates", tours.len());
        Ok(tours)
    }
}
