//! Similar Source - Tours that resemble a reference tour
//!
//! A tour is similar when it shares the reference's type, OR its
//! difficulty, OR sits within the price band around the reference price.
//! The reference itself is never returned. Similarity is not symmetric:
//! each direction runs its own query with its own price band.

use crate::error::{Result, SourceError};
use catalog::{Criterion, Tour, TourFilter, TourId, TourQuery, TourSort, TourStore};
use std::sync::Arc;
use tracing::{debug, instrument};

pub struct SimilarSource {
    store: Arc<dyn TourStore>,

    /// Half-width of the price band, as a fraction of the reference price
    price_band: f64,
}

impl SimilarSource {
    pub fn new(store: Arc<dyn TourStore>) -> Self {
        Self {
            store,
            price_band: 0.3,
        }
    }

    /// Configure the price band fraction (default: 0.3)
    pub fn with_price_band(mut self, price_band: f64) -> Self {
        self.price_band = price_band;
        self
    }

    /// The query this source sends for a given reference tour
    pub fn query(&self, reference: &Tour, limit: usize) -> TourQuery {
        let filter = TourFilter::new()
            .excluding([reference.id.clone()])
            .or_matching(Criterion::TypeIn(vec![reference.tour_type]))
            .or_matching(Criterion::DifficultyIn(vec![reference.difficulty]))
            .or_matching(Criterion::PriceBetween {
                min: reference.price * (1.0 - self.price_band),
                max: reference.price * (1.0 + self.price_band),
            });
        TourQuery::new(filter, TourSort::RatingDesc, limit)
    }

    /// Fetch up to `limit` tours similar to `tour_id`.
    ///
    /// Fails with `TourNotFound` when the reference does not exist.
    #[instrument(skip(self))]
    pub async fn get_candidates(&self, tour_id: &TourId, limit: usize) -> Result<Vec<Tour>> {
        let reference = self
            .store
            .find_tour_by_id(tour_id)
            .await?
            .ok_or_else(|| SourceError::TourNotFound {
                tour_id: tour_id.clone(),
            })?;

        let tours = self.store.query_tours(&self.query(&reference, limit)).await?;

        debug!("Found {} tours similar to {}", tours.len(), reference.name);
        Ok(tours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{CatalogIndex, Difficulty, TourType};

    fn create_test_index() -> CatalogIndex {
        let mut index = CatalogIndex::new();
        index.insert_tour(
            Tour::new("ref", "Harbour Ride", TourType::Bike, Difficulty::Moderate, 150, 100.0)
                .with_ratings(4.5, 10),
        );
        index.insert_tour(
            Tour::new("same-type", "Coast Ride", TourType::Bike, Difficulty::Difficult, 200, 400.0)
                .with_ratings(4.1, 3),
        );
        index.insert_tour(
            Tour::new("same-diff", "Hill Walk", TourType::Walking, Difficulty::Moderate, 90, 10.0)
                .with_ratings(4.8, 7),
        );
        index.insert_tour(
            Tour::new("in-band", "City Bus", TourType::Bus, Difficulty::Easy, 60, 130.0)
                .with_ratings(3.2, 20),
        );
        index.insert_tour(
            Tour::new("unrelated", "Night Bus", TourType::Bus, Difficulty::Easy, 60, 131.0)
                .with_ratings(5.0, 1),
        );
        index
    }

    #[tokio::test]
    async fn test_similar_tours() {
        let source = SimilarSource::new(Arc::new(create_test_index()));
        let tours = source.get_candidates(&"ref".to_string(), 4).await.unwrap();

        let ids: Vec<&str> = tours.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["same-diff", "same-type", "in-band"]);
    }

    #[tokio::test]
    async fn test_reference_never_included() {
        let source = SimilarSource::new(Arc::new(create_test_index()));
        for id in ["ref", "same-type", "same-diff", "in-band"] {
            let tours = source.get_candidates(&id.to_string(), 10).await.unwrap();
            assert!(tours.iter().all(|t| t.id != id));
        }
    }

    #[tokio::test]
    async fn test_unknown_reference() {
        let source = SimilarSource::new(Arc::new(create_test_index()));
        let result = source.get_candidates(&"missing".to_string(), 4).await;
        assert_eq!(
            result,
            Err(SourceError::TourNotFound {
                tour_id: "missing".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_similarity_is_not_symmetric() {
        let source = SimilarSource::new(Arc::new(create_test_index()));

        // 100 is within 30% of 131, but 131 is not within 30% of 100
        let from_unrelated = source.get_candidates(&"unrelated".to_string(), 10).await.unwrap();
        assert!(from_unrelated.iter().any(|t| t.id == "ref"));

        let from_ref = source.get_candidates(&"ref".to_string(), 10).await.unwrap();
        assert!(from_ref.iter().all(|t| t.id != "unrelated"));
    }
}
