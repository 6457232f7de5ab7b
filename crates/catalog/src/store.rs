//! Read interfaces consumed by the recommendation engine.
//!
//! The engine only ever talks to these traits, so any backing store
//! (a database, a remote service, a test double) can be injected.
//! `CatalogIndex` implements both traits over its in-memory indices and
//! never fails.

use crate::error::StoreError;
use crate::query::TourQuery;
use crate::types::{CatalogIndex, Interaction, ReviewInteraction, Tour, TourId, UserId};
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::debug;

/// Per-user interaction history
#[async_trait]
pub trait InteractionStore: Send + Sync {
    async fn find_bookings_by_user(&self, user_id: &UserId)
        -> Result<Vec<Interaction>, StoreError>;

    async fn find_favorites_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Interaction>, StoreError>;

    async fn find_reviews_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ReviewInteraction>, StoreError>;

    async fn find_distinct_booked_tour_ids(
        &self,
        user_id: &UserId,
    ) -> Result<HashSet<TourId>, StoreError>;
}

/// The tour catalog
#[async_trait]
pub trait TourStore: Send + Sync {
    async fn query_tours(&self, query: &TourQuery) -> Result<Vec<Tour>, StoreError>;

    async fn find_tour_by_id(&self, tour_id: &TourId) -> Result<Option<Tour>, StoreError>;
}

impl CatalogIndex {
    /// Evaluate a query: filter in catalog order, stable sort, then limit
    pub fn run_query(&self, query: &TourQuery) -> Vec<Tour> {
        let mut matched: Vec<&Tour> = self
            .tours()
            .filter(|tour| query.filter.matches(tour))
            .collect();

        matched.sort_by(|a, b| query.sort.compare(a, b));
        matched.truncate(query.limit);

        debug!("Query matched {} tours (limit {})", matched.len(), query.limit);
        matched.into_iter().cloned().collect()
    }

    fn resolve(&self, tour_id: &str) -> Option<Tour> {
        self.get_tour(tour_id).cloned()
    }
}

#[async_trait]
impl InteractionStore for CatalogIndex {
    async fn find_bookings_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Interaction>, StoreError> {
        Ok(self
            .get_user_bookings(user_id)
            .iter()
            .map(|booking| Interaction::new(self.resolve(&booking.tour)))
            .collect())
    }

    async fn find_favorites_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Interaction>, StoreError> {
        Ok(self
            .get_user_favorites(user_id)
            .iter()
            .map(|favorite| Interaction::new(self.resolve(&favorite.tour)))
            .collect())
    }

    async fn find_reviews_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ReviewInteraction>, StoreError> {
        Ok(self
            .get_user_reviews(user_id)
            .iter()
            .map(|review| ReviewInteraction::new(review.rating, self.resolve(&review.tour)))
            .collect())
    }

    async fn find_distinct_booked_tour_ids(
        &self,
        user_id: &UserId,
    ) -> Result<HashSet<TourId>, StoreError> {
        Ok(self
            .get_user_bookings(user_id)
            .iter()
            .map(|booking| booking.tour.clone())
            .collect())
    }
}

#[async_trait]
impl TourStore for CatalogIndex {
    async fn query_tours(&self, query: &TourQuery) -> Result<Vec<Tour>, StoreError> {
        Ok(self.run_query(query))
    }

    async fn find_tour_by_id(&self, tour_id: &TourId) -> Result<Option<Tour>, StoreError> {
        Ok(self.resolve(tour_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Criterion, TourFilter, TourSort};
    use crate::types::{Booking, Difficulty, Review, TourType};

    fn create_test_index() -> CatalogIndex {
        let mut index = CatalogIndex::new();

        index.insert_tour(
            Tour::new("t1", "Old Town Walk", TourType::Walking, Difficulty::Easy, 60, 25.0)
                .with_ratings(4.8, 12),
        );
        index.insert_tour(
            Tour::new("t2", "Harbour Ride", TourType::Bike, Difficulty::Moderate, 150, 50.0)
                .with_ratings(4.2, 30),
        );
        index.insert_tour(
            Tour::new("t3", "Night Bus", TourType::Bus, Difficulty::Easy, 240, 80.0)
                .with_ratings(4.8, 5),
        );

        index.insert_booking(Booking {
            id: "b1".to_string(),
            user: "u1".to_string(),
            tour: "t2".to_string(),
            price: Some(50.0),
            created_at: None,
        });
        index.insert_booking(Booking {
            id: "b2".to_string(),
            user: "u1".to_string(),
            tour: "t2".to_string(),
            price: Some(50.0),
            created_at: None,
        });
        index.insert_booking(Booking {
            id: "b3".to_string(),
            user: "u1".to_string(),
            tour: "deleted".to_string(),
            price: None,
            created_at: None,
        });
        index.insert_review(Review {
            id: "r1".to_string(),
            user: "u1".to_string(),
            tour: "deleted".to_string(),
            rating: 2.0,
            review: None,
        });

        index
    }

    #[tokio::test]
    async fn test_bookings_resolve_tours_or_none() {
        let index = create_test_index();
        let bookings = index.find_bookings_by_user(&"u1".to_string()).await.unwrap();

        assert_eq!(bookings.len(), 3);
        assert_eq!(bookings[0].tour.as_ref().map(|t| t.id.as_str()), Some("t2"));
        assert!(bookings[2].tour.is_none());
    }

    #[tokio::test]
    async fn test_reviews_keep_rating_for_deleted_tour() {
        let index = create_test_index();
        let reviews = index.find_reviews_by_user(&"u1".to_string()).await.unwrap();

        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].rating, 2.0);
        assert!(reviews[0].tour.is_none());
    }

    #[tokio::test]
    async fn test_distinct_booked_ids() {
        let index = create_test_index();
        let ids = index
            .find_distinct_booked_tour_ids(&"u1".to_string())
            .await
            .unwrap();

        assert_eq!(ids.len(), 2);
        assert!(ids.contains("t2"));
        assert!(ids.contains("deleted"));
    }

    #[tokio::test]
    async fn test_unknown_user_has_empty_history() {
        let index = create_test_index();
        let user = "nobody".to_string();

        assert!(index.find_bookings_by_user(&user).await.unwrap().is_empty());
        assert!(index.find_favorites_by_user(&user).await.unwrap().is_empty());
        assert!(index.find_reviews_by_user(&user).await.unwrap().is_empty());
        assert!(index.find_distinct_booked_tour_ids(&user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_sorts_stably_and_limits() {
        let index = create_test_index();
        let query = TourQuery::new(TourFilter::new(), TourSort::RatingDesc, 2);

        let tours = index.query_tours(&query).await.unwrap();

        // t1 and t3 tie on rating; catalog order decides
        let ids: Vec<&str> = tours.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t1", "t3"]);
    }

    #[tokio::test]
    async fn test_query_applies_filter() {
        let index = create_test_index();
        let filter = TourFilter::new()
            .excluding(vec!["t1".to_string()])
            .or_matching(Criterion::DifficultyIn(vec![Difficulty::Easy]));
        let query = TourQuery::new(filter, TourSort::RatingDesc, 10);

        let tours = index.query_tours(&query).await.unwrap();
        assert_eq!(tours.len(), 1);
        assert_eq!(tours[0].id, "t3");
    }

    #[tokio::test]
    async fn test_find_tour_by_id() {
        let index = create_test_index();
        assert!(index.find_tour_by_id(&"t1".to_string()).await.unwrap().is_some());
        assert!(index.find_tour_by_id(&"missing".to_string()).await.unwrap().is_none());
    }
}
