//! End-to-end tests for the recommendation service.
//!
//! These tests load the sample catalog shipped in data/sample and exercise
//! every public operation through the service.

use catalog::{CatalogIndex, Difficulty, InteractionStore, TourType};
use pipeline::RecommendationSource;
use server::{RecommendationError, RecommendationService};
use sources::DurationCategory;
use std::path::Path;
use std::sync::Arc;

fn load_sample() -> Arc<CatalogIndex> {
    let data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/sample");
    Arc::new(CatalogIndex::load_from_dir(&data_dir).expect("sample catalog should load"))
}

fn service(index: &Arc<CatalogIndex>) -> RecommendationService {
    RecommendationService::new(index.clone(), index.clone())
}

#[tokio::test]
async fn test_single_booking_profile() {
    let index = load_sample();
    let profile = service(&index)
        .build_profile(&"user-bike".to_string())
        .await
        .unwrap();

    assert_eq!(profile.tour_types.get(&TourType::Bike), 3.0);
    assert_eq!(profile.tour_types.len(), 1);
    assert_eq!(profile.difficulties.get(&Difficulty::Moderate), 3.0);
    assert_eq!(profile.difficulties.len(), 1);
    assert_eq!(profile.durations.get(&DurationCategory::Medium), 3.0);
    assert_eq!(profile.durations.len(), 1);
    assert_eq!(profile.price_range.preferred, 50.0);
    assert!((profile.price_range.min - 35.0).abs() < 1e-9);
    assert!((profile.price_range.max - 65.0).abs() < 1e-9);
    assert_eq!(profile.total_interactions, 3.0);
}

#[tokio::test]
async fn test_booked_tours_never_recommended() {
    let index = load_sample();
    let service = service(&index);

    for user_id in index.user_ids() {
        let booked = index.find_distinct_booked_tour_ids(&user_id).await.unwrap();
        let recs = service
            .get_personalized_recommendations(Some(&user_id), Some(10))
            .await
            .unwrap();

        for rec in &recs {
            assert!(
                !booked.contains(&rec.tour.id),
                "user {} was recommended booked tour {}",
                user_id,
                rec.tour.id
            );
        }
    }
}

#[tokio::test]
async fn test_personalized_scores_are_ordered() {
    let index = load_sample();
    let recs = service(&index)
        .get_personalized_recommendations(Some(&"user-walker".to_string()), None)
        .await
        .unwrap();

    assert!(!recs.is_empty());
    assert!(recs.len() <= 5);
    assert!(recs.iter().all(|r| r.source == RecommendationSource::Personalized));
    for pair in recs.windows(2) {
        assert!(pair[0].relevance_score >= pair[1].relevance_score);
    }
}

#[tokio::test]
async fn test_no_history_matches_popular() {
    let index = load_sample();
    let service = service(&index);

    let popular: Vec<String> = service
        .get_popular_tours(None)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();

    let anonymous: Vec<String> = service
        .get_personalized_recommendations(None, None)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.tour.id)
        .collect();
    assert_eq!(anonymous, popular);

    let unknown: Vec<String> = service
        .get_personalized_recommendations(Some(&"user-nobody".to_string()), None)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.tour.id)
        .collect();
    assert_eq!(unknown, popular);
}

#[tokio::test]
async fn test_unusable_history_falls_back_to_popular() {
    let index = load_sample();
    let service = service(&index);

    // Only a booking of a deleted tour
    let ghost = service
        .get_personalized_recommendations(Some(&"user-ghost".to_string()), None)
        .await
        .unwrap();
    assert!(ghost.iter().all(|r| r.source == RecommendationSource::Popular));

    // Only reviews rated below 3
    let critic_profile = service.build_profile(&"user-critic".to_string()).await.unwrap();
    assert_eq!(critic_profile.total_interactions, 0.0);
    assert_eq!(critic_profile.average_rating, 1.5);

    let critic = service
        .get_personalized_recommendations(Some(&"user-critic".to_string()), None)
        .await
        .unwrap();
    assert!(critic.iter().all(|r| r.source == RecommendationSource::Popular));
}

#[tokio::test]
async fn test_popular_tours_are_well_rated_and_ordered() {
    let index = load_sample();
    let tours = service(&index).get_popular_tours(Some(20)).await.unwrap();

    assert!(tours.iter().all(|t| t.ratings_average >= 4.0));
    for pair in tours.windows(2) {
        assert!(pair[0].ratings_quantity >= pair[1].ratings_quantity);
    }
}

#[tokio::test]
async fn test_similar_tours() {
    let index = load_sample();
    let service = service(&index);
    let reference = "5c88fa8cf4afda39709c2980".to_string();

    let tours = service.get_similar_tours(&reference, None).await.unwrap();
    assert!(tours.len() <= 4);
    assert!(tours.iter().all(|t| t.id != reference));
}

#[tokio::test]
async fn test_similar_tours_unknown_reference() {
    let index = load_sample();
    let result = service(&index)
        .get_similar_tours(&"nonexistent-id".to_string(), None)
        .await;

    assert!(matches!(result, Err(RecommendationError::NotFound { .. })));
}
