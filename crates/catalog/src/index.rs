//! CatalogIndex building and indexing logic.
//!
//! Loads the collections of a catalog directory, builds the per-user
//! indices, refreshes tour rating statistics from reviews and validates
//! the result.

use crate::error::{CatalogError, Result};
use crate::parser;
use crate::types::*;
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

impl CatalogIndex {
    /// Load a catalog directory
    ///
    /// Steps:
    /// 1. Parse the four collections in parallel
    /// 2. Insert tours, then interactions
    /// 3. Refresh rating statistics from reviews
    /// 4. Validate data integrity
    pub fn load_from_dir(data_dir: &Path) -> Result<Self> {
        info!("Loading tour catalog from {:?}", data_dir);

        let tours_path = data_dir.join(parser::TOURS_FILE);
        let bookings_path = data_dir.join(parser::BOOKINGS_FILE);
        let favorites_path = data_dir.join(parser::FAVORITES_FILE);
        let reviews_path = data_dir.join(parser::REVIEWS_FILE);

        // Nested joins give four-way parallelism
        let ((tours, bookings), (favorites, reviews)) = rayon::join(
            || {
                rayon::join(
                    || parser::parse_tours(&tours_path),
                    || parser::parse_bookings(&bookings_path),
                )
            },
            || {
                rayon::join(
                    || parser::parse_favorites(&favorites_path),
                    || parser::parse_reviews(&reviews_path),
                )
            },
        );

        let tours = tours?;
        let bookings = bookings?;
        let favorites = favorites?;
        let reviews = reviews?;

        info!(
            "Loaded {} tours, {} bookings, {} favorites, {} reviews",
            tours.len(),
            bookings.len(),
            favorites.len(),
            reviews.len()
        );

        let mut index = CatalogIndex::new();

        let mut seen = HashSet::new();
        for tour in tours {
            if !seen.insert(tour.id.clone()) {
                return Err(CatalogError::DuplicateId {
                    entity: "tour".to_string(),
                    id: tour.id,
                });
            }
            index.insert_tour(tour);
        }

        for booking in bookings {
            index.insert_booking(booking);
        }

        for favorite in favorites {
            index.insert_favorite(favorite);
        }

        for review in reviews {
            index.insert_review(review);
        }

        index.refresh_rating_stats();
        index.validate()?;

        info!("Catalog successfully built and validated");
        Ok(index)
    }

    /// Recompute `ratingsAverage` and `ratingsQuantity` from reviews
    ///
    /// Tours without any review keep their stored statistics. The average is
    /// rounded to one decimal place.
    pub fn refresh_rating_stats(&mut self) {
        let stats: Vec<(TourId, f64, u32)> = self
            .tour_reviews
            .par_iter()
            .filter(|(tour_id, reviews)| !reviews.is_empty() && self.tours.contains_key(*tour_id))
            .map(|(tour_id, reviews)| {
                let total: f64 = reviews.iter().map(|r| r.rating).sum();
                let average = total / reviews.len() as f64;
                (tour_id.clone(), round_to_tenth(average), reviews.len() as u32)
            })
            .collect();

        for (tour_id, average, quantity) in stats {
            if let Some(tour) = self.tours.get_mut(&tour_id) {
                tour.ratings_average = average;
                tour.ratings_quantity = quantity;
            }
        }
    }

    /// Validate data integrity
    ///
    /// Checks that:
    /// - tour prices are finite and non-negative
    /// - tour rating averages lie in 1.0 - 5.0
    /// - review ratings lie in 1.0 - 5.0
    ///
    /// Interactions referencing unknown tours are allowed; they resolve to
    /// `None` at query time.
    pub fn validate(&self) -> Result<()> {
        for tour in self.tours() {
            if !tour.price.is_finite() || tour.price < 0.0 {
                return Err(invalid("tour", &tour.id, "price", tour.price));
            }
            if !(1.0..=5.0).contains(&tour.ratings_average) {
                return Err(invalid("tour", &tour.id, "ratingsAverage", tour.ratings_average));
            }
        }

        for reviews in self.user_reviews.values() {
            for review in reviews {
                if !(1.0..=5.0).contains(&review.rating) {
                    return Err(invalid("review", &review.id, "rating", review.rating));
                }
            }
        }
        Ok(())
    }
}

fn invalid(entity: &str, id: &str, field: &str, value: f64) -> CatalogError {
    CatalogError::InvalidValue {
        entity: entity.to_string(),
        id: id.to_string(),
        field: field.to_string(),
        value: value.to_string(),
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
