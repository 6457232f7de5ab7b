//! Core domain types for the tour catalog.
//!
//! This module defines the records stored in the catalog (tours, bookings,
//! favorites, reviews), the resolved interaction records handed to the
//! recommendation engine, and `CatalogIndex`, the in-memory document store.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user (opaque document id)
pub type UserId = String;

/// Unique identifier for a tour (opaque document id)
pub type TourId = String;

// =============================================================================
// Tour-related Types
// =============================================================================

/// How a tour gets around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TourType {
    Walking,
    Bus,
    Bike,
}

/// Physical difficulty of a tour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Moderate,
    Difficult,
}

impl TourType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TourType::Walking => "walking",
            TourType::Bus => "bus",
            TourType::Bike => "bike",
        }
    }
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Moderate => "moderate",
            Difficulty::Difficult => "difficult",
        }
    }
}

impl fmt::Display for TourType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a tour starts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_ratings_average() -> f64 {
    4.5
}

/// A tour in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    pub id: TourId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(rename = "type")]
    pub tour_type: TourType,
    pub difficulty: Difficulty,
    /// Length of the tour in minutes
    pub duration: u32,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_location: Option<Location>,
    #[serde(default = "default_ratings_average")]
    pub ratings_average: f64,
    #[serde(default)]
    pub ratings_quantity: u32,
}

impl Tour {
    /// Create a tour with default rating statistics and no start location
    pub fn new(
        id: impl Into<TourId>,
        name: impl Into<String>,
        tour_type: TourType,
        difficulty: Difficulty,
        duration: u32,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            summary: None,
            tour_type,
            difficulty,
            duration,
            price,
            start_location: None,
            ratings_average: default_ratings_average(),
            ratings_quantity: 0,
        }
    }

    /// Set the rating statistics (builder style)
    pub fn with_ratings(mut self, average: f64, quantity: u32) -> Self {
        self.ratings_average = average;
        self.ratings_quantity = quantity;
        self
    }

    /// Set the start address (builder style)
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.start_location
            .get_or_insert_with(Location::default)
            .address = Some(address.into());
        self
    }

    /// The start address, if the tour has a non-empty one
    pub fn start_address(&self) -> Option<&str> {
        self.start_location
            .as_ref()
            .and_then(|location| location.address.as_deref())
            .filter(|address| !address.is_empty())
    }
}

// =============================================================================
// Stored Interaction Records
// =============================================================================

/// A booking as stored in the catalog. `tour` may point at a deleted tour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user: UserId,
    pub tour: TourId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A tour a user marked as favorite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: String,
    pub user: UserId,
    pub tour: TourId,
}

/// A user's review of a tour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub user: UserId,
    pub tour: TourId,
    /// Rating value from 1.0 to 5.0
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}

// =============================================================================
// Resolved Interactions
// =============================================================================

/// A booking or favorite with its tour resolved.
///
/// `tour` is `None` when the referenced tour no longer exists.
#[derive(Debug, Clone, PartialEq)]
pub struct Interaction {
    pub tour: Option<Tour>,
}

impl Interaction {
    pub fn new(tour: Option<Tour>) -> Self {
        Self { tour }
    }
}

/// A review with its tour resolved. The rating is kept even if the tour is gone.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewInteraction {
    pub rating: f64,
    pub tour: Option<Tour>,
}

impl ReviewInteraction {
    pub fn new(rating: f64, tour: Option<Tour>) -> Self {
        Self { rating, tour }
    }
}

// =============================================================================
// CatalogIndex - The In-Memory Document Store
// =============================================================================

/// Holds every tour and interaction record, indexed for per-user lookups.
///
/// Tours keep their insertion order so that queries with tied sort keys
/// return results in a stable, catalog-defined order.
#[derive(Debug, Default)]
pub struct CatalogIndex {
    // Primary data stores
    pub(crate) tours: HashMap<TourId, Tour>,
    pub(crate) tour_order: Vec<TourId>,

    // Interaction indices
    pub(crate) user_bookings: HashMap<UserId, Vec<Booking>>,
    pub(crate) user_favorites: HashMap<UserId, Vec<Favorite>>,
    pub(crate) user_reviews: HashMap<UserId, Vec<Review>>,
    /// All reviews received by each tour
    pub(crate) tour_reviews: HashMap<TourId, Vec<Review>>,
}

impl CatalogIndex {
    /// Creates a new, empty CatalogIndex
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a tour by ID
    pub fn get_tour(&self, id: &str) -> Option<&Tour> {
        self.tours.get(id)
    }

    /// All tours in catalog order
    pub fn tours(&self) -> impl Iterator<Item = &Tour> + '_ {
        self.tour_order.iter().filter_map(|id| self.tours.get(id))
    }

    /// Get all bookings made by a user
    ///
    /// Returns an empty slice if the user has no bookings
    pub fn get_user_bookings(&self, user_id: &str) -> &[Booking] {
        self.user_bookings
            .get(user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get all favorites of a user
    pub fn get_user_favorites(&self, user_id: &str) -> &[Favorite] {
        self.user_favorites
            .get(user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get all reviews written by a user
    pub fn get_user_reviews(&self, user_id: &str) -> &[Review] {
        self.user_reviews
            .get(user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Get all reviews of a tour
    pub fn get_tour_reviews(&self, tour_id: &str) -> &[Review] {
        self.tour_reviews
            .get(tour_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Every user with at least one interaction, sorted
    pub fn user_ids(&self) -> Vec<UserId> {
        let users: BTreeSet<&UserId> = self
            .user_bookings
            .keys()
            .chain(self.user_favorites.keys())
            .chain(self.user_reviews.keys())
            .collect();
        users.into_iter().cloned().collect()
    }

    // Mutators used during loading and in tests

    /// Insert a tour. Re-inserting an existing id replaces it in place.
    pub fn insert_tour(&mut self, tour: Tour) {
        if !self.tours.contains_key(&tour.id) {
            self.tour_order.push(tour.id.clone());
        }
        self.tours.insert(tour.id.clone(), tour);
    }

    /// Remove a tour, leaving interactions that reference it dangling
    pub fn remove_tour(&mut self, id: &str) -> Option<Tour> {
        let removed = self.tours.remove(id)?;
        self.tour_order.retain(|existing| existing != id);
        Some(removed)
    }

    pub fn insert_booking(&mut self, booking: Booking) {
        self.user_bookings
            .entry(booking.user.clone())
            .or_default()
            .push(booking);
    }

    pub fn insert_favorite(&mut self, favorite: Favorite) {
        self.user_favorites
            .entry(favorite.user.clone())
            .or_default()
            .push(favorite);
    }

    /// Insert a review and update both user and tour indices
    pub fn insert_review(&mut self, review: Review) {
        self.tour_reviews
            .entry(review.tour.clone())
            .or_default()
            .push(review.clone());

        self.user_reviews
            .entry(review.user.clone())
            .or_default()
            .push(review);
    }

    /// Get counts for debugging/validation: (tours, bookings, favorites, reviews)
    pub fn counts(&self) -> (usize, usize, usize, usize) {
        let bookings = self.user_bookings.values().map(|v| v.len()).sum();
        let favorites = self.user_favorites.values().map(|v| v.len()).sum();
        let reviews = self.user_reviews.values().map(|v| v.len()).sum();
        (self.tours.len(), bookings, favorites, reviews)
    }
}
