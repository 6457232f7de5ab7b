//! # Catalog Crate
//!
//! This crate holds the tour catalog and the interaction history the
//! recommendation engine learns from.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Tour, Booking, Favorite, Review, CatalogIndex)
//! - **query**: The filter/sort/limit vocabulary understood by tour stores
//! - **store**: Read interfaces consumed by the engine, implemented by CatalogIndex
//! - **parser**: Parse the JSON collections of a catalog directory
//! - **index**: Build, refresh and validate a CatalogIndex
//! - **error**: Error types for loading and for store reads
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::CatalogIndex;
//! use std::path::Path;
//!
//! let index = CatalogIndex::load_from_dir(Path::new("data/sample"))?;
//!
//! let tour = index.get_tour("5c88fa8cf4afda39709c2955").unwrap();
//! let bookings = index.get_user_bookings("5c8a1d5b0190b214360dc057");
//!
//! println!("{} has {} bookings", tour.name, bookings.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod query;
pub mod store;
pub mod parser;
pub mod index;
pub mod search;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result, StoreError};
pub use query::{Criterion, TourFilter, TourQuery, TourSort};
pub use store::{InteractionStore, TourStore};
pub use types::{
    // Type aliases
    TourId,
    UserId,
    // Core types
    Booking,
    CatalogIndex,
    Favorite,
    Interaction,
    Location,
    Review,
    ReviewInteraction,
    Tour,
    // Enums
    Difficulty,
    TourType,
};
