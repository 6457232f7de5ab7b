//! # Sources Crate
//!
//! This crate turns a user's interaction history into tour candidates.
//!
//! ## Components
//!
//! ### Preference Profile
//! Weighted tallies of what the user engaged with:
//! - Bookings weigh 3, favorites 2, reviews 2/1/0 depending on the rating
//! - Tour type, difficulty, duration bucket and start location
//! - Weighted preferred price with a ±30% band
//!
//! ### Personalized Source
//! Queries the catalog for tours matching the user's top types OR top
//! difficulties OR price band, above a rating floor, minus booked tours.
//!
//! ### Popular Source
//! Well-rated tours by rating count; the fallback for anonymous users.
//!
//! ### Similar Source
//! Tours resembling a reference tour by type, difficulty or price.
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{CatalogIndex, InteractionStore};
//! use sources::{build_profile, PersonalizedSource};
//! use std::sync::Arc;
//!
//! let index = Arc::new(CatalogIndex::load_from_dir(Path::new("data/sample"))?);
//!
//! let bookings = index.find_bookings_by_user(&user_id).await?;
//! let favorites = index.find_favorites_by_user(&user_id).await?;
//! let reviews = index.find_reviews_by_user(&user_id).await?;
//! let booked = index.find_distinct_booked_tour_ids(&user_id).await?;
//!
//! let profile = build_profile(&bookings, &favorites, &reviews);
//! let source = PersonalizedSource::new(index.clone());
//! let candidates = source.get_candidates(&profile, &booked, 10).await?;
//! ```

// Public modules
pub mod duration;
pub mod profile;
pub mod accumulator;
pub mod query_builder;
pub mod personalized;
pub mod popular;
pub mod similar;
pub mod error;

// Re-export commonly used types
pub use accumulator::{build_profile, InteractionWeights, ProfileAccumulator};
pub use duration::{categorize, DurationCategory};
pub use error::SourceError;
pub use personalized::PersonalizedSource;
pub use popular::PopularSource;
pub use profile::{PreferenceProfile, PriceRange, WeightTable};
pub use query_builder::{build_query, CandidateQueryBuilder};
pub use similar::SimilarSource;
