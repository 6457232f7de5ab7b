//! Query vocabulary understood by tour stores.
//!
//! A `TourQuery` is a filter, a sort order and a result limit. Stores
//! evaluate it however suits them; `CatalogIndex` evaluates it in memory
//! with `TourFilter::matches` and `TourSort::compare`.

use crate::types::{Difficulty, Tour, TourId, TourType};
use std::cmp::Ordering;
use std::collections::HashSet;

/// One alternative of an any-of clause
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    /// Tour type is one of the listed values (an empty list matches nothing)
    TypeIn(Vec<TourType>),
    /// Difficulty is one of the listed values (an empty list matches nothing)
    DifficultyIn(Vec<Difficulty>),
    /// Price lies in the closed range `[min, max]`
    PriceBetween { min: f64, max: f64 },
}

impl Criterion {
    pub fn matches(&self, tour: &Tour) -> bool {
        match self {
            Criterion::TypeIn(types) => types.contains(&tour.tour_type),
            Criterion::DifficultyIn(difficulties) => difficulties.contains(&tour.difficulty),
            Criterion::PriceBetween { min, max } => tour.price >= *min && tour.price <= *max,
        }
    }
}

/// Conjunction of: id exclusion, an any-of clause and a rating floor.
///
/// An empty any-of clause places no constraint on the tour.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TourFilter {
    pub excluded_ids: HashSet<TourId>,
    pub any_of: Vec<Criterion>,
    pub min_rating: Option<f64>,
}

impl TourFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude the given tour ids (builder pattern)
    pub fn excluding<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = TourId>,
    {
        self.excluded_ids.extend(ids);
        self
    }

    /// Add an alternative to the any-of clause
    pub fn or_matching(mut self, criterion: Criterion) -> Self {
        self.any_of.push(criterion);
        self
    }

    /// Require `ratingsAverage >= min_rating`
    pub fn with_min_rating(mut self, min_rating: f64) -> Self {
        self.min_rating = Some(min_rating);
        self
    }

    pub fn matches(&self, tour: &Tour) -> bool {
        if self.excluded_ids.contains(&tour.id) {
            return false;
        }
        if let Some(floor) = self.min_rating {
            if tour.ratings_average < floor {
                return false;
            }
        }
        self.any_of.is_empty() || self.any_of.iter().any(|c| c.matches(tour))
    }
}

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TourSort {
    /// Keep store order
    #[default]
    Unsorted,
    /// `ratingsAverage` descending
    RatingDesc,
    /// `ratingsQuantity` descending, then `ratingsAverage` descending
    PopularityDesc,
}

impl TourSort {
    pub fn compare(&self, a: &Tour, b: &Tour) -> Ordering {
        match self {
            TourSort::Unsorted => Ordering::Equal,
            TourSort::RatingDesc => cmp_desc(a.ratings_average, b.ratings_average),
            TourSort::PopularityDesc => b
                .ratings_quantity
                .cmp(&a.ratings_quantity)
                .then_with(|| cmp_desc(a.ratings_average, b.ratings_average)),
        }
    }
}

fn cmp_desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// A complete catalog query
#[derive(Debug, Clone, PartialEq)]
pub struct TourQuery {
    pub filter: TourFilter,
    pub sort: TourSort,
    pub limit: usize,
}

impl TourQuery {
    pub fn new(filter: TourFilter, sort: TourSort, limit: usize) -> Self {
        Self {
            filter,
            sort,
            limit,
        }
    }
}
