//! The preference profile and its weighted frequency tables.

use crate::duration::DurationCategory;
use catalog::{Difficulty, TourType};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::Display;

/// Accumulated weight per category.
///
/// Lookups of absent keys read as zero. Entries remember the order in which
/// their key was first added; `top` uses it to break ties. Keys are compared
/// by value only, so any string is a valid key.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable<K> {
    entries: Vec<(K, f64)>,
}

impl<K> Default for WeightTable<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq> WeightTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `weight` to the entry for `key`, creating it at zero if needed
    pub fn add(&mut self, key: K, weight: f64) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, total)) => *total += weight,
            None => self.entries.push((key, weight)),
        }
    }

    /// Weight for `key`, zero if absent
    pub fn get<Q>(&self, key: &Q) -> f64
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.entries
            .iter()
            .find(|(existing, _)| <K as Borrow<Q>>::borrow(existing) == key)
            .map(|(_, weight)| *weight)
            .unwrap_or(0.0)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.entries.iter().any(|(existing, _)| <K as Borrow<Q>>::borrow(existing) == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> + '_ {
        self.entries.iter().map(|(key, weight)| (key, *weight))
    }
}

impl<K: PartialEq + Clone> WeightTable<K> {
    /// The `n` heaviest keys, heaviest first; ties keep first-insertion order
    pub fn top(&self, n: usize) -> Vec<K> {
        let mut ranked: Vec<&(K, f64)> = self.entries.iter().collect();
        // sort_by is stable, so equal weights stay in insertion order
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked.into_iter().take(n).map(|(key, _)| key.clone()).collect()
    }
}

impl<K: Display> Serialize for WeightTable<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, weight) in &self.entries {
            map.serialize_entry(&key.to_string(), weight)?;
        }
        map.end()
    }
}

/// Preferred price band
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
    pub preferred: f64,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 1000.0,
            preferred: 0.0,
        }
    }
}

/// A user's implicit taste, derived from their interaction history.
///
/// Built fresh for every request and dropped with the response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceProfile {
    pub tour_types: WeightTable<TourType>,
    pub difficulties: WeightTable<Difficulty>,
    pub durations: WeightTable<DurationCategory>,
    pub locations: WeightTable<String>,
    pub price_range: PriceRange,
    /// Mean of the user's own review ratings, 0 without reviews
    pub average_rating: f64,
    /// Sum of every applied interaction weight
    pub total_interactions: f64,
}

impl PreferenceProfile {
    /// True when no interaction contributed any weight
    pub fn is_empty(&self) -> bool {
        self.total_interactions <= 0.0
    }
}
