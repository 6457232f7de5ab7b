//! Case-insensitive tour search by name.

use crate::types::{CatalogIndex, Tour};
use std::cmp::Ordering;

impl CatalogIndex {
    /// Find tours whose name contains `term`, ignoring case.
    ///
    /// Exact name matches come first, then substring matches; each group is
    /// ordered by `ratingsAverage` descending.
    pub fn search_by_name(&self, term: &str) -> Vec<&Tour> {
        let needle = term.to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        // (rank, tour): rank 0 = exact match, 1 = substring match
        let mut matches: Vec<(u8, &Tour)> = self
            .tours()
            .filter_map(|tour| {
                let name = tour.name.to_lowercase();
                if name == needle {
                    Some((0, tour))
                } else if name.contains(&needle) {
                    Some((1, tour))
                } else {
                    None
                }
            })
            .collect();

        matches.sort_by(|a, b| {
            a.0.cmp(&b.0).then_with(|| {
                b.1.ratings_average
                    .partial_cmp(&a.1.ratings_average)
                    .unwrap_or(Ordering::Equal)
            })
        });

        matches.into_iter().map(|(_, tour)| tour).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{CatalogIndex, Difficulty, Tour, TourType};

    #[test]
    fn test_exact_match_ranks_first() {
        let mut index = CatalogIndex::new();
        index.insert_tour(
            Tour::new("1", "The Sea Explorer", TourType::Bike, Difficulty::Easy, 60, 10.0)
                .with_ratings(4.9, 1),
        );
        index.insert_tour(
            Tour::new("2", "Sea Explorer", TourType::Bike, Difficulty::Easy, 60, 10.0)
                .with_ratings(3.0, 1),
        );
        index.insert_tour(Tour::new("3", "Forest Hiker", TourType::Walking, Difficulty::Easy, 60, 10.0));

        let results = index.search_by_name("sea explorer");
        let ids: Vec<&str> = results.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn test_empty_term_matches_nothing() {
        let mut index = CatalogIndex::new();
        index.insert_tour(Tour::new("1", "Anything", TourType::Bus, Difficulty::Easy, 60, 10.0));
        assert!(index.search_by_name("").is_empty());
    }
}
