//! Parser for catalog data files.
//!
//! A catalog directory holds one JSON array per collection:
//! - tours.json (required)
//! - bookings.json, favorites.json, reviews.json (optional, missing = empty)

use crate::error::{CatalogError, Result};
use crate::types::*;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

pub const TOURS_FILE: &str = "tours.json";
pub const BOOKINGS_FILE: &str = "bookings.json";
pub const FAVORITES_FILE: &str = "favorites.json";
pub const REVIEWS_FILE: &str = "reviews.json";

/// Decode a JSON array of records from `path`.
///
/// When `required` is false a missing file yields an empty collection.
fn read_collection<T: DeserializeOwned>(path: &Path, required: bool) -> Result<Vec<T>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            if required {
                return Err(CatalogError::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    serde_json::from_reader(BufReader::new(file)).map_err(|source| CatalogError::ParseError {
        file: file_name,
        source,
    })
}

/// Parse the tours file
pub fn parse_tours(path: &Path) -> Result<Vec<Tour>> {
    read_collection(path, true)
}

/// Parse the bookings file
pub fn parse_bookings(path: &Path) -> Result<Vec<Booking>> {
    read_collection(path, false)
}

/// Parse the favorites file
pub fn parse_favorites(path: &Path) -> Result<Vec<Favorite>> {
    read_collection(path, false)
}

/// Parse the reviews file
pub fn parse_reviews(path: &Path) -> Result<Vec<Review>> {
    read_collection(path, false)
}
