//! Engine configuration.
//!
//! Every field has a default, so an empty or missing file yields the stock
//! engine. Values are read from TOML and validated before use:
//!
//! ```toml
//! rating_floor_cap = 4.0
//!
//! [limits]
//! personalized = 10
//!
//! [weights]
//! booking = 4.0
//! ```

use serde::Deserialize;
use sources::InteractionWeights;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "tour-recs.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

/// Default result counts per operation
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    pub personalized: usize,
    pub popular: usize,
    pub similar: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            personalized: 5,
            popular: 5,
            similar: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub limits: Limits,
    /// Minimum `ratingsAverage` of a popular tour
    pub popular_min_rating: f64,
    /// Cap on the rating floor derived from the user's own reviews
    pub rating_floor_cap: f64,
    /// Number of top types and top difficulties used for candidates
    pub top_preferences: usize,
    /// Price band half-width, as a fraction, for profiles and similar tours
    pub price_band: f64,
    /// Dollars of price distance per lost price-score point
    pub price_decay: f64,
    pub max_price_score: f64,
    pub weights: InteractionWeights,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            popular_min_rating: 4.0,
            rating_floor_cap: 4.0,
            top_preferences: 2,
            price_band: 0.3,
            price_decay: 20.0,
            max_price_score: 5.0,
            weights: InteractionWeights::default(),
        }
    }
}

impl EngineConfig {
    /// Load from `path`, or from `tour-recs.toml` if present, or defaults.
    ///
    /// An explicit path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = match path {
            Some(path) if path.exists() => Some(path.to_path_buf()),
            Some(path) => return Err(ConfigError::MissingConfigFile(path.to_path_buf())),
            None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
        };

        let config = match resolved {
            Some(path) => read_config(&path)?,
            None => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse TOML text without touching the filesystem
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|source| ConfigError::ParseFile {
            path: PathBuf::from("<inline>"),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.personalized == 0 || self.limits.popular == 0 || self.limits.similar == 0 {
            return Err(ConfigError::Validation(
                "limits must be greater than zero".to_string(),
            ));
        }

        if self.top_preferences == 0 {
            return Err(ConfigError::Validation(
                "top_preferences must be greater than zero".to_string(),
            ));
        }

        if !(0.0..1.0).contains(&self.price_band) {
            return Err(ConfigError::Validation(format!(
                "price_band must be in [0, 1), got {}",
                self.price_band
            )));
        }

        if !(self.price_decay > 0.0) {
            return Err(ConfigError::Validation(
                "price_decay must be greater than zero".to_string(),
            ));
        }

        if !(self.max_price_score >= 0.0) {
            return Err(ConfigError::Validation(
                "max_price_score must not be negative".to_string(),
            ));
        }

        for (name, rating) in [
            ("popular_min_rating", self.popular_min_rating),
            ("rating_floor_cap", self.rating_floor_cap),
        ] {
            if !(0.0..=5.0).contains(&rating) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be in [0, 5], got {rating}"
                )));
            }
        }

        let weights = &self.weights;
        let all_weights = [
            weights.booking,
            weights.favorite,
            weights.positive_review,
            weights.neutral_review,
        ];
        if all_weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfigError::Validation(
                "interaction weights must be finite and non-negative".to_string(),
            ));
        }

        Ok(())
    }
}

fn read_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str::<EngineConfig>(&raw).map_err(|source| ConfigError::ParseFile {
        path: path.to_path_buf(),
        source,
    })
}
