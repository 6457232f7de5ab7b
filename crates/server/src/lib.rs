//! Server crate for the tour recommendation engine.
//!
//! This crate contains the service that coordinates all components of the
//! recommendation pipeline, its configuration and its error type.

pub mod config;
pub mod error;
pub mod service;

pub use config::{ConfigError, EngineConfig, Limits};
pub use error::{RecommendationError, Result};
pub use service::RecommendationService;
