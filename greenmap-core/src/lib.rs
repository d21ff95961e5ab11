//! Core library for the `greenmap` city dashboard.
//!
//! This crate defines:
//! - Configuration handling
//! - The typed client for the city data API
//! - Map-layer and dashboard render state
//! - The city-query orchestrator and the review controllers
//!
//! It is used by `greenmap-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod map;
pub mod model;
pub mod orchestrator;
pub mod reviews;

#[cfg(test)]
pub(crate) mod testutil;

pub use client::{ApiClient, CityDataSource};
pub use config::Config;
pub use dashboard::{Dashboard, Notice, Severity};
pub use error::{SourceError, ValidationError};
pub use map::{MapSurface, Marker, MarkerLayer};
pub use model::{
    CityQuery, Coordinate, HeatPoint, NewReview, Place, Review, TreeZone, WeatherSnapshot,
};
pub use orchestrator::CityQueryOrchestrator;
pub use reviews::{ReviewListController, ReviewSubmissionController};
