use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A validated city name. Construction trims the input and rejects
/// blank strings, so every pipeline can assume a usable query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityQuery {
    name: String,
}

impl CityQuery {
    pub fn new(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCity);
        }
        Ok(Self { name: trimmed.to_string() })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for CityQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// Current weather for a city. `coord` is optional on the wire; when the
/// server omits it the map view stays where it is.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub name: String,
    pub temp_c: f64,
    pub description: String,
    pub coord: Option<Coordinate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct HeatPoint {
    pub lat: f64,
    pub lon: f64,
    pub intensity: f64,
}

/// A named location with an address. Properties and residences share
/// this shape and the same marker layer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Place {
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TreeZone {
    pub lat: f64,
    pub lon: f64,
    pub description: String,
}

/// A server-owned review. The id is assigned by the server and is the
/// only handle for deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: String,
    pub text: String,
    pub rating: i32,
}

/// Body of a review submission.
#[derive(Debug, Clone, Serialize)]
pub struct NewReview {
    pub city: String,
    pub text: String,
    pub rating: i32,
}

/// Server acknowledgement for review create/delete.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MutationAck {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_query_trims_input() {
        let city = CityQuery::new("  Nagpur  ").expect("non-empty after trim");
        assert_eq!(city.name(), "Nagpur");
    }

    #[test]
    fn city_query_rejects_blank_input() {
        assert_eq!(CityQuery::new("").unwrap_err(), ValidationError::EmptyCity);
        assert_eq!(CityQuery::new("   ").unwrap_err(), ValidationError::EmptyCity);
    }
}
