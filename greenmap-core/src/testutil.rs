//! In-memory [`CityDataSource`] used by orchestrator and controller tests.

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use crate::client::{
    CityDataSource, HEATMAP_ENDPOINT, PROPERTIES_ENDPOINT, RESIDENCES_ENDPOINT,
    REVIEWS_ENDPOINT, TREE_ZONES_ENDPOINT, WEATHER_ENDPOINT,
};
use crate::error::SourceError;
use crate::model::{
    CityQuery, HeatPoint, MutationAck, NewReview, Place, Review, TreeZone, WeatherSnapshot,
};

/// Canned responses plus a call log. Tests keep a handle to the shared
/// state so they can swap fixtures between queries and inspect which
/// endpoints were hit.
#[derive(Debug)]
pub struct FakeState {
    pub weather: WeatherSnapshot,
    pub heat: Vec<HeatPoint>,
    pub reviews: Vec<Review>,
    pub properties: Vec<Place>,
    pub residences: Vec<Place>,
    pub tree_zones: Vec<TreeZone>,
    /// Endpoint labels forced to fail with a network-style error.
    pub fail: BTreeSet<&'static str>,
    pub calls: Vec<String>,
    next_id: u32,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            weather: WeatherSnapshot {
                name: "Nagpur".to_string(),
                temp_c: 30.0,
                description: "clear sky".to_string(),
                coord: None,
            },
            heat: Vec::new(),
            reviews: Vec::new(),
            properties: Vec::new(),
            residences: Vec::new(),
            tree_zones: Vec::new(),
            fail: BTreeSet::new(),
            calls: Vec::new(),
            next_id: 1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FakeSource(Arc<Mutex<FakeState>>);

impl FakeSource {
    pub fn handle(&self) -> Arc<Mutex<FakeState>> {
        Arc::clone(&self.0)
    }

    fn check(
        &self,
        label: &'static str,
        endpoint: &'static str,
        call: String,
    ) -> Result<std::sync::MutexGuard<'_, FakeState>, SourceError> {
        let mut state = self.0.lock().unwrap();
        state.calls.push(call);
        if state.fail.contains(label) {
            return Err(SourceError::Network {
                endpoint,
                detail: "connection refused".to_string(),
            });
        }
        Ok(state)
    }
}

#[async_trait]
impl CityDataSource for FakeSource {
    async fn city_weather(&self, city: &CityQuery) -> Result<WeatherSnapshot, SourceError> {
        let state = self.check("weather", WEATHER_ENDPOINT, format!("weather:{city}"))?;
        Ok(state.weather.clone())
    }

    async fn heatmap(&self, city: &CityQuery) -> Result<Vec<HeatPoint>, SourceError> {
        let state = self.check("heatmap", HEATMAP_ENDPOINT, format!("heatmap:{city}"))?;
        Ok(state.heat.clone())
    }

    async fn reviews(&self, city: &CityQuery) -> Result<Vec<Review>, SourceError> {
        let state = self.check("reviews", REVIEWS_ENDPOINT, format!("reviews:{city}"))?;
        Ok(state.reviews.clone())
    }

    async fn properties(&self, city: &CityQuery) -> Result<Vec<Place>, SourceError> {
        let state = self.check("properties", PROPERTIES_ENDPOINT, format!("properties:{city}"))?;
        Ok(state.properties.clone())
    }

    async fn tree_zones(&self, city: &CityQuery) -> Result<Vec<TreeZone>, SourceError> {
        let state = self.check("tree-zones", TREE_ZONES_ENDPOINT, format!("tree-zones:{city}"))?;
        Ok(state.tree_zones.clone())
    }

    async fn residences(&self, city: &CityQuery) -> Result<Vec<Place>, SourceError> {
        let state = self.check("residences", RESIDENCES_ENDPOINT, format!("residences:{city}"))?;
        Ok(state.residences.clone())
    }

    async fn submit_review(&self, review: &NewReview) -> Result<MutationAck, SourceError> {
        let mut state =
            self.check("submit", REVIEWS_ENDPOINT, format!("submit:{}", review.city))?;
        let id = format!("r{}", state.next_id);
        state.next_id += 1;
        state.reviews.push(Review {
            id,
            text: review.text.clone(),
            rating: review.rating,
        });
        Ok(MutationAck { success: true })
    }

    async fn delete_review(&self, id: &str) -> Result<MutationAck, SourceError> {
        let mut state = self.check("delete", REVIEWS_ENDPOINT, format!("delete:{id}"))?;
        let before = state.reviews.len();
        state.reviews.retain(|r| r.id != id);
        Ok(MutationAck { success: state.reviews.len() < before })
    }
}

pub fn place(name: &str) -> Place {
    Place {
        name: name.to_string(),
        address: "12 Example Road".to_string(),
        lat: 21.14,
        lon: 79.08,
    }
}

pub fn zone(description: &str) -> TreeZone {
    TreeZone { lat: 21.15, lon: 79.09, description: description.to_string() }
}

pub fn review(id: &str, text: &str, rating: i32) -> Review {
    Review { id: id.to_string(), text: text.to_string(), rating }
}
