use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::error::{SourceError, truncate_body};
use crate::model::{
    CityQuery, Coordinate, HeatPoint, MutationAck, NewReview, Place, Review, TreeZone,
    WeatherSnapshot,
};

/// One operation per endpoint. The orchestrator and the review
/// controllers only ever see this trait, so tests can swap in an
/// in-memory source.
#[async_trait]
pub trait CityDataSource: Send + Sync + Debug {
    async fn city_weather(&self, city: &CityQuery) -> Result<WeatherSnapshot, SourceError>;
    async fn heatmap(&self, city: &CityQuery) -> Result<Vec<HeatPoint>, SourceError>;
    async fn reviews(&self, city: &CityQuery) -> Result<Vec<Review>, SourceError>;
    async fn properties(&self, city: &CityQuery) -> Result<Vec<Place>, SourceError>;
    async fn tree_zones(&self, city: &CityQuery) -> Result<Vec<TreeZone>, SourceError>;
    async fn residences(&self, city: &CityQuery) -> Result<Vec<Place>, SourceError>;
    async fn submit_review(&self, review: &NewReview) -> Result<MutationAck, SourceError>;
    async fn delete_review(&self, id: &str) -> Result<MutationAck, SourceError>;
}

pub const WEATHER_ENDPOINT: &str = "/api/city-weather";
pub const HEATMAP_ENDPOINT: &str = "/api/heatmap-data";
pub const REVIEWS_ENDPOINT: &str = "/api/reviews";
pub const PROPERTIES_ENDPOINT: &str = "/api/properties";
pub const TREE_ZONES_ENDPOINT: &str = "/api/tree-zones";
pub const RESIDENCES_ENDPOINT: &str = "/api/residences";

/// HTTP implementation of [`CityDataSource`]. One shared reqwest client,
/// a single attempt per call, no retries and no extra timeout beyond the
/// transport's own.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, http: Client::new() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL addressing one review. Ids are server-assigned and opaque, so
    /// the path segment is percent-encoded.
    fn review_url(&self, id: &str) -> String {
        format!("{}{}/{}", self.base_url, REVIEWS_ENDPOINT, urlencoding::encode(id))
    }

    async fn get_city_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        city: &CityQuery,
    ) -> Result<T, SourceError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let res = self
            .http
            .get(&url)
            .query(&[("city", city.name())])
            .send()
            .await
            .map_err(|e| SourceError::network(endpoint, &e))?;

        read_json(endpoint, res).await
    }
}

/// Status check and parse shared by every call: non-success status or a
/// body that is not the expected JSON both classify as a server failure.
async fn read_json<T: DeserializeOwned>(
    endpoint: &'static str,
    res: reqwest::Response,
) -> Result<T, SourceError> {
    let status = res.status();
    let body = res.text().await.map_err(|e| SourceError::network(endpoint, &e))?;

    if !status.is_success() {
        return Err(SourceError::server(
            endpoint,
            format!("status {}: {}", status, truncate_body(&body)),
        ));
    }

    serde_json::from_str(&body)
        .map_err(|e| SourceError::server(endpoint, format!("bad JSON: {e}")))
}

#[async_trait]
impl CityDataSource for ApiClient {
    async fn city_weather(&self, city: &CityQuery) -> Result<WeatherSnapshot, SourceError> {
        let wire: WeatherWire = self.get_city_json(WEATHER_ENDPOINT, city).await?;
        Ok(wire.into_snapshot())
    }

    async fn heatmap(&self, city: &CityQuery) -> Result<Vec<HeatPoint>, SourceError> {
        self.get_city_json(HEATMAP_ENDPOINT, city).await
    }

    async fn reviews(&self, city: &CityQuery) -> Result<Vec<Review>, SourceError> {
        let wire: Vec<ReviewWire> = self.get_city_json(REVIEWS_ENDPOINT, city).await?;
        Ok(wire.into_iter().map(ReviewWire::into_review).collect())
    }

    async fn properties(&self, city: &CityQuery) -> Result<Vec<Place>, SourceError> {
        self.get_city_json(PROPERTIES_ENDPOINT, city).await
    }

    async fn tree_zones(&self, city: &CityQuery) -> Result<Vec<TreeZone>, SourceError> {
        self.get_city_json(TREE_ZONES_ENDPOINT, city).await
    }

    async fn residences(&self, city: &CityQuery) -> Result<Vec<Place>, SourceError> {
        self.get_city_json(RESIDENCES_ENDPOINT, city).await
    }

    async fn submit_review(&self, review: &NewReview) -> Result<MutationAck, SourceError> {
        let endpoint = REVIEWS_ENDPOINT;
        let url = format!("{}{}", self.base_url, endpoint);

        let res = self
            .http
            .post(&url)
            .json(review)
            .send()
            .await
            .map_err(|e| SourceError::network(endpoint, &e))?;

        read_json(endpoint, res).await
    }

    async fn delete_review(&self, id: &str) -> Result<MutationAck, SourceError> {
        let endpoint = REVIEWS_ENDPOINT;
        let url = self.review_url(id);

        let res = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| SourceError::network(endpoint, &e))?;

        read_json(endpoint, res).await
    }
}

#[derive(Debug, Deserialize)]
struct WeatherWire {
    name: String,
    temp: f64,
    description: String,
    coord: Option<Coordinate>,
}

impl WeatherWire {
    fn into_snapshot(self) -> WeatherSnapshot {
        WeatherSnapshot {
            name: self.name,
            temp_c: self.temp,
            description: self.description,
            coord: self.coord,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReviewWire {
    #[serde(rename = "_id")]
    id: String,
    text: String,
    rating: i32,
}

impl ReviewWire {
    fn into_review(self) -> Review {
        Review { id: self.id, text: self.text, rating: self.rating }
    }
}
