use crate::client::CityDataSource;
use crate::dashboard::{Dashboard, Notice};
use crate::error::{SourceError, ValidationError};
use crate::map::{CITY_ZOOM, MapSurface, Marker, MarkerLayer};
use crate::model::{CityQuery, HeatPoint, Place, Review, TreeZone, WeatherSnapshot};

/// Fans a city query out to the independent data-source pipelines and
/// applies each result to exactly one map layer or dashboard region.
///
/// A pipeline that fails posts a notice and never blocks the others. The
/// fetches run concurrently; the render step for each settled pipeline is
/// applied afterwards, so every target is written at most once per query
/// and a query in progress can never be interleaved with a newer one.
#[derive(Debug)]
pub struct CityQueryOrchestrator {
    source: Box<dyn CityDataSource>,
    pub map: MapSurface,
    pub dashboard: Dashboard,
    current_city: Option<CityQuery>,
}

impl CityQueryOrchestrator {
    pub fn new(source: Box<dyn CityDataSource>) -> Self {
        Self {
            source,
            map: MapSurface::new(),
            dashboard: Dashboard::default(),
            current_city: None,
        }
    }

    pub fn source(&self) -> &dyn CityDataSource {
        self.source.as_ref()
    }

    /// The city most recently queried, if any.
    pub fn current_city(&self) -> Option<&CityQuery> {
        self.current_city.as_ref()
    }

    /// Runs all six pipelines for `city`. Rejects a blank city before any
    /// network activity. Returns `Ok(())` once every pipeline has either
    /// rendered or posted its failure notice; there is no aggregate
    /// success or failure.
    pub async fn run_query(&mut self, city: &str) -> Result<(), ValidationError> {
        let city = CityQuery::new(city)?;
        log::debug!("running full query for {city}");

        let (weather, heat, reviews, properties, tree_zones, residences) = tokio::join!(
            self.source.city_weather(&city),
            self.source.heatmap(&city),
            self.source.reviews(&city),
            self.source.properties(&city),
            self.source.tree_zones(&city),
            self.source.residences(&city),
        );

        self.apply_weather(weather);
        self.apply_heat(heat);
        self.apply_reviews(reviews);
        self.apply_places(properties, Some(residences));
        self.apply_tree_zones(tree_zones);

        self.current_city = Some(city);
        Ok(())
    }

    /// The partial refresh used after a review mutation: weather, heatmap,
    /// reviews and properties only. Tree zones and the residence list are
    /// left as they are; residence markers drop off the shared layer until
    /// the next full query.
    pub async fn refresh_after_review_change(
        &mut self,
        city: &str,
    ) -> Result<(), ValidationError> {
        let city = CityQuery::new(city)?;
        log::debug!("refreshing city data for {city} after review change");

        let (weather, heat, reviews, properties) = tokio::join!(
            self.source.city_weather(&city),
            self.source.heatmap(&city),
            self.source.reviews(&city),
            self.source.properties(&city),
        );

        self.apply_weather(weather);
        self.apply_heat(heat);
        self.apply_reviews(reviews);
        self.apply_places(properties, None);

        self.current_city = Some(city);
        Ok(())
    }

    fn apply_weather(&mut self, result: Result<WeatherSnapshot, SourceError>) {
        match result {
            Ok(weather) => {
                self.dashboard.city_line = Some(format!("City: {}", weather.name));
                self.dashboard.weather_line = Some(format!(
                    "Temperature: {} °C, {}",
                    weather.temp_c, weather.description
                ));
                // No coordinate in the response leaves the view unchanged.
                if let Some(coord) = weather.coord {
                    self.map.recenter(coord, CITY_ZOOM);
                }
            }
            Err(err) => self.report("weather", "Failed to get weather data.", &err),
        }
    }

    fn apply_heat(&mut self, result: Result<Vec<HeatPoint>, SourceError>) {
        match result {
            Ok(points) => self.map.set_heat_points(points),
            Err(err) => self.report("heatmap", "Failed to get heatmap data.", &err),
        }
    }

    fn apply_reviews(&mut self, result: Result<Vec<Review>, SourceError>) {
        match result {
            Ok(reviews) => self.dashboard.reviews = reviews,
            Err(err) => self.report("reviews", "Failed to get reviews.", &err),
        }
    }

    /// Properties and residences share one marker layer. The layer is
    /// replaced with whatever the settled sources produced; if every
    /// contributing source failed it keeps its last-good content.
    fn apply_places(
        &mut self,
        properties: Result<Vec<Place>, SourceError>,
        residences: Option<Result<Vec<Place>, SourceError>>,
    ) {
        let mut markers: Option<Vec<Marker>> = None;

        match properties {
            Ok(places) => {
                markers.get_or_insert_with(Vec::new).extend(places.iter().map(place_marker));
            }
            Err(err) => self.report("properties", "Failed to fetch properties.", &err),
        }

        if let Some(residences) = residences {
            match residences {
                Ok(places) => {
                    markers.get_or_insert_with(Vec::new).extend(places.iter().map(place_marker));
                    // The textual list is rebuilt in server order.
                    self.dashboard.residences = places
                        .iter()
                        .map(|p| format!("{} - {}", p.name, p.address))
                        .collect();
                }
                Err(err) => self.report("residences", "Failed to fetch residences.", &err),
            }
        }

        if let Some(markers) = markers {
            self.map.replace_markers(MarkerLayer::Properties, markers);
        }
    }

    fn apply_tree_zones(&mut self, result: Result<Vec<TreeZone>, SourceError>) {
        match result {
            Ok(zones) => {
                let markers = zones
                    .iter()
                    .map(|z| Marker {
                        lat: z.lat,
                        lon: z.lon,
                        popup: format!("Tree planting zone: {}", z.description),
                    })
                    .collect();
                self.map.replace_markers(MarkerLayer::TreeZones, markers);
            }
            Err(err) => self.report("tree-zones", "Failed to fetch tree zones.", &err),
        }
    }

    fn report(&mut self, region: &'static str, message: &str, err: &SourceError) {
        log::warn!("{region} pipeline failed: {err}");
        self.dashboard.push_notice(Notice::error(region, message));
    }
}

fn place_marker(place: &Place) -> Marker {
    Marker {
        lat: place.lat,
        lon: place.lon,
        popup: format!("{} - {}", place.name, place.address),
    }
}
