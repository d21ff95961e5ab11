use crate::model::{Coordinate, HeatPoint};

/// Zoom used whenever a query recenters the view.
pub const CITY_ZOOM: u8 = 12;

/// Nagpur, the view shown before the first query.
pub const DEFAULT_CENTER: Coordinate = Coordinate { lat: 21.1458, lon: 79.0882 };

/// Identifies one of the two marker layers. Properties and residences
/// share [`MarkerLayer::Properties`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerLayer {
    Properties,
    TreeZones,
}

/// A point marker with its popup text.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub lat: f64,
    pub lon: f64,
    pub popup: String,
}

/// The map viewport plus its persistent render targets: one heat overlay
/// and one marker set per [`MarkerLayer`]. This is a rendering sink only;
/// no operation on it can fail, and every mutation is a full replacement
/// so stale content from an earlier query never survives.
#[derive(Debug)]
pub struct MapSurface {
    center: Coordinate,
    zoom: u8,
    heat: Vec<HeatPoint>,
    properties: Vec<Marker>,
    tree_zones: Vec<Marker>,
}

impl MapSurface {
    pub fn new() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: CITY_ZOOM,
            heat: Vec::new(),
            properties: Vec::new(),
            tree_zones: Vec::new(),
        }
    }

    pub fn recenter(&mut self, center: Coordinate, zoom: u8) {
        self.center = center;
        self.zoom = zoom;
    }

    /// Replaces the entire heat overlay. Idempotent; the first call
    /// creates the overlay, later calls swap its points in place.
    pub fn set_heat_points(&mut self, points: Vec<HeatPoint>) {
        self.heat = points;
    }

    /// Atomically clears whatever was under `layer` and installs the new
    /// marker set.
    pub fn replace_markers(&mut self, layer: MarkerLayer, markers: Vec<Marker>) {
        *self.layer_mut(layer) = markers;
    }

    fn layer_mut(&mut self, layer: MarkerLayer) -> &mut Vec<Marker> {
        match layer {
            MarkerLayer::Properties => &mut self.properties,
            MarkerLayer::TreeZones => &mut self.tree_zones,
        }
    }

    pub fn center(&self) -> Coordinate {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn heat_points(&self) -> &[HeatPoint] {
        &self.heat
    }

    pub fn markers(&self, layer: MarkerLayer) -> &[Marker] {
        match layer {
            MarkerLayer::Properties => &self.properties,
            MarkerLayer::TreeZones => &self.tree_zones,
        }
    }
}

impl Default for MapSurface {
    fn default() -> Self {
        Self::new()
    }
}
