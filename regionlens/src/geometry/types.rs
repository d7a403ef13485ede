//! Geometry type definitions

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Valid latitude range (WGS84)
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range (WGS84)
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// A geographic position in WGS84 degrees.
///
/// Positions are captured once (from the device, a geocoder, or a feature
/// vertex) and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Longitude in degrees, east positive
    pub longitude: f64,
    /// Latitude in degrees, north positive
    pub latitude: f64,
}

impl Position {
    /// Create a position from longitude/latitude (GeoJSON axis order).
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Returns true when both coordinates are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.longitude.is_finite() && self.latitude.is_finite()
    }

    /// Returns true when the position lies within WGS84 bounds.
    pub fn is_valid(&self) -> bool {
        self.is_finite()
            && (MIN_LON..=MAX_LON).contains(&self.longitude)
            && (MIN_LAT..=MAX_LAT).contains(&self.latitude)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.longitude, self.latitude)
    }
}

/// A closed sequence of vertices.
///
/// The closing vertex may or may not repeat the first one; both forms are
/// accepted by the matcher.
pub type Ring = Vec<Position>;

/// A polygon: one exterior ring plus zero or more hole rings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub exterior: Ring,
    pub holes: Vec<Ring>,
}

impl Polygon {
    pub fn new(exterior: Ring, holes: Vec<Ring>) -> Self {
        Self { exterior, holes }
    }

    /// Polygon without holes.
    pub fn simple(exterior: Ring) -> Self {
        Self {
            exterior,
            holes: Vec::new(),
        }
    }
}

/// Area geometry of a region feature.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionGeometry {
    Polygon(Polygon),
    MultiPolygon(Vec<Polygon>),
}

impl RegionGeometry {
    /// Iterate over every member polygon.
    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> {
        let slice: &[Polygon] = match self {
            RegionGeometry::Polygon(p) => std::slice::from_ref(p),
            RegionGeometry::MultiPolygon(ps) => ps,
        };
        slice.iter()
    }

    /// Axis-aligned bounding box of all exterior rings.
    ///
    /// Non-finite vertices are ignored. Returns `None` when no finite vertex
    /// exists.
    pub fn bounding_box(&self) -> Option<Viewport> {
        let mut bounds: Option<Viewport> = None;
        for vertex in self
            .polygons()
            .flat_map(|p| p.exterior.iter())
            .filter(|v| v.is_finite())
        {
            match bounds.as_mut() {
                Some(b) => b.extend(*vertex),
                None => bounds = Some(Viewport::from_point(*vertex)),
            }
        }
        bounds
    }
}

/// A region (county, state, district...) as materialized by the rendering
/// engine for one source-layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionFeature {
    pub geometry: RegionGeometry,
    /// Opaque attribute mapping (names, identifiers).
    pub properties: Map<String, Value>,
}

impl RegionFeature {
    pub fn new(geometry: RegionGeometry, properties: Map<String, Value>) -> Self {
        Self {
            geometry,
            properties,
        }
    }

    /// Returns a string property, if present and a string.
    pub fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(Value::as_str)
    }

    /// Bounding box of the feature geometry.
    pub fn bounding_box(&self) -> Option<Viewport> {
        self.geometry.bounding_box()
    }
}

/// Axis-aligned longitude/latitude rectangle used to frame the camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl Viewport {
    pub const fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Build from a `[minLon, minLat, maxLon, maxLat]` slice (GeoJSON `bbox`).
    ///
    /// Returns `None` unless the slice has exactly four finite values with
    /// min <= max on both axes.
    pub fn from_bbox(bbox: &[f64]) -> Option<Self> {
        match bbox {
            [min_lon, min_lat, max_lon, max_lat] => {
                let viewport = Self::new(*min_lon, *min_lat, *max_lon, *max_lat);
                viewport.is_valid().then_some(viewport)
            }
            _ => None,
        }
    }

    /// Build from south-west and north-east corners.
    pub fn from_corners(south_west: Position, north_east: Position) -> Self {
        Self::new(
            south_west.longitude,
            south_west.latitude,
            north_east.longitude,
            north_east.latitude,
        )
    }

    /// Zero-area viewport at a single point.
    pub fn from_point(point: Position) -> Self {
        Self::new(
            point.longitude,
            point.latitude,
            point.longitude,
            point.latitude,
        )
    }

    /// Grow to include `point`.
    pub fn extend(&mut self, point: Position) {
        self.min_lon = self.min_lon.min(point.longitude);
        self.min_lat = self.min_lat.min(point.latitude);
        self.max_lon = self.max_lon.max(point.longitude);
        self.max_lat = self.max_lat.max(point.latitude);
    }

    /// Midpoint of the box: `min + (max - min) / 2` on each axis.
    pub fn center(&self) -> Position {
        Position::new(
            self.min_lon + (self.max_lon - self.min_lon) / 2.0,
            self.min_lat + (self.max_lat - self.min_lat) / 2.0,
        )
    }

    /// Inclusive containment test.
    pub fn contains(&self, point: Position) -> bool {
        (self.min_lon..=self.max_lon).contains(&point.longitude)
            && (self.min_lat..=self.max_lat).contains(&point.latitude)
    }

    /// Finite coordinates with min <= max on both axes.
    pub fn is_valid(&self) -> bool {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
            .iter()
            .all(|v| v.is_finite())
            && self.min_lon <= self.max_lon
            && self.min_lat <= self.max_lat
    }

    pub fn south_west(&self) -> Position {
        Position::new(self.min_lon, self.min_lat)
    }

    pub fn north_east(&self) -> Position {
        Position::new(self.max_lon, self.max_lat)
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.6}, {:.6}, {:.6}, {:.6}]",
            self.min_lon, self.min_lat, self.max_lon, self.max_lat
        )
    }
}
