//! GeoJSON decoding for region features.
//!
//! Only area geometries (`Polygon`, `MultiPolygon`) become [`RegionFeature`]s.
//! Other geometry types and malformed features are skipped, never fatal.

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use super::types::{Polygon, Position, RegionFeature, RegionGeometry, Ring};

/// Errors decoding a GeoJSON document.
#[derive(Debug, Error)]
pub enum GeoJsonError {
    /// Payload is not valid JSON or not a FeatureCollection.
    #[error("Invalid GeoJSON: {0}")]
    Invalid(String),
}

/// GeoJSON geometry as sent by tile servers and Nominatim.
///
/// Positions are kept as raw number arrays because some producers append an
/// altitude component.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Vec<f64>>>> },
    #[serde(other)]
    Unsupported,
}

/// A single GeoJSON feature.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoJsonFeature {
    #[serde(default)]
    pub geometry: Option<GeoJsonGeometry>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    #[serde(default)]
    pub bbox: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Value>,
}

/// Decode every usable feature in a FeatureCollection.
///
/// Individual features that fail to decode are skipped.
pub fn features_from_slice(bytes: &[u8]) -> Result<Vec<GeoJsonFeature>, GeoJsonError> {
    let collection: FeatureCollection =
        serde_json::from_slice(bytes).map_err(|e| GeoJsonError::Invalid(e.to_string()))?;

    let total = collection.features.len();
    let features: Vec<GeoJsonFeature> = collection
        .features
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<GeoJsonFeature>(value) {
            Ok(feature) => Some(feature),
            Err(e) => {
                debug!(error = %e, "Skipping malformed GeoJSON feature");
                None
            }
        })
        .collect();

    debug!(total, decoded = features.len(), "GeoJSON collection decoded");
    Ok(features)
}

/// Decode a FeatureCollection into region features, keeping only polygons
/// and multipolygons.
pub fn region_features_from_slice(bytes: &[u8]) -> Result<Vec<RegionFeature>, GeoJsonError> {
    Ok(features_from_slice(bytes)?
        .into_iter()
        .filter_map(|f| f.into_region_feature())
        .collect())
}

impl GeoJsonFeature {
    /// Convert into a [`RegionFeature`] if the geometry is an area.
    pub fn into_region_feature(self) -> Option<RegionFeature> {
        let geometry = self.geometry.as_ref().and_then(GeoJsonGeometry::to_region)?;
        Some(RegionFeature::new(
            geometry,
            self.properties.unwrap_or_default(),
        ))
    }
}

impl GeoJsonGeometry {
    /// Convert to a [`RegionGeometry`]. Returns `None` for non-area types or
    /// when no polygon survives decoding.
    pub fn to_region(&self) -> Option<RegionGeometry> {
        match self {
            GeoJsonGeometry::Polygon { coordinates } => {
                polygon_from_rings(coordinates).map(RegionGeometry::Polygon)
            }
            GeoJsonGeometry::MultiPolygon { coordinates } => {
                let polygons: Vec<Polygon> = coordinates
                    .iter()
                    .filter_map(|rings| polygon_from_rings(rings))
                    .collect();
                (!polygons.is_empty()).then_some(RegionGeometry::MultiPolygon(polygons))
            }
            GeoJsonGeometry::Unsupported => None,
        }
    }
}

fn polygon_from_rings(rings: &[Vec<Vec<f64>>]) -> Option<Polygon> {
    let (exterior, holes) = rings.split_first()?;
    Some(Polygon::new(
        ring_from_positions(exterior),
        holes.iter().map(|h| ring_from_positions(h)).collect(),
    ))
}

/// Positions with fewer than two components are dropped.
fn ring_from_positions(positions: &[Vec<f64>]) -> Ring {
    positions
        .iter()
        .filter_map(|p| match p.as_slice() {
            [lon, lat, ..] => Some(Position::new(*lon, *lat)),
            _ => None,
        })
        .collect()
}
