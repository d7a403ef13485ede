//! Geocode candidate and Nominatim response decoding.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::GeocodeError;
use crate::geometry::{Position, Viewport};

/// Minimum characters before suggestions are requested.
pub const DEFAULT_SUGGEST_MIN_LENGTH: usize = 3;

/// Maximum number of suggestions requested.
pub const DEFAULT_SUGGEST_LIMIT: usize = 5;

/// Quiet period between keystrokes and a suggestion request.
pub const DEFAULT_SUGGEST_DEBOUNCE: Duration = Duration::from_millis(300);

/// One search result.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeCandidate {
    /// Representative point (bbox centroid for forward search).
    pub point: Position,
    /// Human-readable place name.
    pub label: String,
    /// Backend record, passed through untouched.
    pub raw: Value,
    /// Extent of the place when the backend reported one.
    pub bounding_box: Option<Viewport>,
}

/// How as-you-type suggestions are throttled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestPolicy {
    pub min_length: usize,
    pub limit: usize,
    pub debounce: Duration,
}

impl Default for SuggestPolicy {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_SUGGEST_MIN_LENGTH,
            limit: DEFAULT_SUGGEST_LIMIT,
            debounce: DEFAULT_SUGGEST_DEBOUNCE,
        }
    }
}

impl SuggestPolicy {
    /// True when `query` is long enough to be sent, counted in characters
    /// after trimming.
    pub fn accepts(&self, query: &str) -> bool {
        let len = query.trim().chars().count();
        len > 0 && len >= self.min_length
    }
}

/// `format=geojson` search response.
#[derive(Deserialize)]
struct SearchCollection {
    features: Vec<SearchFeature>,
}

#[derive(Deserialize)]
struct SearchFeature {
    #[serde(default)]
    bbox: Option<Vec<f64>>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

/// Decode a forward-geocode response.
///
/// Features without a usable four-value `bbox` are dropped; the rest are
/// centered on their bbox centroid.
pub(crate) fn parse_forward(body: &[u8]) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
    let collection: SearchCollection =
        serde_json::from_slice(body).map_err(|e| GeocodeError::Parse(e.to_string()))?;

    let total = collection.features.len();
    let candidates: Vec<GeocodeCandidate> = collection
        .features
        .into_iter()
        .filter_map(|feature| {
            let viewport = feature.bbox.as_deref().and_then(Viewport::from_bbox)?;
            let properties = feature.properties.unwrap_or_default();
            let label = display_name(&properties);
            Some(GeocodeCandidate {
                point: viewport.center(),
                label,
                raw: Value::Object(properties),
                bounding_box: Some(viewport),
            })
        })
        .collect();

    if candidates.len() < total {
        debug!(
            total,
            kept = candidates.len(),
            "Dropped search features without a bounding box"
        );
    }
    Ok(candidates)
}

/// Decode a `format=json` suggestion response.
///
/// `lon`/`lat` may be strings or numbers; records whose coordinates do not
/// parse to a valid position are dropped.
pub(crate) fn parse_suggestions(body: &[u8]) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
    let records: Vec<Value> =
        serde_json::from_slice(body).map_err(|e| GeocodeError::Parse(e.to_string()))?;

    let total = records.len();
    let candidates: Vec<GeocodeCandidate> = records
        .into_iter()
        .filter_map(|record| {
            let point = Position::new(
                coordinate(record.get("lon")?)?,
                coordinate(record.get("lat")?)?,
            );
            if !point.is_valid() {
                return None;
            }
            let label = record
                .get("display_name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let bounding_box = record.get("boundingbox").and_then(nominatim_bounding_box);
            Some(GeocodeCandidate {
                point,
                label,
                raw: record,
                bounding_box,
            })
        })
        .collect();

    if candidates.len() < total {
        debug!(
            total,
            kept = candidates.len(),
            "Dropped suggestions with unparsable coordinates"
        );
    }
    Ok(candidates)
}

fn display_name(properties: &Map<String, Value>) -> String {
    properties
        .get("display_name")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    parsed.is_finite().then_some(parsed)
}

/// Nominatim `boundingbox` is `[south, north, west, east]`.
fn nominatim_bounding_box(value: &Value) -> Option<Viewport> {
    let values = value
        .as_array()?
        .iter()
        .map(coordinate)
        .collect::<Option<Vec<f64>>>()?;
    match values.as_slice() {
        [south, north, west, east] => Viewport::from_bbox(&[*west, *south, *east, *north]),
        _ => None,
    }
}
