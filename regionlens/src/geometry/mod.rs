//! Point-in-region matching
//!
//! Pure geometry used by the region resolver: even-odd ray casting over ring
//! coordinate sequences, with support for holes and multipolygons. Nothing
//! here depends on the rendering engine's own geometry types.
//!
//! Degenerate rings (fewer than three non-zero-length edges, or any
//! non-finite vertex) never contain a point. A degenerate hole is therefore
//! ignored, and a degenerate exterior excludes its whole polygon.

pub mod geojson;
mod types;

pub use types::{
    Polygon, Position, RegionFeature, RegionGeometry, Ring, Viewport, MAX_LAT, MAX_LON, MIN_LAT,
    MIN_LON,
};

/// Returns true when `point` lies inside `feature`.
///
/// A polygon contains the point when its exterior ring does and none of its
/// holes do. A multipolygon contains the point when any member polygon does.
#[inline]
pub fn contains(point: Position, feature: &RegionFeature) -> bool {
    geometry_contains(point, &feature.geometry)
}

/// Containment test against a bare geometry.
pub fn geometry_contains(point: Position, geometry: &RegionGeometry) -> bool {
    if !point.is_finite() {
        return false;
    }
    geometry.polygons().any(|p| polygon_contains(point, p))
}

/// Returns the first feature, in the order supplied, that contains `point`.
///
/// Overlapping features are not ranked: when several candidates contain the
/// point, the earliest one wins.
pub fn first_match<'a, I>(point: Position, features: I) -> Option<&'a RegionFeature>
where
    I: IntoIterator<Item = &'a RegionFeature>,
{
    features.into_iter().find(|f| contains(point, f))
}

/// Containment test against a single polygon (exterior minus holes).
pub fn polygon_contains(point: Position, polygon: &Polygon) -> bool {
    ring_contains(point, &polygon.exterior)
        && !polygon.holes.iter().any(|hole| ring_contains(point, hole))
}

/// Even-odd ray casting against one ring.
///
/// Casts a ray towards +longitude and counts edge crossings. Zero-length
/// edges are skipped; degenerate rings return false.
pub fn ring_contains(point: Position, ring: &[Position]) -> bool {
    if !is_usable_ring(ring) {
        return false;
    }

    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[j];
        j = i;

        if a == b {
            continue;
        }

        if (a.latitude > point.latitude) != (b.latitude > point.latitude) {
            let crossing_lon = (b.longitude - a.longitude) * (point.latitude - a.latitude)
                / (b.latitude - a.latitude)
                + a.longitude;
            if point.longitude < crossing_lon {
                inside = !inside;
            }
        }
    }
    inside
}

/// A ring needs finite vertices and at least three edges of non-zero length.
fn is_usable_ring(ring: &[Position]) -> bool {
    if ring.len() < 3 || !ring.iter().all(Position::is_finite) {
        return false;
    }
    let mut edges = 0;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        if ring[i] != ring[j] {
            edges += 1;
        }
        j = i;
    }
    edges >= 3
}

#[cfg(test)]
mod tests;
