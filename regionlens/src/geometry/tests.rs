//! Tests for point-in-region matching

use super::*;
use serde_json::{json, Map, Value};

fn square(min: f64, max: f64) -> Ring {
    vec![
        Position::new(min, min),
        Position::new(max, min),
        Position::new(max, max),
        Position::new(min, max),
        Position::new(min, min),
    ]
}

fn named(name: &str) -> Map<String, Value> {
    let mut props = Map::new();
    props.insert("name".to_string(), json!(name));
    props
}

fn square_feature(name: &str, min: f64, max: f64) -> RegionFeature {
    RegionFeature::new(
        RegionGeometry::Polygon(Polygon::simple(square(min, max))),
        named(name),
    )
}

#[test]
fn test_point_strictly_inside_polygon() {
    let feature = square_feature("a", 0.0, 10.0);
    assert!(contains(Position::new(5.0, 5.0), &feature));
    assert!(contains(Position::new(0.1, 9.9), &feature));
}

#[test]
fn test_point_strictly_outside_polygon() {
    let feature = square_feature("a", 0.0, 10.0);
    assert!(!contains(Position::new(-1.0, 5.0), &feature));
    assert!(!contains(Position::new(5.0, 10.5), &feature));
    assert!(!contains(Position::new(50.0, 50.0), &feature));
}

#[test]
fn test_point_inside_hole_is_not_contained() {
    let feature = RegionFeature::new(
        RegionGeometry::Polygon(Polygon::new(square(0.0, 10.0), vec![square(4.0, 6.0)])),
        Map::new(),
    );
    assert!(!contains(Position::new(5.0, 5.0), &feature));
    assert!(contains(Position::new(2.0, 2.0), &feature));
    assert!(contains(Position::new(8.0, 5.0), &feature));
}

#[test]
fn test_multipolygon_contains_point_in_any_member() {
    let feature = RegionFeature::new(
        RegionGeometry::MultiPolygon(vec![
            Polygon::simple(square(0.0, 1.0)),
            Polygon::simple(square(5.0, 6.0)),
        ]),
        Map::new(),
    );
    assert!(contains(Position::new(0.5, 0.5), &feature));
    assert!(contains(Position::new(5.5, 5.5), &feature));
    assert!(!contains(Position::new(3.0, 3.0), &feature));
}

#[test]
fn test_concave_polygon() {
    // U shape opening to the north
    let ring = vec![
        Position::new(0.0, 0.0),
        Position::new(3.0, 0.0),
        Position::new(3.0, 3.0),
        Position::new(2.0, 3.0),
        Position::new(2.0, 1.0),
        Position::new(1.0, 1.0),
        Position::new(1.0, 3.0),
        Position::new(0.0, 3.0),
    ];
    let feature = RegionFeature::new(RegionGeometry::Polygon(Polygon::simple(ring)), Map::new());
    assert!(contains(Position::new(0.5, 2.0), &feature));
    assert!(contains(Position::new(2.5, 2.0), &feature));
    assert!(!contains(Position::new(1.5, 2.0), &feature));
}

#[test]
fn test_unclosed_ring_is_accepted() {
    let ring = vec![
        Position::new(0.0, 0.0),
        Position::new(4.0, 0.0),
        Position::new(4.0, 4.0),
        Position::new(0.0, 4.0),
    ];
    assert!(ring_contains(Position::new(2.0, 2.0), &ring));
}

#[test]
fn test_empty_ring_never_contains() {
    assert!(!ring_contains(Position::new(0.0, 0.0), &[]));
    let feature = RegionFeature::new(
        RegionGeometry::Polygon(Polygon::simple(Vec::new())),
        Map::new(),
    );
    assert!(!contains(Position::new(0.0, 0.0), &feature));
}

#[test]
fn test_zero_length_edges_are_skipped() {
    let ring = vec![
        Position::new(0.0, 0.0),
        Position::new(0.0, 0.0),
        Position::new(10.0, 0.0),
        Position::new(10.0, 10.0),
        Position::new(10.0, 10.0),
        Position::new(0.0, 10.0),
        Position::new(0.0, 0.0),
    ];
    assert!(ring_contains(Position::new(5.0, 5.0), &ring));
    assert!(!ring_contains(Position::new(15.0, 5.0), &ring));
}

#[test]
fn test_degenerate_ring_with_two_distinct_vertices() {
    let ring = vec![
        Position::new(0.0, 0.0),
        Position::new(10.0, 10.0),
        Position::new(0.0, 0.0),
    ];
    assert!(!ring_contains(Position::new(5.0, 5.0), &ring));
}

#[test]
fn test_degenerate_hole_is_ignored() {
    let hole = vec![Position::new(5.0, 5.0), Position::new(5.0, 5.0)];
    let polygon = Polygon::new(square(0.0, 10.0), vec![hole]);
    assert!(polygon_contains(Position::new(5.0, 5.0), &polygon));
}

#[test]
fn test_non_finite_input_is_rejected() {
    let feature = square_feature("a", 0.0, 10.0);
    assert!(!contains(Position::new(f64::NAN, 5.0), &feature));

    let mut ring = square(0.0, 10.0);
    ring[1] = Position::new(f64::INFINITY, 0.0);
    assert!(!ring_contains(Position::new(5.0, 5.0), &ring));
}

#[test]
fn test_first_match_returns_earliest_containing_feature() {
    let a = square_feature("A", 20.0, 30.0);
    let b = square_feature("B", 0.0, 10.0);
    let c = square_feature("C", -5.0, 15.0);
    let features = vec![a, b, c];

    let found = first_match(Position::new(5.0, 5.0), &features).unwrap();
    assert_eq!(found.property_str("name"), Some("B"));
}

#[test]
fn test_first_match_overlap_resolves_to_source_order() {
    let big = square_feature("big", -50.0, 50.0);
    let small = square_feature("small", 0.0, 1.0);

    let features = vec![big.clone(), small.clone()];
    let found = first_match(Position::new(0.5, 0.5), &features).unwrap();
    assert_eq!(found.property_str("name"), Some("big"));

    let features = vec![small, big];
    let found = first_match(Position::new(0.5, 0.5), &features).unwrap();
    assert_eq!(found.property_str("name"), Some("small"));
}

#[test]
fn test_first_match_none_when_no_feature_contains() {
    let features = vec![square_feature("A", 0.0, 1.0)];
    assert!(first_match(Position::new(9.0, 9.0), &features).is_none());
    assert!(first_match(Position::new(0.5, 0.5), &Vec::<RegionFeature>::new()).is_none());
}

#[test]
fn test_bounding_box_of_polygon() {
    let feature = square_feature("a", -3.0, 7.0);
    assert_eq!(
        feature.bounding_box(),
        Some(Viewport::new(-3.0, -3.0, 7.0, 7.0))
    );
}

#[test]
fn test_bounding_box_of_multipolygon_spans_members() {
    let geometry = RegionGeometry::MultiPolygon(vec![
        Polygon::simple(square(0.0, 1.0)),
        Polygon::simple(square(5.0, 6.0)),
    ]);
    assert_eq!(geometry.bounding_box(), Some(Viewport::new(0.0, 0.0, 6.0, 6.0)));
}

#[test]
fn test_bounding_box_empty_geometry() {
    let geometry = RegionGeometry::MultiPolygon(Vec::new());
    assert!(geometry.bounding_box().is_none());
}

#[test]
fn test_viewport_center() {
    let viewport = Viewport::new(-10.0, -5.0, 10.0, 5.0);
    assert_eq!(viewport.center(), Position::new(0.0, 0.0));

    let viewport = Viewport::new(-100.0, 30.0, -90.0, 40.0);
    assert_eq!(viewport.center(), Position::new(-95.0, 35.0));
}

#[test]
fn test_viewport_from_bbox_requires_four_ordered_values() {
    assert!(Viewport::from_bbox(&[0.0, 0.0, 1.0]).is_none());
    assert!(Viewport::from_bbox(&[1.0, 0.0, 0.0, 1.0]).is_none());
    assert!(Viewport::from_bbox(&[0.0, f64::NAN, 1.0, 1.0]).is_none());
    assert_eq!(
        Viewport::from_bbox(&[-10.0, -5.0, 10.0, 5.0]),
        Some(Viewport::new(-10.0, -5.0, 10.0, 5.0))
    );
}

#[test]
fn test_viewport_contains_is_inclusive() {
    let viewport = Viewport::new(0.0, 0.0, 1.0, 1.0);
    assert!(viewport.contains(Position::new(1.0, 1.0)));
    assert!(!viewport.contains(Position::new(1.1, 1.0)));
}

#[test]
fn test_position_validity() {
    assert!(Position::new(-95.0, 38.0).is_valid());
    assert!(!Position::new(-195.0, 38.0).is_valid());
    assert!(!Position::new(0.0, 91.0).is_valid());
}
