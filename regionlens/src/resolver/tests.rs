//! Tests for the region resolver state machine

use super::*;
use crate::engine::{EngineCall, FitOptions, InMemoryEngine, SourceSpec};
use crate::geometry::{Polygon, RegionFeature, RegionGeometry, Viewport};
use crate::location::{FixedLocationProvider, PositionOptions};
use serde_json::{json, Map};
use std::sync::atomic::AtomicUsize;
use std::time::Duration;
use tokio::sync::Notify;

fn county(name: &str, min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> RegionFeature {
    let mut props = Map::new();
    props.insert("namelsad".to_string(), json!(name));
    RegionFeature::new(
        RegionGeometry::Polygon(Polygon::simple(vec![
            Position::new(min_lon, min_lat),
            Position::new(max_lon, min_lat),
            Position::new(max_lon, max_lat),
            Position::new(min_lon, max_lat),
            Position::new(min_lon, min_lat),
        ])),
        props,
    )
}

fn engine_with(features: Vec<RegionFeature>) -> Arc<InMemoryEngine> {
    let engine = InMemoryEngine::new();
    engine
        .add_source(
            DEFAULT_REGION_SOURCE,
            &SourceSpec::vector_tiles(vec!["https://tiles/{z}/{x}/{y}.pbf".to_string()]),
        )
        .unwrap();
    engine.load_features(DEFAULT_REGION_SOURCE, DEFAULT_REGION_SOURCE_LAYER, features);
    engine.clear_calls();
    Arc::new(engine)
}

fn resolver_at(
    engine: Arc<InMemoryEngine>,
    lon: f64,
    lat: f64,
) -> RegionResolver<InMemoryEngine, FixedLocationProvider> {
    RegionResolver::new(
        engine,
        FixedLocationProvider::new(Position::new(lon, lat)),
        ResolverConfig::default(),
    )
}

/// Provider that blocks until released and counts hardware requests.
struct GatedProvider {
    gate: Notify,
    calls: AtomicUsize,
}

impl LocationProvider for GatedProvider {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Position, LocationFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(Position::new(-95.0, 38.0))
    }
}

struct NeverProvider;

impl LocationProvider for NeverProvider {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Position, LocationFailure> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn test_resolves_enclosing_region_and_fits_camera() {
    let engine = engine_with(vec![county("Test County", -96.0, 37.0, -94.0, 39.0)]);
    let resolver = resolver_at(engine.clone(), -95.0, 38.0);

    let outcome = resolver.locate().await.unwrap();

    let resolution = outcome.resolution().expect("should resolve");
    assert_eq!(resolution.viewport, Viewport::new(-96.0, 37.0, -94.0, 39.0));
    assert_eq!(resolution.feature.property_str("namelsad"), Some("Test County"));
    assert_eq!(resolution.position, Position::new(-95.0, 38.0));

    let camera_calls: Vec<EngineCall> = engine
        .calls()
        .into_iter()
        .filter(EngineCall::is_camera)
        .collect();
    assert_eq!(camera_calls.len(), 1);
    match &camera_calls[0] {
        EngineCall::FitBounds { viewport, options } => {
            assert_eq!(*viewport, resolution.viewport);
            assert_eq!(options.max_zoom, 12.0);
            assert_eq!(options.padding, 20);
            assert_eq!(options.duration, Duration::from_millis(1000));
        }
        other => panic!("unexpected camera call {:?}", other),
    }
    assert_eq!(resolver.state(), ResolverState::Idle);
}

#[tokio::test]
async fn test_not_ready_performs_no_query_and_no_camera_move() {
    let engine = engine_with(vec![county("Test County", -96.0, 37.0, -94.0, 39.0)]);
    engine.set_style_loaded(false);
    let resolver = resolver_at(engine.clone(), -95.0, 38.0);

    let outcome = resolver.locate().await.unwrap();

    assert_eq!(
        outcome,
        LocateOutcome::NotReady {
            position: Position::new(-95.0, 38.0)
        }
    );
    assert!(engine.calls().is_empty());
}

#[tokio::test]
async fn test_no_match_leaves_camera_untouched() {
    let engine = engine_with(vec![county("Elsewhere", 10.0, 10.0, 11.0, 11.0)]);
    let resolver = resolver_at(engine.clone(), -95.0, 38.0);

    let outcome = resolver.locate().await.unwrap();

    assert_eq!(outcome.kind(), "no_match");
    assert!(engine.calls().iter().all(|c| !c.is_camera()));
    assert!(engine.camera().is_none());
}

#[tokio::test]
async fn test_overlapping_regions_resolve_to_first_in_source_order() {
    let engine = engine_with(vec![
        county("Outside", 0.0, 0.0, 1.0, 1.0),
        county("First", -96.0, 37.0, -94.0, 39.0),
        county("Second", -100.0, 30.0, -90.0, 45.0),
    ]);
    let resolver = resolver_at(engine, -95.0, 38.0);

    let outcome = resolver.locate().await.unwrap();
    assert_eq!(
        outcome.resolution().unwrap().feature.property_str("namelsad"),
        Some("First")
    );
}

#[tokio::test]
async fn test_unloaded_tiles_yield_no_match() {
    let engine = Arc::new(InMemoryEngine::new());
    let resolver = resolver_at(engine, -95.0, 38.0);
    assert_eq!(resolver.locate().await.unwrap().kind(), "no_match");
}

#[tokio::test]
async fn test_location_failure_is_reported_with_reason() {
    for failure in [
        LocationFailure::PermissionDenied,
        LocationFailure::Unavailable,
        LocationFailure::Unsupported,
    ] {
        let engine = engine_with(vec![county("Test County", -96.0, 37.0, -94.0, 39.0)]);
        let resolver = RegionResolver::new(
            engine.clone(),
            FixedLocationProvider::failing(failure),
            ResolverConfig::default(),
        );

        assert_eq!(resolver.locate().await.unwrap(), LocateOutcome::Failed(failure));
        assert!(engine.calls().is_empty());
        assert_eq!(resolver.state(), ResolverState::Idle);
    }
}

#[tokio::test(start_paused = true)]
async fn test_position_timeout_maps_to_timeout_failure() {
    let engine = engine_with(Vec::new());
    let resolver = RegionResolver::new(engine, NeverProvider, ResolverConfig::default());

    let outcome = resolver.locate().await.unwrap();
    assert_eq!(outcome, LocateOutcome::Failed(LocationFailure::Timeout));
    assert_eq!(resolver.state(), ResolverState::Idle);
}

#[tokio::test]
async fn test_invalid_coordinates_are_unavailable() {
    let engine = engine_with(vec![county("Test County", -96.0, 37.0, -94.0, 39.0)]);
    let resolver = resolver_at(engine.clone(), f64::NAN, 38.0);

    let outcome = resolver.locate().await.unwrap();
    assert_eq!(outcome, LocateOutcome::Failed(LocationFailure::Unavailable));
    assert!(engine.camera().is_none());
}

#[tokio::test]
async fn test_second_trigger_while_awaiting_position_is_rejected() {
    let engine = engine_with(vec![county("Test County", -96.0, 37.0, -94.0, 39.0)]);
    let resolver = RegionResolver::new(
        engine,
        GatedProvider {
            gate: Notify::new(),
            calls: AtomicUsize::new(0),
        },
        ResolverConfig::default(),
    );

    let (first, second) = tokio::join!(resolver.locate(), async {
        tokio::task::yield_now().await;
        let state = resolver.state();
        let second = resolver.locate().await;
        resolver.provider.gate.notify_one();
        (state, second)
    });

    let (state_during_flight, second) = second;
    assert_eq!(state_during_flight, ResolverState::AwaitingPosition);
    assert_eq!(second, Err(ResolverBusy));
    assert!(first.unwrap().is_resolved());
    assert_eq!(resolver.provider.calls.load(Ordering::SeqCst), 1);

    // Terminal state reached: a new trigger is accepted again
    resolver.provider.gate.notify_one();
    assert!(resolver.locate().await.is_ok());
    assert_eq!(resolver.provider.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_resolve_at_uses_configured_target() {
    let engine = Arc::new(InMemoryEngine::new());
    engine
        .add_source("us-states", &SourceSpec::vector_url("https://tiles/us-states.json"))
        .unwrap();
    engine.load_features(
        "us-states",
        "tl_2023_us_state",
        vec![county("Kansas", -102.0, 37.0, -94.6, 40.0)],
    );

    let config = ResolverConfig::default()
        .with_target("us-states", "tl_2023_us_state")
        .with_fit(FitOptions::new(10, 6.0, Duration::from_millis(500)));
    let resolver = RegionResolver::new(
        engine.clone(),
        FixedLocationProvider::new(Position::new(-95.0, 38.0)),
        config,
    );

    let outcome = resolver.resolve_at(Position::new(-98.0, 38.5));
    assert!(outcome.is_resolved());
    assert!(matches!(
        engine.camera(),
        Some(crate::engine::CameraState::Fitted { options, .. }) if options.max_zoom == 6.0
    ));
}
