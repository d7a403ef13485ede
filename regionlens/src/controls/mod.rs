//! Map controls
//!
//! Thin UI-boundary components built on the core:
//!
//! - [`HomeControl`] - reset view to the home bounds
//! - [`LocateControl`] - run the region resolver
//! - [`SearchControl`] - suggestions while typing, forward search on submit
//! - [`TogglePanel`] - one checkbox per layer catalog entry
//!
//! [`MapClient`] wires them to one engine and one [`EventBus`].

mod home;
mod locate;
mod panel;
mod search;

pub use home::{HomeControl, HOME_FIT, US_BOUNDS, US_CENTER};
pub use locate::LocateControl;
pub use panel::TogglePanel;
pub use search::{SearchControl, SearchOutcome, SELECT_FIT, SELECT_ZOOM};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{error, info};

use crate::engine::{FitOptions, MapEngine};
use crate::events::{EventBus, MapEvent};
use crate::geocode::{Geocoder, SuggestPolicy};
use crate::geometry::Viewport;
use crate::layers::{LayerCatalog, LayerManager, LayerToggle, ReconcileReport};
use crate::location::LocationProvider;
use crate::resolver::ResolverConfig;

/// Settings for a [`MapClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientOptions {
    pub home_bounds: Viewport,
    pub home_fit: FitOptions,
    pub resolver: ResolverConfig,
    pub suggest: SuggestPolicy,
    /// Keys enabled at load; `None` uses the catalog defaults.
    pub initial_layers: Option<Vec<String>>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            home_bounds: US_BOUNDS,
            home_fit: HOME_FIT,
            resolver: ResolverConfig::default(),
            suggest: SuggestPolicy::default(),
            initial_layers: None,
        }
    }
}

/// All controls attached to one map.
pub struct MapClient<E: ?Sized, L, G> {
    engine: Arc<E>,
    events: EventBus,
    home: HomeControl<E>,
    locate: LocateControl<E, L>,
    search: SearchControl<E, G>,
    panel: Mutex<TogglePanel<E>>,
    initial_layers: Option<Vec<String>>,
    loaded: AtomicBool,
}

impl<E, L, G> MapClient<E, L, G>
where
    E: MapEngine + ?Sized,
    L: LocationProvider,
    G: Geocoder,
{
    pub fn new(
        engine: Arc<E>,
        provider: L,
        geocoder: G,
        catalog: LayerCatalog,
        options: ClientOptions,
    ) -> Self {
        let events = EventBus::default();
        let manager = LayerManager::new(engine.clone(), catalog);

        Self {
            home: HomeControl::new(
                engine.clone(),
                events.clone(),
                options.home_bounds,
                options.home_fit,
            ),
            locate: LocateControl::new(engine.clone(), provider, options.resolver, events.clone()),
            search: SearchControl::new(engine.clone(), geocoder, options.suggest, events.clone()),
            panel: Mutex::new(TogglePanel::new(manager, events.clone())),
            initial_layers: options.initial_layers,
            loaded: AtomicBool::new(false),
            engine,
            events,
        }
    }

    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn home(&self) -> &HomeControl<E> {
        &self.home
    }

    pub fn locate(&self) -> &LocateControl<E, L> {
        &self.locate
    }

    pub fn search(&self) -> &SearchControl<E, G> {
        &self.search
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    /// Style-loaded hook: apply the initial overlays and go home.
    ///
    /// Runs once; later calls return `None` and do nothing.
    pub fn on_load(&self) -> Option<ReconcileReport> {
        if self.loaded.swap(true, Ordering::SeqCst) {
            return None;
        }
        if !self.engine.is_style_loaded() {
            error!("Load hook ran before the style finished loading");
        }

        let report = {
            let mut panel = self.panel.lock();
            match &self.initial_layers {
                Some(keys) => panel.select(keys.as_slice()),
                None => panel.apply(),
            }
        };
        for failure in &report.failures {
            error!(key = %failure.key, error = %failure.error, "Initial layer failed");
        }

        info!(summary = %report, "Map loaded");
        self.events.publish(MapEvent::Loaded);
        self.home.press();
        Some(report)
    }

    /// Flip one layer checkbox.
    pub fn set_layer(&self, key: &str, enabled: bool) -> ReconcileReport {
        self.panel.lock().set(key, enabled)
    }

    /// Current checkbox state.
    pub fn layer_toggles(&self) -> Vec<LayerToggle> {
        self.panel.lock().toggles().to_vec()
    }

    pub fn is_layer_attached(&self, key: &str) -> bool {
        self.panel.lock().manager().is_attached(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CameraState, EngineCall, InMemoryEngine};
    use crate::http::tests::MockAsyncHttpClient;
    use crate::geocode::NominatimGeocoder;
    use crate::location::UnsupportedLocationProvider;

    type TestClient =
        MapClient<InMemoryEngine, UnsupportedLocationProvider, NominatimGeocoder<MockAsyncHttpClient>>;

    fn client(options: ClientOptions) -> (Arc<InMemoryEngine>, TestClient) {
        let engine = Arc::new(InMemoryEngine::new());
        let geocoder =
            NominatimGeocoder::new("http://geo.test/", MockAsyncHttpClient::ok("[]")).unwrap();
        let client = MapClient::new(
            engine.clone(),
            UnsupportedLocationProvider,
            geocoder,
            LayerCatalog::us_default("http://tiles.test/", "http://tiles.test/pg/"),
            options,
        );
        (engine, client)
    }

    #[tokio::test]
    async fn test_on_load_applies_layers_then_goes_home_once() {
        let (engine, client) = client(ClientOptions::default());
        let mut rx = client.events().subscribe();

        let report = client.on_load().unwrap();
        assert!(report.is_clean());
        assert!(client.is_layer_attached("us-counties"));
        assert_eq!(
            engine.camera(),
            Some(CameraState::Fitted {
                viewport: US_BOUNDS,
                options: HOME_FIT
            })
        );

        assert!(matches!(rx.recv().await.unwrap(), MapEvent::LayersReconciled(_)));
        assert_eq!(rx.recv().await.unwrap(), MapEvent::Loaded);
        assert_eq!(rx.recv().await.unwrap(), MapEvent::Home);

        engine.clear_calls();
        assert!(client.on_load().is_none());
        assert!(engine.calls().is_empty());
    }

    #[test]
    fn test_initial_layers_override_defaults() {
        let (engine, client) = client(ClientOptions {
            initial_layers: Some(vec!["us-states".to_string(), "us-states-symbols".to_string()]),
            ..Default::default()
        });

        client.on_load();

        assert_eq!(
            engine.layer_ids(),
            vec!["us-states-layer", "us-states-symbols-layer"]
        );
        let adds = engine
            .calls()
            .into_iter()
            .filter(|c| matches!(c, EngineCall::AddSource(_)))
            .count();
        assert_eq!(adds, 1);
    }

    #[tokio::test]
    async fn test_locate_without_hardware_reports_unsupported() {
        let (_engine, client) = client(ClientOptions::default());
        client.on_load();

        let outcome = client.locate().press().await.unwrap();
        assert_eq!(
            outcome,
            crate::resolver::LocateOutcome::Failed(crate::location::LocationFailure::Unsupported)
        );
    }

    #[test]
    fn test_set_layer_updates_toggles() {
        let (_engine, client) = client(ClientOptions::default());
        client.on_load();

        client.set_layer("us-border", true);

        let toggles = client.layer_toggles();
        assert!(toggles.iter().any(|t| t.key == "us-border" && t.enabled));
        assert!(client.is_layer_attached("us-border"));
    }
}
