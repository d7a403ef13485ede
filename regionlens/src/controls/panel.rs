//! Layer toggle panel.

use tracing::warn;

use crate::engine::MapEngine;
use crate::events::{EventBus, MapEvent};
use crate::layers::{
    LayerManager, LayerToggle, ReconcileError, ReconcileFailure, ReconcileReport,
};

/// One checkbox per catalog entry, bound to a [`LayerManager`].
///
/// The panel holds the full desired toggle set and reconciles all of it on
/// every change.
pub struct TogglePanel<E: ?Sized> {
    manager: LayerManager<E>,
    toggles: Vec<LayerToggle>,
    events: EventBus,
}

impl<E: MapEngine + ?Sized> TogglePanel<E> {
    /// Start with every checkbox at its catalog default.
    pub fn new(manager: LayerManager<E>, events: EventBus) -> Self {
        let toggles = manager.catalog().default_toggles();
        Self {
            manager,
            toggles,
            events,
        }
    }

    pub fn toggles(&self) -> &[LayerToggle] {
        &self.toggles
    }

    pub fn manager(&self) -> &LayerManager<E> {
        &self.manager
    }

    /// Replace the checkbox state with `enabled` keys on, all others off.
    ///
    /// Unknown keys are reported as failures.
    pub fn select<S: AsRef<str>>(&mut self, enabled: &[S]) -> ReconcileReport {
        self.toggles = self.manager.catalog().toggles_for(enabled);
        let mut report = self.manager.reconcile(&self.toggles);
        for key in enabled.iter().map(AsRef::as_ref) {
            if !self.manager.catalog().contains(key) {
                warn!(key, "Ignoring unknown layer key");
                report.failures.push(unknown(key));
            }
        }
        self.publish(report)
    }

    /// Flip one checkbox and reconcile.
    pub fn set(&mut self, key: &str, enabled: bool) -> ReconcileReport {
        let Some(toggle) = self.toggles.iter_mut().find(|t| t.key == key) else {
            warn!(key, "Ignoring unknown layer key");
            let report = ReconcileReport {
                failures: vec![unknown(key)],
                ..Default::default()
            };
            return self.publish(report);
        };
        toggle.enabled = enabled;
        self.apply()
    }

    /// Reconcile the engine against the current checkbox state.
    pub fn apply(&mut self) -> ReconcileReport {
        let report = self.manager.reconcile(&self.toggles);
        self.publish(report)
    }

    fn publish(&self, report: ReconcileReport) -> ReconcileReport {
        self.events
            .publish(MapEvent::LayersReconciled(report.clone()));
        report
    }
}

fn unknown(key: &str) -> ReconcileFailure {
    ReconcileFailure {
        key: key.to_string(),
        error: ReconcileError::UnknownToggle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::InMemoryEngine;
    use crate::layers::LayerCatalog;
    use std::sync::Arc;

    fn panel() -> (Arc<InMemoryEngine>, TogglePanel<InMemoryEngine>) {
        let engine = Arc::new(InMemoryEngine::new());
        let manager = LayerManager::new(
            engine.clone(),
            LayerCatalog::us_default("http://tiles.test/", "http://tiles.test/pg/"),
        );
        (engine, TogglePanel::new(manager, EventBus::default()))
    }

    #[test]
    fn test_apply_attaches_defaults() {
        let (engine, mut panel) = panel();
        let report = panel.apply();
        assert_eq!(report.attached.len(), 3);
        assert_eq!(
            engine.layer_ids(),
            vec!["carto-light-layer", "us-counties-layer", "us-counties-label"]
        );
    }

    #[test]
    fn test_set_flips_one_toggle() {
        let (engine, mut panel) = panel();
        panel.apply();

        let report = panel.set("us-border", true);
        assert_eq!(report.attached, vec!["us-border"]);
        assert!(engine.has_layer("us-border-layer"));

        let report = panel.set("us-counties", false);
        assert_eq!(report.detached, vec!["us-counties"]);
        assert!(!engine.has_source("us_counties"));
    }

    #[test]
    fn test_set_unknown_key_reports_failure() {
        let (engine, mut panel) = panel();
        let report = panel.set("us-rivers", true);
        assert_eq!(report.failures[0].error, ReconcileError::UnknownToggle);
        assert!(engine.calls().is_empty());
    }

    #[test]
    fn test_select_replaces_enabled_set() {
        let (engine, mut panel) = panel();
        panel.apply();

        let report = panel.select(&["us-states", "us-rivers"]);

        assert_eq!(report.attached, vec!["us-states"]);
        assert_eq!(report.detached.len(), 3);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(engine.layer_ids(), vec!["us-states-layer"]);
    }
}
