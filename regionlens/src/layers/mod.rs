//! Layer and source lifecycle
//!
//! [`LayerManager::reconcile`] brings the engine's overlays in line with a
//! list of [`LayerToggle`]s:
//!
//! - enable: attach the source unless an attached toggle already references
//!   it, then attach the layer
//! - disable: detach the layer, then detach the source once nothing else
//!   references it
//!
//! Decisions are made against [`RegisteredLayerState`], never by asking the
//! engine, so repeating a desired state issues no engine calls. A failure on
//! one toggle is logged and reported, and the batch continues. If a layer
//! attach fails after the same call attached its source, the source is
//! removed again.
//!
//! A source whose removal failed stays on the engine as a stray. Each
//! reconcile tries to remove unreferenced strays again before applying the
//! toggles, unless an enabled toggle in the batch is about to reuse it.

mod catalog;
mod report;
mod state;

pub use catalog::{CatalogError, LayerCatalog, LayerDefinition, LayerToggle, TileEndpoint};
pub use report::{ReconcileError, ReconcileFailure, ReconcileReport};
pub use state::RegisteredLayerState;

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::engine::{EngineError, MapEngine};

/// Owns the registry of attached overlays for one engine.
pub struct LayerManager<E: ?Sized> {
    engine: Arc<E>,
    catalog: LayerCatalog,
    state: RegisteredLayerState,
}

impl<E: MapEngine + ?Sized> LayerManager<E> {
    pub fn new(engine: Arc<E>, catalog: LayerCatalog) -> Self {
        Self {
            engine,
            catalog,
            state: RegisteredLayerState::default(),
        }
    }

    pub fn catalog(&self) -> &LayerCatalog {
        &self.catalog
    }

    pub fn state(&self) -> &RegisteredLayerState {
        &self.state
    }

    pub fn is_attached(&self, key: &str) -> bool {
        self.state.is_attached(key)
    }

    /// Apply `desired` in order.
    pub fn reconcile(&mut self, desired: &[LayerToggle]) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        self.release_stray_sources(desired, &mut report);

        for toggle in desired {
            let Some(definition) = self.catalog.get(&toggle.key).cloned() else {
                warn!(key = %toggle.key, "Ignoring unknown layer toggle");
                report.fail(&toggle.key, ReconcileError::UnknownToggle);
                continue;
            };

            match (toggle.enabled, self.state.is_attached(&toggle.key)) {
                (true, false) => self.attach(&definition, &mut report),
                (false, true) => self.detach(&definition, &mut report),
                _ => report.unchanged.push(toggle.key.clone()),
            }
        }

        if report.changed() || !report.is_clean() {
            info!(summary = %report, "Layers reconciled");
        } else {
            debug!(summary = %report, "Layers already in desired state");
        }
        report
    }

    /// Enable or disable a single catalog entry.
    pub fn set(&mut self, key: &str, enabled: bool) -> ReconcileReport {
        self.reconcile(&[LayerToggle::new(key, enabled)])
    }

    /// Detach every attached overlay, topmost first.
    pub fn detach_all(&mut self) -> ReconcileReport {
        let mut attached: Vec<LayerToggle> = self
            .catalog
            .definitions()
            .iter()
            .filter(|d| self.state.is_attached(&d.key))
            .map(|d| LayerToggle::off(d.key.clone()))
            .collect();
        attached.reverse();
        self.reconcile(&attached)
    }

    fn attach(&mut self, def: &LayerDefinition, report: &mut ReconcileReport) {
        let added_source = !self.state.is_source_present(&def.source_id);
        if added_source {
            if let Err(e) = self.engine.add_source(&def.source_id, &def.source) {
                warn!(key = %def.key, source = %def.source_id, error = %e, "Failed to add source");
                report.fail(&def.key, e);
                return;
            }
            debug!(source = %def.source_id, "Source attached");
        }

        if let Err(e) = self.engine.add_layer(&def.layer) {
            warn!(key = %def.key, layer = %def.layer.id, error = %e, "Failed to add layer");
            if added_source {
                self.roll_back_source(&def.source_id);
            }
            report.fail(&def.key, e);
            return;
        }

        self.state.register(&def.key, &def.source_id);
        debug!(key = %def.key, layer = %def.layer.id, "Layer attached");
        report.attached.push(def.key.clone());
    }

    fn detach(&mut self, def: &LayerDefinition, report: &mut ReconcileReport) {
        if let Err(e) = self.engine.remove_layer(&def.layer.id) {
            warn!(key = %def.key, layer = %def.layer.id, error = %e, "Failed to remove layer");
            report.fail(&def.key, e);
            return;
        }

        let remaining = self.state.unregister(&def.key, &def.source_id);
        debug!(key = %def.key, layer = %def.layer.id, "Layer detached");
        report.detached.push(def.key.clone());

        if remaining > 0 {
            debug!(source = %def.source_id, remaining, "Source still referenced, keeping it");
            return;
        }

        match self.engine.remove_source(&def.source_id) {
            Ok(()) => debug!(source = %def.source_id, "Source detached"),
            Err(e) => {
                warn!(source = %def.source_id, error = %e, "Failed to remove source");
                self.state.mark_stray(&def.source_id);
                report.fail(&def.key, e);
            }
        }
    }

    fn release_stray_sources(&mut self, desired: &[LayerToggle], report: &mut ReconcileReport) {
        let strays: Vec<String> = self
            .state
            .stray_sources()
            .filter(|id| self.state.source_refs(id) == 0)
            .map(str::to_string)
            .collect();

        for source_id in strays {
            let reused = desired.iter().any(|t| {
                t.enabled
                    && self
                        .catalog
                        .get(&t.key)
                        .is_some_and(|d| d.source_id == source_id)
            });
            if reused {
                debug!(source = %source_id, "Keeping stray source for an enabled toggle");
                continue;
            }

            match self.engine.remove_source(&source_id) {
                Ok(()) => {
                    self.state.clear_stray(&source_id);
                    info!(source = %source_id, "Removed stray source");
                    report.released.push(source_id);
                }
                Err(EngineError::SourceMissing(_)) => {
                    self.state.clear_stray(&source_id);
                    debug!(source = %source_id, "Stray source already gone");
                }
                Err(e) => {
                    warn!(source = %source_id, error = %e, "Stray source still cannot be removed");
                    report.fail(&source_id, e);
                }
            }
        }
    }

    fn roll_back_source(&mut self, source_id: &str) {
        match self.engine.remove_source(source_id) {
            Ok(()) => {
                self.state.clear_stray(source_id);
                debug!(source = source_id, "Rolled back source after layer failure");
            }
            Err(e) => {
                error!(source = source_id, error = %e, "Failed to roll back source");
                self.state.mark_stray(source_id);
            }
        }
    }
}
