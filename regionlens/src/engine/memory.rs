//! In-process engine that keeps style state in memory and records every call.
//!
//! Enforces the same ordering rules as a real renderer: a layer needs its
//! source, and a source cannot be removed while a layer references it.

use std::collections::HashMap;
use std::collections::HashSet;

use parking_lot::Mutex;
use tracing::{debug, trace};

use super::error::EngineError;
use super::types::{FitOptions, LayerSpec, SourceSpec};
use super::MapEngine;
use crate::geometry::{Position, RegionFeature, Viewport};

/// A recorded engine invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    AddSource(String),
    RemoveSource(String),
    AddLayer(String),
    RemoveLayer(String),
    QueryFeatures {
        source: String,
        source_layer: String,
    },
    FitBounds {
        viewport: Viewport,
        options: FitOptions,
    },
    FlyTo {
        center: Position,
        zoom: f64,
    },
}

impl EngineCall {
    /// True for source/layer mutations (attach or detach).
    pub fn is_style_mutation(&self) -> bool {
        matches!(
            self,
            EngineCall::AddSource(_)
                | EngineCall::RemoveSource(_)
                | EngineCall::AddLayer(_)
                | EngineCall::RemoveLayer(_)
        )
    }

    /// True for camera movements.
    pub fn is_camera(&self) -> bool {
        matches!(self, EngineCall::FitBounds { .. } | EngineCall::FlyTo { .. })
    }
}

/// Last camera target requested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraState {
    Fitted {
        viewport: Viewport,
        options: FitOptions,
    },
    Centered {
        center: Position,
        zoom: f64,
    },
}

#[derive(Default)]
struct EngineState {
    style_loaded: bool,
    sources: HashMap<String, SourceSpec>,
    /// Layers in draw order.
    layers: Vec<LayerSpec>,
    features: HashMap<(String, String), Vec<RegionFeature>>,
    rejected_layers: HashSet<String>,
    pinned_sources: HashSet<String>,
    camera: Option<CameraState>,
    calls: Vec<EngineCall>,
}

/// Thread-safe in-memory [`MapEngine`].
pub struct InMemoryEngine {
    state: Mutex<EngineState>,
}

impl InMemoryEngine {
    /// Create an engine whose style is already loaded.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(EngineState {
                style_loaded: true,
                ..Default::default()
            }),
        }
    }

    /// Create an engine that reports its style as not yet loaded.
    pub fn loading() -> Self {
        Self {
            state: Mutex::new(EngineState::default()),
        }
    }

    /// Mark the style loaded (or not).
    pub fn set_style_loaded(&self, loaded: bool) {
        self.state.lock().style_loaded = loaded;
    }

    /// Make features available for `source`/`source_layer`, as if their tiles
    /// had been loaded into the viewport.
    pub fn load_features(&self, source: &str, source_layer: &str, features: Vec<RegionFeature>) {
        debug!(
            source,
            source_layer,
            count = features.len(),
            "Features materialized"
        );
        self.state
            .lock()
            .features
            .insert((source.to_string(), source_layer.to_string()), features);
    }

    /// Refuse future `add_layer` calls for this layer id.
    pub fn reject_layer(&self, layer_id: &str) {
        self.state.lock().rejected_layers.insert(layer_id.to_string());
    }

    /// Refuse `remove_source` for this source id until [`unpin_source`](Self::unpin_source).
    pub fn pin_source(&self, source_id: &str) {
        self.state.lock().pinned_sources.insert(source_id.to_string());
    }

    pub fn unpin_source(&self, source_id: &str) {
        self.state.lock().pinned_sources.remove(source_id);
    }

    /// All calls received so far, in order.
    pub fn calls(&self) -> Vec<EngineCall> {
        self.state.lock().calls.clone()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// Attached source ids, sorted.
    pub fn source_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.state.lock().sources.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Attached layer ids in draw order.
    pub fn layer_ids(&self) -> Vec<String> {
        self.state
            .lock()
            .layers
            .iter()
            .map(|l| l.id.clone())
            .collect()
    }

    pub fn source(&self, id: &str) -> Option<SourceSpec> {
        self.state.lock().sources.get(id).cloned()
    }

    pub fn camera(&self) -> Option<CameraState> {
        self.state.lock().camera
    }
}

impl Default for InMemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MapEngine for InMemoryEngine {
    fn add_source(&self, id: &str, spec: &SourceSpec) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        state.calls.push(EngineCall::AddSource(id.to_string()));
        if state.sources.contains_key(id) {
            return Err(EngineError::SourceExists(id.to_string()));
        }
        state.sources.insert(id.to_string(), spec.clone());
        trace!(source = id, "Source added");
        Ok(())
    }

    fn remove_source(&self, id: &str) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        state.calls.push(EngineCall::RemoveSource(id.to_string()));
        if !state.sources.contains_key(id) {
            return Err(EngineError::SourceMissing(id.to_string()));
        }
        if state.pinned_sources.contains(id) {
            return Err(EngineError::Rejected(format!("source '{}' is pinned", id)));
        }
        if let Some(layer) = state.layers.iter().find(|l| l.source == id) {
            return Err(EngineError::SourceInUse {
                source_id: id.to_string(),
                layer_id: layer.id.clone(),
            });
        }
        state.sources.remove(id);
        trace!(source = id, "Source removed");
        Ok(())
    }

    fn has_source(&self, id: &str) -> bool {
        self.state.lock().sources.contains_key(id)
    }

    fn add_layer(&self, layer: &LayerSpec) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        state.calls.push(EngineCall::AddLayer(layer.id.clone()));
        if state.rejected_layers.contains(&layer.id) {
            return Err(EngineError::Rejected(format!(
                "layer '{}' refused",
                layer.id
            )));
        }
        if state.layers.iter().any(|l| l.id == layer.id) {
            return Err(EngineError::LayerExists(layer.id.clone()));
        }
        if !state.sources.contains_key(&layer.source) {
            return Err(EngineError::SourceMissing(layer.source.clone()));
        }
        state.layers.push(layer.clone());
        trace!(layer = %layer.id, source = %layer.source, "Layer added");
        Ok(())
    }

    fn remove_layer(&self, id: &str) -> Result<(), EngineError> {
        let mut state = self.state.lock();
        state.calls.push(EngineCall::RemoveLayer(id.to_string()));
        let index = state
            .layers
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| EngineError::LayerMissing(id.to_string()))?;
        state.layers.remove(index);
        trace!(layer = id, "Layer removed");
        Ok(())
    }

    fn has_layer(&self, id: &str) -> bool {
        self.state.lock().layers.iter().any(|l| l.id == id)
    }

    fn is_style_loaded(&self) -> bool {
        self.state.lock().style_loaded
    }

    fn query_source_features(&self, source: &str, source_layer: &str) -> Vec<RegionFeature> {
        let mut state = self.state.lock();
        state.calls.push(EngineCall::QueryFeatures {
            source: source.to_string(),
            source_layer: source_layer.to_string(),
        });
        if !state.sources.contains_key(source) {
            return Vec::new();
        }
        state
            .features
            .get(&(source.to_string(), source_layer.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    fn fit_bounds(&self, viewport: Viewport, options: FitOptions) {
        let mut state = self.state.lock();
        state.calls.push(EngineCall::FitBounds { viewport, options });
        state.camera = Some(CameraState::Fitted { viewport, options });
    }

    fn fly_to(&self, center: Position, zoom: f64) {
        let mut state = self.state.lock();
        state.calls.push(EngineCall::FlyTo { center, zoom });
        state.camera = Some(CameraState::Centered { center, zoom });
    }
}
