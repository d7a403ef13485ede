//! Rendering engine capability surface.
//!
//! The core never talks to a concrete map renderer. It depends on the narrow
//! [`MapEngine`] trait: source/layer CRUD, feature queries, a readiness check
//! and camera control. An adapter over the real renderer implements it; the
//! [`InMemoryEngine`] implements it in-process for the CLI and for tests.
//!
//! # Example
//!
//! ```
//! use regionlens::engine::{InMemoryEngine, LayerKind, LayerSpec, MapEngine, SourceSpec};
//!
//! let engine = InMemoryEngine::new();
//! engine.add_source("us-states", &SourceSpec::vector_url("https://tiles/us-states.json")).unwrap();
//! engine.add_layer(&LayerSpec::new("us-states-layer", LayerKind::Line, "us-states")).unwrap();
//! assert!(engine.has_layer("us-states-layer"));
//! ```

mod error;
mod memory;
mod types;

pub use error::EngineError;
pub use memory::{CameraState, EngineCall, InMemoryEngine};
pub use types::{FitOptions, LayerKind, LayerSpec, SourceSpec};

use crate::geometry::{Position, RegionFeature, Viewport};

/// Capabilities the core consumes from a map rendering engine.
///
/// All methods take `&self`; implementations provide their own interior
/// synchronization so a single engine can be shared between the layer
/// manager, the region resolver and the controls.
pub trait MapEngine: Send + Sync {
    /// Register a named source. Fails if the id is taken.
    fn add_source(&self, id: &str, spec: &SourceSpec) -> Result<(), EngineError>;

    /// Remove a named source. Fails if missing or still referenced by a layer.
    fn remove_source(&self, id: &str) -> Result<(), EngineError>;

    fn has_source(&self, id: &str) -> bool;

    /// Register a layer. Its source must already exist.
    fn add_layer(&self, layer: &LayerSpec) -> Result<(), EngineError>;

    fn remove_layer(&self, id: &str) -> Result<(), EngineError>;

    fn has_layer(&self, id: &str) -> bool;

    /// Whether the style and its tiles are loaded enough to answer queries.
    fn is_style_loaded(&self) -> bool;

    /// Features of `source_layer` in `source` currently materialized in the
    /// viewport. Regions whose tiles are not loaded are absent.
    fn query_source_features(&self, source: &str, source_layer: &str) -> Vec<RegionFeature>;

    /// Animate the camera so `viewport` fills the screen.
    fn fit_bounds(&self, viewport: Viewport, options: FitOptions);

    /// Animate the camera to a point at a fixed zoom.
    fn fly_to(&self, center: Position, zoom: f64);
}
