//! Source, layer and camera descriptors passed to the rendering engine.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Data binding a layer draws from.
///
/// Serializes to the engine's style-document shape (`{"type": "vector", ...}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceSpec {
    /// Vector tiles, addressed either by a TileJSON `url` or a `tiles` template list.
    Vector {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tiles: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
        #[serde(rename = "minzoom", default)]
        min_zoom: u8,
        #[serde(rename = "maxzoom", default = "default_max_zoom")]
        max_zoom: u8,
    },
    /// Raster image tiles.
    Raster {
        tiles: Vec<String>,
        #[serde(rename = "tileSize", default = "default_tile_size")]
        tile_size: u32,
    },
}

fn default_max_zoom() -> u8 {
    22
}

fn default_tile_size() -> u32 {
    256
}

impl SourceSpec {
    /// Vector source backed by `{z}/{x}/{y}` tile templates.
    pub fn vector_tiles(tiles: Vec<String>) -> Self {
        SourceSpec::Vector {
            tiles,
            url: None,
            min_zoom: 0,
            max_zoom: default_max_zoom(),
        }
    }

    /// Vector source backed by a TileJSON document.
    pub fn vector_url(url: impl Into<String>) -> Self {
        SourceSpec::Vector {
            tiles: Vec::new(),
            url: Some(url.into()),
            min_zoom: 0,
            max_zoom: default_max_zoom(),
        }
    }

    pub fn raster(tiles: Vec<String>) -> Self {
        SourceSpec::Raster {
            tiles,
            tile_size: default_tile_size(),
        }
    }
}

/// Render type of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Fill,
    Line,
    Symbol,
    Raster,
}

/// A renderable layer, keyed by `id`, referencing a source by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerSpec {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: LayerKind,
    pub source: String,
    #[serde(
        rename = "source-layer",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_layer: Option<String>,
    #[serde(rename = "minzoom", default, skip_serializing_if = "Option::is_none")]
    pub min_zoom: Option<f64>,
    /// Opaque paint properties, passed through untouched.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub paint: Value,
    /// Opaque layout properties, passed through untouched.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub layout: Value,
}

impl LayerSpec {
    pub fn new(id: impl Into<String>, kind: LayerKind, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            source: source.into(),
            source_layer: None,
            min_zoom: None,
            paint: Value::Null,
            layout: Value::Null,
        }
    }

    pub fn with_source_layer(mut self, source_layer: impl Into<String>) -> Self {
        self.source_layer = Some(source_layer.into());
        self
    }

    pub fn with_min_zoom(mut self, min_zoom: f64) -> Self {
        self.min_zoom = Some(min_zoom);
        self
    }

    pub fn with_paint(mut self, paint: Value) -> Self {
        self.paint = paint;
        self
    }

    pub fn with_layout(mut self, layout: Value) -> Self {
        self.layout = layout;
        self
    }
}

/// Camera constraints for fitting a bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    /// Padding in screen pixels around the box
    pub padding: u32,
    /// Zoom ceiling
    pub max_zoom: f64,
    /// Animation duration
    pub duration: Duration,
}

impl FitOptions {
    pub const fn new(padding: u32, max_zoom: f64, duration: Duration) -> Self {
        Self {
            padding,
            max_zoom,
            duration,
        }
    }
}
