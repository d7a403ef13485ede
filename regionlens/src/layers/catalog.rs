//! Layer catalog: the fixed set of toggleable overlays.

use std::collections::{HashMap, HashSet};

use serde_json::json;
use thiserror::Error;

use crate::engine::{LayerKind, LayerSpec, SourceSpec};

/// Desired visibility of one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerToggle {
    pub key: String,
    pub enabled: bool,
}

impl LayerToggle {
    pub fn new(key: impl Into<String>, enabled: bool) -> Self {
        Self {
            key: key.into(),
            enabled,
        }
    }

    pub fn on(key: impl Into<String>) -> Self {
        Self::new(key, true)
    }

    pub fn off(key: impl Into<String>) -> Self {
        Self::new(key, false)
    }
}

/// A toggle key bound to the source and layer it attaches.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerDefinition {
    pub key: String,
    pub source_id: String,
    pub source: SourceSpec,
    pub layer: LayerSpec,
    pub enabled_by_default: bool,
}

impl LayerDefinition {
    pub fn new(
        key: impl Into<String>,
        source_id: impl Into<String>,
        source: SourceSpec,
        layer: LayerSpec,
    ) -> Self {
        Self {
            key: key.into(),
            source_id: source_id.into(),
            source,
            layer,
            enabled_by_default: false,
        }
    }

    pub fn enabled_by_default(mut self) -> Self {
        self.enabled_by_default = true;
        self
    }
}

/// Errors building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Duplicate layer key '{0}'")]
    DuplicateKey(String),

    #[error("Duplicate layer id '{0}'")]
    DuplicateLayerId(String),

    /// Two definitions share a source id but disagree on its spec.
    #[error("Conflicting definitions for shared source '{0}'")]
    ConflictingSource(String),

    #[error("Layer '{layer_id}' draws from '{layer_source}' but is bound to source '{source_id}'")]
    SourceMismatch {
        layer_id: String,
        layer_source: String,
        source_id: String,
    },
}

/// Ordered, validated set of layer definitions.
///
/// Catalog order is draw order: definitions are attached bottom-up in the
/// order they appear here.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerCatalog {
    definitions: Vec<LayerDefinition>,
}

impl LayerCatalog {
    pub fn new(definitions: Vec<LayerDefinition>) -> Result<Self, CatalogError> {
        let mut keys = HashSet::new();
        let mut layer_ids = HashSet::new();
        let mut sources: HashMap<&str, &SourceSpec> = HashMap::new();

        for def in &definitions {
            if !keys.insert(def.key.as_str()) {
                return Err(CatalogError::DuplicateKey(def.key.clone()));
            }
            if !layer_ids.insert(def.layer.id.as_str()) {
                return Err(CatalogError::DuplicateLayerId(def.layer.id.clone()));
            }
            if def.layer.source != def.source_id {
                return Err(CatalogError::SourceMismatch {
                    layer_id: def.layer.id.clone(),
                    layer_source: def.layer.source.clone(),
                    source_id: def.source_id.clone(),
                });
            }
            match sources.get(def.source_id.as_str()) {
                Some(existing) if **existing != def.source => {
                    return Err(CatalogError::ConflictingSource(def.source_id.clone()));
                }
                Some(_) => {}
                None => {
                    sources.insert(&def.source_id, &def.source);
                }
            }
        }

        Ok(Self { definitions })
    }

    /// The built-in US overlay set.
    ///
    /// `tilejson_base` serves `{name}.json` TileJSON documents; `vector_base`
    /// serves per-table `{z}/{x}/{y}.pbf` tiles.
    pub fn us_default(tilejson_base: &str, vector_base: &str) -> Self {
        let tilejson = TileEndpoint::new(tilejson_base);
        let vector = TileEndpoint::new(vector_base);

        let definitions = vec![
            LayerDefinition::new(
                "carto-light",
                "carto-light",
                SourceSpec::raster(
                    ["a", "b", "c", "d"]
                        .iter()
                        .map(|s| {
                            format!("https://{s}.basemaps.cartocdn.com/light_all/{{z}}/{{x}}/{{y}}@2x.png")
                        })
                        .collect(),
                ),
                LayerSpec::new("carto-light-layer", LayerKind::Raster, "carto-light"),
            )
            .enabled_by_default(),
            LayerDefinition::new(
                "us-border",
                "us-border",
                SourceSpec::vector_url(tilejson.tilejson_url("us-border")),
                LayerSpec::new("us-border-layer", LayerKind::Line, "us-border")
                    .with_source_layer("tl_2023_us_border")
                    .with_paint(json!({"line-color": "#ff0000", "line-width": 2})),
            ),
            LayerDefinition::new(
                "us-states",
                "us-states",
                SourceSpec::vector_url(tilejson.tilejson_url("us-states")),
                LayerSpec::new("us-states-layer", LayerKind::Line, "us-states")
                    .with_source_layer("tl_2023_us_state")
                    .with_paint(json!({"line-color": "#FF0000", "line-width": 2, "line-opacity": 1})),
            ),
            LayerDefinition::new(
                "us-states-symbols",
                "us-states",
                SourceSpec::vector_url(tilejson.tilejson_url("us-states")),
                LayerSpec::new("us-states-symbols-layer", LayerKind::Symbol, "us-states")
                    .with_source_layer("tl_2023_us_state")
                    .with_layout(json!({
                        "text-field": ["get", "STUSPS"],
                        "text-font": ["Noto Sans Regular"],
                        "text-size": 14
                    }))
                    .with_paint(json!({"text-color": "#000000", "text-opacity": 1})),
            ),
            LayerDefinition::new(
                "us-counties",
                "us_counties",
                SourceSpec::vector_tiles(vec![
                    vector.tile_url("public.us_counties", &["namelsad", "aland", "awater"])
                ]),
                LayerSpec::new("us-counties-layer", LayerKind::Fill, "us_counties")
                    .with_source_layer("public.us_counties")
                    .with_paint(json!({"fill-color": "#0000ff", "fill-opacity": 0.2})),
            )
            .enabled_by_default(),
            LayerDefinition::new(
                "us-counties-labels",
                "us_counties_centroids",
                SourceSpec::vector_tiles(vec![
                    vector.tile_url("public.us_counties_centroids", &["county_name"])
                ]),
                LayerSpec::new("us-counties-label", LayerKind::Symbol, "us_counties_centroids")
                    .with_source_layer("public.us_counties_centroids")
                    .with_min_zoom(8.0)
                    .with_layout(json!({
                        "text-field": ["get", "county_name"],
                        "text-font": ["Noto Sans Regular"],
                        "text-size": 12,
                        "symbol-placement": "point",
                        "text-anchor": "center"
                    }))
                    .with_paint(json!({
                        "text-color": "#000000",
                        "text-halo-color": "#ffffff",
                        "text-halo-width": 1
                    })),
            )
            .enabled_by_default(),
        ];

        Self { definitions }
    }

    pub fn get(&self, key: &str) -> Option<&LayerDefinition> {
        self.definitions.iter().find(|d| d.key == key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|d| d.key.as_str())
    }

    pub fn definitions(&self) -> &[LayerDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// One toggle per entry, set to its default visibility.
    pub fn default_toggles(&self) -> Vec<LayerToggle> {
        self.definitions
            .iter()
            .map(|d| LayerToggle::new(d.key.clone(), d.enabled_by_default))
            .collect()
    }

    /// One toggle per entry: enabled iff its key is in `enabled`.
    pub fn toggles_for<S: AsRef<str>>(&self, enabled: &[S]) -> Vec<LayerToggle> {
        self.definitions
            .iter()
            .map(|d| {
                let on = enabled.iter().any(|k| k.as_ref() == d.key);
                LayerToggle::new(d.key.clone(), on)
            })
            .collect()
    }
}

/// URL builder for a tile or font server root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileEndpoint {
    base: String,
}

impl TileEndpoint {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `{base}/{source_layer}/{z}/{x}/{y}.pbf`, with `?properties=a,b` when
    /// `properties` is non-empty.
    pub fn tile_url(&self, source_layer: &str, properties: &[&str]) -> String {
        let mut url = format!("{}/{}/{{z}}/{{x}}/{{y}}.pbf", self.base, source_layer);
        if !properties.is_empty() {
            url.push_str("?properties=");
            url.push_str(&properties.join(","));
        }
        url
    }

    /// `{base}/{name}.json`
    pub fn tilejson_url(&self, name: &str) -> String {
        format!("{}/{}.json", self.base, name)
    }

    /// `{base}/fonts/{fontstack}/{range}.pbf`
    pub fn glyph_url(&self) -> String {
        format!("{}/fonts/{{fontstack}}/{{range}}.pbf", self.base)
    }
}
