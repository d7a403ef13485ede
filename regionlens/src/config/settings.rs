//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

use crate::geometry::Viewport;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    /// Backend server endpoints
    pub servers: ServerSettings,
    /// Home view
    pub map: MapSettings,
    /// Locate / region resolution
    pub locate: LocateSettings,
    /// Search box behaviour
    pub search: SearchSettings,
    /// Initially enabled overlays
    pub layers: LayerSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Backend server endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    /// Nominatim root; the search endpoint is `{nominatim_url}search`
    pub nominatim_url: String,
    /// Root serving `{name}.json` TileJSON documents
    pub tilejson_url: String,
    /// Root serving `{table}/{z}/{x}/{y}.pbf` vector tiles
    pub vector_tile_url: String,
    /// Root serving `fonts/{fontstack}/{range}.pbf` glyphs
    pub font_url: String,
    /// HTTP timeout in seconds
    pub timeout: u64,
}

/// Home view.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub home_bounds: Viewport,
    pub home_padding: u32,
    pub home_max_zoom: f64,
    pub home_duration_ms: u64,
}

/// Region resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct LocateSettings {
    /// Source id queried for region features
    pub source: String,
    /// Source layer within `source`
    pub source_layer: String,
    /// Feature property logged as the region name
    pub label_property: String,
    pub high_accuracy: bool,
    /// Position timeout in seconds
    pub timeout: u64,
    /// Maximum age of a reusable fix in seconds
    pub maximum_age: u64,
    pub padding: u32,
    pub max_zoom: f64,
    pub duration_ms: u64,
}

/// Search box.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    pub min_length: usize,
    pub limit: usize,
    pub debounce_ms: u64,
}

/// Overlays enabled at load.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSettings {
    /// `None` uses the catalog defaults
    pub enabled: Option<Vec<String>>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Log file path
    pub file: PathBuf,
}
