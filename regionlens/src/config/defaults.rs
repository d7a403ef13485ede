//! Default values and constants for all configuration settings.
//!
//! Contains all `DEFAULT_*` constants and the `ConfigFile::default()`
//! implementation.

use super::settings::*;
use crate::controls::{HOME_FIT, US_BOUNDS};
use crate::geocode::{DEFAULT_SUGGEST_DEBOUNCE, DEFAULT_SUGGEST_LIMIT, DEFAULT_SUGGEST_MIN_LENGTH};
use crate::http::DEFAULT_HTTP_TIMEOUT;
use crate::location::{DEFAULT_MAXIMUM_AGE, DEFAULT_TIMEOUT};
use crate::logging::default_log_file;
use crate::resolver::{
    DEFAULT_LABEL_PROPERTY, DEFAULT_REGION_FIT, DEFAULT_REGION_SOURCE, DEFAULT_REGION_SOURCE_LAYER,
};

// =============================================================================
// Servers
// =============================================================================

/// Default Nominatim root.
pub const DEFAULT_NOMINATIM_URL: &str = "http://localhost:8081/";

/// Default TileJSON root (tileserver-gl `data/` directory).
pub const DEFAULT_TILEJSON_URL: &str = "http://localhost:8080/data/";

/// Default vector tile root (pg_tileserv).
pub const DEFAULT_VECTOR_TILE_URL: &str = "http://localhost:7800/";

/// Default glyph server root.
pub const DEFAULT_FONT_URL: &str = "http://localhost:8080/";

impl Default for ConfigFile {
    fn default() -> Self {
        let config_dir = super::file::config_directory();

        Self {
            servers: ServerSettings {
                nominatim_url: DEFAULT_NOMINATIM_URL.to_string(),
                tilejson_url: DEFAULT_TILEJSON_URL.to_string(),
                vector_tile_url: DEFAULT_VECTOR_TILE_URL.to_string(),
                font_url: DEFAULT_FONT_URL.to_string(),
                timeout: DEFAULT_HTTP_TIMEOUT.as_secs(),
            },
            map: MapSettings {
                home_bounds: US_BOUNDS,
                home_padding: HOME_FIT.padding,
                home_max_zoom: HOME_FIT.max_zoom,
                home_duration_ms: HOME_FIT.duration.as_millis() as u64,
            },
            locate: LocateSettings {
                source: DEFAULT_REGION_SOURCE.to_string(),
                source_layer: DEFAULT_REGION_SOURCE_LAYER.to_string(),
                label_property: DEFAULT_LABEL_PROPERTY.to_string(),
                high_accuracy: true,
                timeout: DEFAULT_TIMEOUT.as_secs(),
                maximum_age: DEFAULT_MAXIMUM_AGE.as_secs(),
                padding: DEFAULT_REGION_FIT.padding,
                max_zoom: DEFAULT_REGION_FIT.max_zoom,
                duration_ms: DEFAULT_REGION_FIT.duration.as_millis() as u64,
            },
            search: SearchSettings {
                min_length: DEFAULT_SUGGEST_MIN_LENGTH,
                limit: DEFAULT_SUGGEST_LIMIT,
                debounce_ms: DEFAULT_SUGGEST_DEBOUNCE.as_millis() as u64,
            },
            layers: LayerSettings { enabled: None },
            logging: LoggingSettings {
                file: config_dir.join(default_log_file()),
            },
        }
    }
}
