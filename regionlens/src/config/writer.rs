//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let bounds = config.map.home_bounds;
    let enabled = match &config.layers.enabled {
        None => String::new(),
        Some(keys) if keys.is_empty() => "none".to_string(),
        Some(keys) => keys.join(", "),
    };

    format!(
        r#"[servers]
; Nominatim root. Searches go to <nominatim_url>search
nominatim_url = {}
; Root serving <name>.json TileJSON documents for the border and state overlays
tilejson_url = {}
; Root serving <table>/{{z}}/{{x}}/{{y}}.pbf vector tiles for the county overlays
vector_tile_url = {}
; Root serving fonts/<fontstack>/<range>.pbf glyphs
font_url = {}
; HTTP timeout in seconds
timeout = {}

[map]
; Home view as min_lon, min_lat, max_lon, max_lat
home_bounds = {}, {}, {}, {}
home_padding = {}
home_max_zoom = {}
home_duration_ms = {}

[locate]
; Source and source layer holding the region polygons
source = {}
source_layer = {}
; Feature property used to name the matched region
label_property = {}
high_accuracy = {}
; Position timeout and maximum fix age, in seconds
timeout = {}
maximum_age = {}
; Camera fit for the matched region
padding = {}
max_zoom = {}
duration_ms = {}

[search]
; Suggestions start after this many characters
min_length = {}
; Maximum suggestions per request (1-50)
limit = {}
; Delay after the last keystroke before suggesting
debounce_ms = {}

[layers]
; Comma-separated overlay keys enabled at load.
; Leave blank for the built-in defaults, or "none" to start with nothing.
; Keys: carto-light, us-border, us-states, us-states-symbols, us-counties, us-counties-labels
enabled = {}

[logging]
file = {}
"#,
        config.servers.nominatim_url,
        config.servers.tilejson_url,
        config.servers.vector_tile_url,
        config.servers.font_url,
        config.servers.timeout,
        bounds.min_lon,
        bounds.min_lat,
        bounds.max_lon,
        bounds.max_lat,
        config.map.home_padding,
        config.map.home_max_zoom,
        config.map.home_duration_ms,
        config.locate.source,
        config.locate.source_layer,
        config.locate.label_property,
        config.locate.high_accuracy,
        config.locate.timeout,
        config.locate.maximum_age,
        config.locate.padding,
        config.locate.max_zoom,
        config.locate.duration_ms,
        config.search.min_length,
        config.search.limit,
        config.search.debounce_ms,
        enabled,
        path_to_string(&config.logging.file),
    )
}

/// Convert a path to a string, using ~ for home directory.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::super::settings::ConfigFile;
    use super::to_config_string;
    use crate::geometry::Viewport;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.ini");

        let config = ConfigFile::default();
        config.save_to(&config_path).unwrap();

        let loaded = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_modified_config_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested/dir/config.ini");

        let mut config = ConfigFile::default();
        config.servers.nominatim_url = "https://geo.example.org/".to_string();
        config.map.home_bounds = Viewport::new(-9.5, 36.0, 3.3, 43.8);
        config.map.home_max_zoom = 5.5;
        config.locate.high_accuracy = false;
        config.search.limit = 10;
        config.layers.enabled = Some(vec!["us-states".to_string(), "us-counties".to_string()]);
        config.logging.file = temp_dir.path().join("regionlens.log");
        config.save_to(&config_path).unwrap();

        let loaded = ConfigFile::load_from(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_empty_layer_list_written_as_none() {
        let mut config = ConfigFile::default();
        config.layers.enabled = Some(vec![]);

        let content = to_config_string(&config);
        assert!(content.contains("enabled = none"));
    }

    #[test]
    fn test_output_is_commented() {
        let content = to_config_string(&ConfigFile::default());
        assert!(content.contains("[servers]"));
        assert!(content.contains("[logging]"));
        assert!(content.contains("; Suggestions start after"));
    }
}
