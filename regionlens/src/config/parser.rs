//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use std::path::PathBuf;
use std::str::FromStr;

use ini::{Ini, Properties};
use reqwest::Url;

use super::file::ConfigFileError;
use super::settings::ConfigFile;
use crate::geometry::Viewport;

/// Highest zoom accepted for camera fits.
const MAX_ZOOM: f64 = 24.0;

/// Nominatim rejects larger result limits.
const MAX_SEARCH_LIMIT: usize = 50;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [servers] section
    if let Some(section) = ini.section(Some("servers")) {
        let s = Section::new("servers", section);
        if let Some(v) = s.url("nominatim_url")? {
            config.servers.nominatim_url = v;
        }
        if let Some(v) = s.url("tilejson_url")? {
            config.servers.tilejson_url = v;
        }
        if let Some(v) = s.url("vector_tile_url")? {
            config.servers.vector_tile_url = v;
        }
        if let Some(v) = s.url("font_url")? {
            config.servers.font_url = v;
        }
        if let Some(v) = s.number::<u64>("timeout")? {
            if v == 0 {
                return Err(s.invalid("timeout", "0", "must be at least 1 second"));
            }
            config.servers.timeout = v;
        }
    }

    // [map] section
    if let Some(section) = ini.section(Some("map")) {
        let s = Section::new("map", section);
        if let Some(v) = s.viewport("home_bounds")? {
            config.map.home_bounds = v;
        }
        if let Some(v) = s.number("home_padding")? {
            config.map.home_padding = v;
        }
        if let Some(v) = s.zoom("home_max_zoom")? {
            config.map.home_max_zoom = v;
        }
        if let Some(v) = s.number("home_duration_ms")? {
            config.map.home_duration_ms = v;
        }
    }

    // [locate] section
    if let Some(section) = ini.section(Some("locate")) {
        let s = Section::new("locate", section);
        if let Some(v) = s.text("source") {
            config.locate.source = v;
        }
        if let Some(v) = s.text("source_layer") {
            config.locate.source_layer = v;
        }
        if let Some(v) = s.text("label_property") {
            config.locate.label_property = v;
        }
        if let Some(v) = s.boolean("high_accuracy")? {
            config.locate.high_accuracy = v;
        }
        if let Some(v) = s.number("timeout")? {
            config.locate.timeout = v;
        }
        if let Some(v) = s.number("maximum_age")? {
            config.locate.maximum_age = v;
        }
        if let Some(v) = s.number("padding")? {
            config.locate.padding = v;
        }
        if let Some(v) = s.zoom("max_zoom")? {
            config.locate.max_zoom = v;
        }
        if let Some(v) = s.number("duration_ms")? {
            config.locate.duration_ms = v;
        }
    }

    // [search] section
    if let Some(section) = ini.section(Some("search")) {
        let s = Section::new("search", section);
        if let Some(v) = s.number::<usize>("min_length")? {
            if v == 0 {
                return Err(s.invalid("min_length", "0", "must be at least 1"));
            }
            config.search.min_length = v;
        }
        if let Some(v) = s.number::<usize>("limit")? {
            if v == 0 || v > MAX_SEARCH_LIMIT {
                return Err(s.invalid(
                    "limit",
                    &v.to_string(),
                    &format!("must be between 1 and {}", MAX_SEARCH_LIMIT),
                ));
            }
            config.search.limit = v;
        }
        if let Some(v) = s.number("debounce_ms")? {
            config.search.debounce_ms = v;
        }
    }

    // [layers] section
    if let Some(section) = ini.section(Some("layers")) {
        if let Some(v) = section.get("enabled") {
            config.layers.enabled = parse_key_list(v);
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = expand_tilde(v);
            }
        }
    }

    Ok(config)
}

/// One INI section plus its name for error reporting.
struct Section<'a> {
    name: &'static str,
    props: &'a Properties,
}

impl<'a> Section<'a> {
    fn new(name: &'static str, props: &'a Properties) -> Self {
        Self { name, props }
    }

    fn invalid(&self, key: &str, value: &str, reason: &str) -> ConfigFileError {
        ConfigFileError::InvalidValue {
            section: self.name.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Trimmed value; blank values count as unset.
    fn raw(&self, key: &str) -> Option<&'a str> {
        self.props
            .get(key)
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    fn text(&self, key: &str) -> Option<String> {
        self.raw(key).map(str::to_string)
    }

    fn number<T: FromStr>(&self, key: &str) -> Result<Option<T>, ConfigFileError> {
        self.raw(key)
            .map(|v| {
                v.parse::<T>()
                    .map_err(|_| self.invalid(key, v, "must be a non-negative integer"))
            })
            .transpose()
    }

    fn zoom(&self, key: &str) -> Result<Option<f64>, ConfigFileError> {
        self.raw(key)
            .map(|v| match v.parse::<f64>() {
                Ok(z) if (0.0..=MAX_ZOOM).contains(&z) => Ok(z),
                _ => Err(self.invalid(
                    key,
                    v,
                    &format!("must be a number between 0 and {}", MAX_ZOOM),
                )),
            })
            .transpose()
    }

    fn boolean(&self, key: &str) -> Result<Option<bool>, ConfigFileError> {
        self.raw(key)
            .map(|v| match v.to_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(true),
                "false" | "no" | "off" | "0" => Ok(false),
                _ => Err(self.invalid(key, v, "must be true or false")),
            })
            .transpose()
    }

    fn url(&self, key: &str) -> Result<Option<String>, ConfigFileError> {
        self.raw(key)
            .map(|v| match Url::parse(v) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(v.to_string()),
                Ok(_) => Err(self.invalid(key, v, "must be an http or https URL")),
                Err(e) => Err(self.invalid(key, v, &e.to_string())),
            })
            .transpose()
    }

    /// `min_lon, min_lat, max_lon, max_lat`
    fn viewport(&self, key: &str) -> Result<Option<Viewport>, ConfigFileError> {
        self.raw(key)
            .map(|v| {
                let reason = "must be min_lon,min_lat,max_lon,max_lat with min <= max";
                let values = v
                    .split(',')
                    .map(|n| n.trim().parse::<f64>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|_| self.invalid(key, v, reason))?;
                Viewport::from_bbox(&values).ok_or_else(|| self.invalid(key, v, reason))
            })
            .transpose()
    }
}

/// Comma-separated layer keys.
///
/// A blank value means "use the catalog defaults"; `none` enables nothing.
fn parse_key_list(value: &str) -> Option<Vec<String>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if value.eq_ignore_ascii_case("none") {
        return Some(Vec::new());
    }
    Some(
        value
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Expand `~/` prefix to the user's home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
