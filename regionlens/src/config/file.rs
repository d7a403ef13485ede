//! Configuration file handling for ~/.regionlens/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

pub use super::defaults::*;
pub use super::settings::*;

use crate::controls::ClientOptions;
use crate::engine::FitOptions;
use crate::geocode::SuggestPolicy;
use crate::layers::{LayerCatalog, TileEndpoint};
use crate::location::PositionOptions;
use crate::resolver::ResolverConfig;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.regionlens/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = config_file_path();
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path (~/.regionlens/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        let path = config_file_path();
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Create the default config file if it doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn ensure_exists() -> Result<PathBuf, ConfigFileError> {
        let path = config_file_path();
        if !path.exists() {
            Self::default().save_to(&path)?;
        }
        Ok(path)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.servers.timeout)
    }

    pub fn home_fit(&self) -> FitOptions {
        FitOptions::new(
            self.map.home_padding,
            self.map.home_max_zoom,
            Duration::from_millis(self.map.home_duration_ms),
        )
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        let locate = &self.locate;
        ResolverConfig {
            label_property: locate.label_property.clone(),
            ..ResolverConfig::default()
        }
        .with_target(locate.source.clone(), locate.source_layer.clone())
        .with_position_options(PositionOptions {
            enable_high_accuracy: locate.high_accuracy,
            timeout: Duration::from_secs(locate.timeout),
            maximum_age: Duration::from_secs(locate.maximum_age),
        })
        .with_fit(FitOptions::new(
            locate.padding,
            locate.max_zoom,
            Duration::from_millis(locate.duration_ms),
        ))
    }

    pub fn suggest_policy(&self) -> SuggestPolicy {
        SuggestPolicy {
            min_length: self.search.min_length,
            limit: self.search.limit,
            debounce: Duration::from_millis(self.search.debounce_ms),
        }
    }

    /// Everything a [`crate::controls::MapClient`] needs from the file.
    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            home_bounds: self.map.home_bounds,
            home_fit: self.home_fit(),
            resolver: self.resolver_config(),
            suggest: self.suggest_policy(),
            initial_layers: self.layers.enabled.clone(),
        }
    }

    /// The built-in overlay catalog pointed at the configured tile servers.
    pub fn catalog(&self) -> LayerCatalog {
        LayerCatalog::us_default(&self.servers.tilejson_url, &self.servers.vector_tile_url)
    }

    /// Glyph template for the style's `glyphs` property.
    pub fn glyph_url(&self) -> String {
        TileEndpoint::new(&self.servers.font_url).glyph_url()
    }
}

/// Get the path to the config directory (~/.regionlens).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".regionlens")
}

/// Get the path to the config file (~/.regionlens/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}
