//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization and map client
//! construction to reduce duplication across command handlers.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use regionlens::config::{config_file_path, ConfigFile};
use regionlens::controls::MapClient;
use regionlens::engine::InMemoryEngine;
use regionlens::geocode::NominatimGeocoder;
use regionlens::geometry::geojson::region_features_from_slice;
use regionlens::geometry::{Position, RegionFeature};
use regionlens::http::AsyncReqwestClient;
use regionlens::location::{CachingLocationProvider, FixedLocationProvider, LocationFailure};
use regionlens::logging::{init_logging, LoggingGuard};
use tokio::runtime::Runtime;
use tracing::info;

use crate::error::CliError;

/// Map client as assembled by the CLI: in-memory engine, fixed position
/// reused within `maximum_age`, live Nominatim backend.
pub type CliClient = MapClient<
    InMemoryEngine,
    CachingLocationProvider<FixedLocationProvider>,
    NominatimGeocoder<AsyncReqwestClient>,
>;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    #[allow(dead_code)]
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
    config_path: PathBuf,
}

impl CliRunner {
    /// Load config and initialize logging.
    ///
    /// `config_path` overrides `~/.regionlens/config.ini`. With `verbose`,
    /// log lines are mirrored to stderr.
    pub fn new(config_path: Option<PathBuf>, verbose: bool) -> Result<Self, CliError> {
        let config_path = config_path.unwrap_or_else(config_file_path);
        let config = ConfigFile::load_from(&config_path)?;

        let log_path = &config.logging.file;
        let log_dir = log_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let log_file = log_path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "regionlens.log".to_string());

        let logging_guard = init_logging(&log_dir, &log_file, verbose)
            .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
            config_path,
        })
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("RegionLens v{}", regionlens::VERSION);
        info!(config = %self.config_path.display(), "RegionLens CLI: {} command", command);
    }

    /// Run a future to completion on a fresh multi-threaded runtime.
    pub fn block_on<F: Future>(&self, future: F) -> Result<F::Output, CliError> {
        let runtime = Runtime::new().map_err(CliError::Runtime)?;
        Ok(runtime.block_on(future))
    }

    /// Build a map client from the loaded configuration.
    ///
    /// `position` stands in for the device fix; without one, locate reports
    /// geolocation as unsupported. `features` are materialized under the
    /// configured region source before the client is returned.
    pub fn create_client(
        &self,
        position: Option<Position>,
        features: Vec<RegionFeature>,
    ) -> Result<CliClient, CliError> {
        let config = &self.config;

        let engine = Arc::new(InMemoryEngine::new());
        if !features.is_empty() {
            info!(count = features.len(), "Loading region features");
            engine.load_features(&config.locate.source, &config.locate.source_layer, features);
        }

        let provider = CachingLocationProvider::new(match position {
            Some(position) => FixedLocationProvider::new(position),
            None => FixedLocationProvider::failing(LocationFailure::Unsupported),
        });

        let http = AsyncReqwestClient::with_timeout(config.http_timeout())?;
        let geocoder = NominatimGeocoder::new(&config.servers.nominatim_url, http)?
            .with_policy(config.suggest_policy());

        Ok(MapClient::new(
            engine,
            provider,
            geocoder,
            config.catalog(),
            config.client_options(),
        ))
    }
}

/// Read region polygons from a GeoJSON FeatureCollection file.
pub fn read_features(path: &Path) -> Result<Vec<RegionFeature>, CliError> {
    let display = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|error| CliError::FileRead {
        path: display.clone(),
        error,
    })?;
    let features = region_features_from_slice(&bytes).map_err(|error| CliError::Features {
        path: display,
        error,
    })?;
    info!(path = %path.display(), count = features.len(), "Region features read");
    Ok(features)
}
