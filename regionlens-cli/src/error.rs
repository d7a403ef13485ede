//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use regionlens::config::ConfigFileError;
use regionlens::geocode::GeocodeError;
use regionlens::geometry::geojson::GeoJsonError;
use regionlens::http::HttpError;
use regionlens::resolver::ResolverBusy;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to create the HTTP client
    HttpClient(HttpError),
    /// Geocoder setup or request failed
    Geocode(GeocodeError),
    /// Failed to read a GeoJSON features file
    FileRead { path: String, error: std::io::Error },
    /// Features file is not usable GeoJSON
    Features { path: String, error: GeoJsonError },
    /// Invalid command-line argument
    InvalidArgument(String),
    /// A locate request was already running
    Busy,
    /// Failed to start the async runtime
    Runtime(std::io::Error),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Geocode(GeocodeError::Network(_)) => {
                eprintln!();
                eprintln!("Common issues:");
                eprintln!("  1. Nominatim not running: check servers.nominatim_url");
                eprintln!("  2. Public instances require a descriptive User-Agent and rate limiting");
            }
            CliError::Config(_) => {
                eprintln!();
                eprintln!("Run 'regionlens config path' to locate the configuration file.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::HttpClient(e) => write!(f, "{}", e),
            CliError::Geocode(e) => write!(f, "Geocoding failed: {}", e),
            CliError::FileRead { path, error } => {
                write!(f, "Failed to read file '{}': {}", path, error)
            }
            CliError::Features { path, error } => {
                write!(f, "Failed to load features from '{}': {}", path, error)
            }
            CliError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            CliError::Busy => write!(f, "A locate request is already in progress"),
            CliError::Runtime(e) => write!(f, "Failed to start async runtime: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::HttpClient(e) => Some(e),
            CliError::Geocode(e) => Some(e),
            CliError::FileRead { error, .. } => Some(error),
            CliError::Features { error, .. } => Some(error),
            CliError::Runtime(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<HttpError> for CliError {
    fn from(e: HttpError) -> Self {
        CliError::HttpClient(e)
    }
}

impl From<GeocodeError> for CliError {
    fn from(e: GeocodeError) -> Self {
        CliError::Geocode(e)
    }
}

impl From<ResolverBusy> for CliError {
    fn from(_: ResolverBusy) -> Self {
        CliError::Busy
    }
}
