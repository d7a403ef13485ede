//! Geocode error types.

use thiserror::Error;

use crate::http::HttpError;

/// Errors from the geocoding backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    /// Transport failure or non-success status.
    #[error("Geocoding request failed: {0}")]
    Network(#[from] HttpError),

    /// Response body was not the expected JSON shape.
    #[error("Failed to parse geocoding response: {0}")]
    Parse(String),

    /// Query was empty after trimming; no request was made.
    #[error("Search query is empty")]
    EmptyQuery,

    /// Configured server URL is not a usable base URL.
    #[error("Invalid geocoding server URL '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}
