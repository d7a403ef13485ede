//! Device location provider abstraction.
//!
//! A [`LocationProvider`] performs one-shot position acquisition. The region
//! resolver owns the timeout; providers only report what the hardware said.
//!
//! - [`FixedLocationProvider`] - answers with a preset position or failure
//! - [`UnsupportedLocationProvider`] - for hosts without location hardware
//! - [`CachingLocationProvider`] - honors [`PositionOptions::maximum_age`]
//!   by reusing a recent fix

mod cache;

pub use cache::CachingLocationProvider;

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

use crate::geometry::Position;

/// Default time allowed for a position fix.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default maximum age of a cached fix that may be reused.
pub const DEFAULT_MAXIMUM_AGE: Duration = Duration::from_secs(75);

/// Options for a single position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    /// Request GPS-grade accuracy
    pub enable_high_accuracy: bool,
    /// Upper bound on acquisition time
    pub timeout: Duration,
    /// Oldest cached fix that is acceptable
    pub maximum_age: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout: DEFAULT_TIMEOUT,
            maximum_age: DEFAULT_MAXIMUM_AGE,
        }
    }
}

/// Why a position could not be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LocationFailure {
    /// The user or platform denied location access.
    #[error("Location permission denied")]
    PermissionDenied,

    /// No fix within the configured timeout.
    #[error("Timed out waiting for a position fix")]
    Timeout,

    /// Hardware present but no position available.
    #[error("Position unavailable")]
    Unavailable,

    /// The host has no location capability.
    #[error("Geolocation not supported")]
    Unsupported,
}

/// One-shot device position acquisition.
pub trait LocationProvider: Send + Sync {
    /// Request the current position.
    fn current_position(
        &self,
        options: &PositionOptions,
    ) -> impl Future<Output = Result<Position, LocationFailure>> + Send;
}

/// Provider answering every request with a preset result.
///
/// Used by the CLI for `--lon/--lat` and by tests.
#[derive(Debug, Clone)]
pub struct FixedLocationProvider {
    result: Result<Position, LocationFailure>,
}

impl FixedLocationProvider {
    pub fn new(position: Position) -> Self {
        Self {
            result: Ok(position),
        }
    }

    pub fn failing(failure: LocationFailure) -> Self {
        Self {
            result: Err(failure),
        }
    }
}

impl LocationProvider for FixedLocationProvider {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Position, LocationFailure> {
        self.result
    }
}

/// Provider for hosts without location hardware.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedLocationProvider;

impl LocationProvider for UnsupportedLocationProvider {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Position, LocationFailure> {
        Err(LocationFailure::Unsupported)
    }
}
