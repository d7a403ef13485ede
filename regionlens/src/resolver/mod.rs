//! Region Resolver
//!
//! Turns a user-initiated locate action into the administrative region that
//! encloses the device, and frames the camera on it.
//!
//! # State machine
//!
//! ```text
//! Idle ──locate()──► AwaitingPosition ──fix──► AwaitingFeatures ──► Resolved
//!                          │                         ├──► NoMatch
//!                          │                         └──► NotReady
//!                          └──failure/timeout──► Failed(reason)
//! ```
//!
//! Every accepted [`RegionResolver::locate`] call yields exactly one
//! [`LocateOutcome`] and returns the resolver to `Idle`. A call made while
//! another is in flight is rejected with [`ResolverBusy`] and does not touch
//! the location hardware.
//!
//! Only features whose tiles are already materialized by the engine are
//! considered, so a position outside the loaded viewport yields `NoMatch`.
//! When the engine reports its style is not loaded the resolver answers
//! `NotReady` at once without querying; callers may retry after the next
//! load event.

mod config;
mod outcome;

pub use config::{
    ResolverConfig, DEFAULT_LABEL_PROPERTY, DEFAULT_REGION_FIT, DEFAULT_REGION_SOURCE,
    DEFAULT_REGION_SOURCE_LAYER,
};
pub use outcome::{LocateOutcome, Resolution, ResolverBusy, ResolverState};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::engine::MapEngine;
use crate::geometry::{first_match, Position};
use crate::location::{LocationFailure, LocationProvider};

/// Resolves the device position to a region feature of one target layer.
pub struct RegionResolver<E: ?Sized, L> {
    engine: Arc<E>,
    provider: L,
    config: ResolverConfig,
    state: Mutex<ResolverState>,
    invocations: AtomicU64,
}

/// Resets the resolver to `Idle` when an invocation ends, including when the
/// locate future is dropped mid-flight.
struct FlightGuard<'a> {
    state: &'a Mutex<ResolverState>,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        *self.state.lock() = ResolverState::Idle;
    }
}

impl<E, L> RegionResolver<E, L>
where
    E: MapEngine + ?Sized,
    L: LocationProvider,
{
    pub fn new(engine: Arc<E>, provider: L, config: ResolverConfig) -> Self {
        Self {
            engine,
            provider,
            config,
            state: Mutex::new(ResolverState::Idle),
            invocations: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Current state of the in-flight invocation, if any.
    pub fn state(&self) -> ResolverState {
        *self.state.lock()
    }

    /// Run one locate invocation.
    ///
    /// Returns `Err(ResolverBusy)` if another invocation has not reached a
    /// terminal state yet.
    pub async fn locate(&self) -> Result<LocateOutcome, ResolverBusy> {
        let _flight = self.begin()?;
        let invocation = self.invocations.fetch_add(1, Ordering::Relaxed) + 1;
        let options = self.config.position_options;

        debug!(
            invocation,
            high_accuracy = options.enable_high_accuracy,
            timeout_ms = options.timeout.as_millis() as u64,
            maximum_age_ms = options.maximum_age.as_millis() as u64,
            "Requesting device position"
        );

        let acquired =
            tokio::time::timeout(options.timeout, self.provider.current_position(&options)).await;

        let position = match acquired {
            Ok(Ok(position)) if position.is_valid() => position,
            Ok(Ok(position)) => {
                warn!(invocation, %position, "Provider returned invalid coordinates");
                return Ok(LocateOutcome::Failed(LocationFailure::Unavailable));
            }
            Ok(Err(failure)) => {
                warn!(invocation, reason = %failure, "Error retrieving location");
                return Ok(LocateOutcome::Failed(failure));
            }
            Err(_) => {
                warn!(
                    invocation,
                    timeout_ms = options.timeout.as_millis() as u64,
                    "Position request timed out"
                );
                return Ok(LocateOutcome::Failed(LocationFailure::Timeout));
            }
        };

        info!(invocation, %position, "User coordinates acquired");
        *self.state.lock() = ResolverState::AwaitingFeatures;

        let outcome = self.resolve_at(position);
        debug!(invocation, outcome = outcome.kind(), "Locate finished");
        Ok(outcome)
    }

    /// Match `position` against the materialized features of the target
    /// layer and frame the camera on the match.
    ///
    /// This is the part of [`locate`](Self::locate) that runs after a fix has
    /// been obtained; it does not touch the location provider or the flight
    /// guard.
    pub fn resolve_at(&self, position: Position) -> LocateOutcome {
        if !self.engine.is_style_loaded() {
            warn!("Map style not loaded yet");
            return LocateOutcome::NotReady { position };
        }

        let features = self
            .engine
            .query_source_features(&self.config.source, &self.config.source_layer);
        debug!(
            source = %self.config.source,
            source_layer = %self.config.source_layer,
            candidates = features.len(),
            "Queried materialized region features"
        );

        let Some(feature) = first_match(position, &features) else {
            info!(%position, "No region found for this location");
            return LocateOutcome::NoMatch { position };
        };

        let Some(viewport) = feature.bounding_box() else {
            warn!(%position, "Matched region has no usable bounding box");
            return LocateOutcome::NoMatch { position };
        };

        info!(
            %position,
            %viewport,
            region = feature.property_str(&self.config.label_property).unwrap_or("<unnamed>"),
            "User is in region"
        );
        self.engine.fit_bounds(viewport, self.config.fit);

        LocateOutcome::Resolved(Resolution {
            position,
            feature: feature.clone(),
            viewport,
        })
    }

    fn begin(&self) -> Result<FlightGuard<'_>, ResolverBusy> {
        let mut state = self.state.lock();
        if *state != ResolverState::Idle {
            debug!(state = ?*state, "Locate already in progress, ignoring trigger");
            return Err(ResolverBusy);
        }
        *state = ResolverState::AwaitingPosition;
        Ok(FlightGuard { state: &self.state })
    }
}

#[cfg(test)]
mod tests;
