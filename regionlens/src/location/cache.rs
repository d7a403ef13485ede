//! Reuse of recent position fixes.

use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::debug;

use super::{LocationFailure, LocationProvider, PositionOptions};
use crate::geometry::Position;

/// Wraps a provider and answers from the last successful fix while it is
/// younger than the request's `maximum_age`.
///
/// Failures are never cached.
pub struct CachingLocationProvider<P> {
    inner: P,
    last_fix: Mutex<Option<(Position, Instant)>>,
}

impl<P: LocationProvider> CachingLocationProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            last_fix: Mutex::new(None),
        }
    }

    fn cached(&self, options: &PositionOptions) -> Option<Position> {
        let guard = self.last_fix.lock();
        let (position, captured_at) = (*guard)?;
        let age = captured_at.elapsed();
        (age <= options.maximum_age).then(|| {
            debug!(age_ms = age.as_millis() as u64, "Reusing cached position fix");
            position
        })
    }
}

impl<P: LocationProvider> LocationProvider for CachingLocationProvider<P> {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Position, LocationFailure> {
        if let Some(position) = self.cached(options) {
            return Ok(position);
        }

        let position = self.inner.current_position(options).await?;
        *self.last_fix.lock() = Some((position, Instant::now()));
        Ok(position)
    }
}
