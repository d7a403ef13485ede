//! Locate control.

use std::sync::Arc;

use tracing::{debug, error};

use crate::engine::MapEngine;
use crate::events::{EventBus, MapEvent};
use crate::location::LocationProvider;
use crate::resolver::{
    LocateOutcome, RegionResolver, ResolverBusy, ResolverConfig, ResolverState,
};

/// Button that runs the region resolver and reports its outcome.
pub struct LocateControl<E: ?Sized, L> {
    resolver: RegionResolver<E, L>,
    events: EventBus,
}

impl<E, L> LocateControl<E, L>
where
    E: MapEngine + ?Sized,
    L: LocationProvider,
{
    pub fn new(engine: Arc<E>, provider: L, config: ResolverConfig, events: EventBus) -> Self {
        Self {
            resolver: RegionResolver::new(engine, provider, config),
            events,
        }
    }

    pub fn resolver(&self) -> &RegionResolver<E, L> {
        &self.resolver
    }

    /// False while an invocation is in flight.
    pub fn is_enabled(&self) -> bool {
        self.resolver.state() == ResolverState::Idle
    }

    /// Run one locate invocation and publish its outcome.
    ///
    /// A press while disabled returns `Err(ResolverBusy)` and publishes
    /// nothing.
    pub async fn press(&self) -> Result<LocateOutcome, ResolverBusy> {
        let outcome = match self.resolver.locate().await {
            Ok(outcome) => outcome,
            Err(busy) => {
                debug!("Locate pressed while disabled");
                return Err(busy);
            }
        };

        match &outcome {
            LocateOutcome::Resolved(resolution) => {
                self.events.publish(MapEvent::CameraFitted(resolution.viewport));
            }
            LocateOutcome::Failed(reason) => {
                error!(reason = %reason, "Error obtaining location");
            }
            LocateOutcome::NoMatch { .. } | LocateOutcome::NotReady { .. } => {}
        }
        self.events.publish(MapEvent::Located(outcome.clone()));
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::InMemoryEngine;
    use crate::geometry::Position;
    use crate::location::{FixedLocationProvider, LocationFailure};

    #[tokio::test]
    async fn test_failure_is_published() {
        let engine = Arc::new(InMemoryEngine::new());
        let events = EventBus::default();
        let mut rx = events.subscribe();
        let control = LocateControl::new(
            engine,
            FixedLocationProvider::failing(LocationFailure::PermissionDenied),
            ResolverConfig::default(),
            events,
        );

        let outcome = control.press().await.unwrap();

        assert_eq!(outcome, LocateOutcome::Failed(LocationFailure::PermissionDenied));
        assert_eq!(
            rx.recv().await.unwrap(),
            MapEvent::Located(LocateOutcome::Failed(LocationFailure::PermissionDenied))
        );
        assert!(control.is_enabled());
    }

    #[tokio::test]
    async fn test_not_ready_is_published() {
        let engine = Arc::new(InMemoryEngine::loading());
        let events = EventBus::default();
        let mut rx = events.subscribe();
        let control = LocateControl::new(
            engine,
            FixedLocationProvider::new(Position::new(-95.0, 38.0)),
            ResolverConfig::default(),
            events,
        );

        control.press().await.unwrap();

        assert!(matches!(
            rx.recv().await.unwrap(),
            MapEvent::Located(LocateOutcome::NotReady { .. })
        ));
    }
}
