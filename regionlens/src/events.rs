//! Typed map events
//!
//! Controls publish [`MapEvent`]s on an [`EventBus`]; any number of
//! subscribers (the CLI printer, tests) receive every event published after
//! they subscribed. Publishing with no subscribers is not an error.

use tokio::sync::broadcast;
use tracing::trace;

use crate::geocode::{GeocodeCandidate, GeocodeError};
use crate::geometry::{Position, Viewport};
use crate::layers::ReconcileReport;
use crate::resolver::LocateOutcome;

/// Default number of events buffered per subscriber.
pub const DEFAULT_EVENT_CAPACITY: usize = 64;

/// Something that happened on the map.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Style finished loading and the initial overlays were applied.
    Loaded,
    /// Reset-view requested.
    Home,
    /// A locate invocation reached its terminal state.
    Located(LocateOutcome),
    /// Suggestions for the query issued as `generation`.
    Suggestions {
        generation: u64,
        query: String,
        candidates: Vec<GeocodeCandidate>,
    },
    /// Forward search results for the query issued as `generation`.
    SearchResults {
        generation: u64,
        query: String,
        candidates: Vec<GeocodeCandidate>,
    },
    /// A search or suggestion request failed.
    SearchFailed {
        generation: u64,
        query: String,
        error: GeocodeError,
    },
    LayersReconciled(ReconcileReport),
    /// Camera framed a box.
    CameraFitted(Viewport),
    /// Camera centered on a point.
    CameraCentered { center: Position, zoom: f64 },
}

impl MapEvent {
    /// Short stable name, used in logs and CLI output.
    pub fn name(&self) -> &'static str {
        match self {
            MapEvent::Loaded => "loaded",
            MapEvent::Home => "home",
            MapEvent::Located(_) => "located",
            MapEvent::Suggestions { .. } => "suggestions",
            MapEvent::SearchResults { .. } => "search_results",
            MapEvent::SearchFailed { .. } => "search_failed",
            MapEvent::LayersReconciled(_) => "layers_reconciled",
            MapEvent::CameraFitted(_) => "camera_fitted",
            MapEvent::CameraCentered { .. } => "camera_centered",
        }
    }
}

/// Broadcast channel for [`MapEvent`]s.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<MapEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MapEvent> {
        self.tx.subscribe()
    }

    /// Publish to current subscribers; returns how many received it.
    pub fn publish(&self, event: MapEvent) -> usize {
        let name = event.name();
        // No subscribers is fine
        let delivered = self.tx.send(event).unwrap_or(0);
        trace!(event = name, delivered, "Event published");
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_published_events() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        assert_eq!(bus.publish(MapEvent::Home), 1);
        assert_eq!(bus.publish(MapEvent::Loaded), 1);

        assert_eq!(rx.recv().await.unwrap(), MapEvent::Home);
        assert_eq!(rx.recv().await.unwrap(), MapEvent::Loaded);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::default();
        assert_eq!(bus.subscriber_count(), 0);
        assert_eq!(bus.publish(MapEvent::Home), 0);
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_events() {
        let bus = EventBus::new(4);
        bus.publish(MapEvent::Home);
        let mut rx = bus.subscribe();
        bus.publish(MapEvent::Loaded);
        assert_eq!(rx.recv().await.unwrap(), MapEvent::Loaded);
    }

    #[test]
    fn test_event_names() {
        assert_eq!(MapEvent::Home.name(), "home");
        assert_eq!(
            MapEvent::LayersReconciled(ReconcileReport::default()).name(),
            "layers_reconciled"
        );
    }
}
