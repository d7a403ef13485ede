//! Reset-view control.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::engine::{FitOptions, MapEngine};
use crate::events::{EventBus, MapEvent};
use crate::geometry::{Position, Viewport};

/// Contiguous US, south-west to north-east.
pub const US_BOUNDS: Viewport = Viewport::new(-125.0, 24.396308, -66.93457, 49.384358);

/// Initial camera center over the US.
pub const US_CENTER: Position = Position::new(-98.5, 39.5);

/// Camera constraints when returning home.
pub const HOME_FIT: FitOptions = FitOptions::new(10, 4.0, Duration::from_millis(1000));

/// Frames the configured home bounds.
pub struct HomeControl<E: ?Sized> {
    engine: Arc<E>,
    events: EventBus,
    bounds: Viewport,
    fit: FitOptions,
}

impl<E: MapEngine + ?Sized> HomeControl<E> {
    pub fn new(engine: Arc<E>, events: EventBus, bounds: Viewport, fit: FitOptions) -> Self {
        Self {
            engine,
            events,
            bounds,
            fit,
        }
    }

    pub fn bounds(&self) -> Viewport {
        self.bounds
    }

    /// Emit `Home` and fit the home bounds.
    pub fn press(&self) {
        info!(bounds = %self.bounds, "Home requested");
        self.events.publish(MapEvent::Home);
        self.engine.fit_bounds(self.bounds, self.fit);
        self.events.publish(MapEvent::CameraFitted(self.bounds));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CameraState, InMemoryEngine};

    #[tokio::test]
    async fn test_press_fits_home_bounds() {
        let engine = Arc::new(InMemoryEngine::new());
        let events = EventBus::default();
        let mut rx = events.subscribe();
        let home = HomeControl::new(engine.clone(), events, US_BOUNDS, HOME_FIT);

        home.press();

        assert_eq!(
            engine.camera(),
            Some(CameraState::Fitted {
                viewport: US_BOUNDS,
                options: FitOptions::new(10, 4.0, Duration::from_millis(1000)),
            })
        );
        assert_eq!(rx.recv().await.unwrap(), MapEvent::Home);
        assert_eq!(rx.recv().await.unwrap(), MapEvent::CameraFitted(US_BOUNDS));
    }

    #[test]
    fn test_us_center_inside_bounds() {
        assert!(US_BOUNDS.contains(US_CENTER));
        assert!(US_BOUNDS.is_valid());
    }
}
