//! Search box control.
//!
//! Every keystroke or submit takes a new generation number. A response is
//! only delivered if no newer request was issued while it was in flight, so
//! a slow early response can never overwrite a later one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::engine::{FitOptions, MapEngine};
use crate::events::{EventBus, MapEvent};
use crate::geocode::{GeocodeCandidate, GeocodeError, Geocoder, SuggestPolicy};

/// Zoom used when flying to a selected candidate without a bounding box.
pub const SELECT_ZOOM: f64 = 12.0;

/// Camera constraints when framing a selected candidate's bounding box.
pub const SELECT_FIT: FitOptions = FitOptions::new(20, SELECT_ZOOM, Duration::from_millis(1000));

/// What became of one search box request.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Query too short or empty; no request issued.
    Skipped,
    /// A newer request arrived during the debounce; no request issued.
    Superseded,
    /// The response arrived after a newer request was issued and was dropped.
    Stale,
    Delivered(Vec<GeocodeCandidate>),
    Failed(GeocodeError),
}

/// Search box driving suggestions while typing and a forward search on
/// submit.
pub struct SearchControl<E: ?Sized, G> {
    engine: Arc<E>,
    geocoder: G,
    events: EventBus,
    policy: SuggestPolicy,
    generation: AtomicU64,
}

impl<E, G> SearchControl<E, G>
where
    E: MapEngine + ?Sized,
    G: Geocoder,
{
    pub fn new(engine: Arc<E>, geocoder: G, policy: SuggestPolicy, events: EventBus) -> Self {
        Self {
            engine,
            geocoder,
            events,
            policy,
            generation: AtomicU64::new(0),
        }
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    pub fn policy(&self) -> &SuggestPolicy {
        &self.policy
    }

    /// Generation of the most recent request.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn next_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation() == generation
    }

    /// Text changed: wait out the debounce, then fetch suggestions.
    pub async fn input(&self, query: &str) -> SearchOutcome {
        let generation = self.next_generation();
        if !self.policy.accepts(query) {
            debug!(generation, "Query below suggestion threshold");
            return SearchOutcome::Skipped;
        }

        tokio::time::sleep(self.policy.debounce).await;
        if !self.is_current(generation) {
            debug!(generation, "Suggestion superseded during debounce");
            return SearchOutcome::Superseded;
        }

        let result = self.geocoder.try_suggest(query, self.policy.limit).await;
        self.deliver(generation, query, result, |generation, query, candidates| {
            MapEvent::Suggestions {
                generation,
                query,
                candidates,
            }
        })
    }

    /// Enter pressed: run a full search immediately.
    pub async fn submit(&self, query: &str) -> SearchOutcome {
        let generation = self.next_generation();
        if query.trim().is_empty() {
            return SearchOutcome::Skipped;
        }

        let result = self.geocoder.try_forward_geocode(query).await;
        self.deliver(generation, query, result, |generation, query, candidates| {
            MapEvent::SearchResults {
                generation,
                query,
                candidates,
            }
        })
    }

    /// Move the camera to a chosen candidate.
    ///
    /// Frames its bounding box when it has one, otherwise flies to its
    /// point at [`SELECT_ZOOM`].
    pub fn select(&self, candidate: &GeocodeCandidate) {
        info!(label = %candidate.label, point = %candidate.point, "Search result selected");
        match candidate.bounding_box {
            Some(viewport) => {
                self.engine.fit_bounds(viewport, SELECT_FIT);
                self.events.publish(MapEvent::CameraFitted(viewport));
            }
            None => {
                self.engine.fly_to(candidate.point, SELECT_ZOOM);
                self.events.publish(MapEvent::CameraCentered {
                    center: candidate.point,
                    zoom: SELECT_ZOOM,
                });
            }
        }
    }

    fn deliver<F>(
        &self,
        generation: u64,
        query: &str,
        result: Result<Vec<GeocodeCandidate>, GeocodeError>,
        event: F,
    ) -> SearchOutcome
    where
        F: FnOnce(u64, String, Vec<GeocodeCandidate>) -> MapEvent,
    {
        if !self.is_current(generation) {
            debug!(
                generation,
                latest = self.generation(),
                "Dropping stale search response"
            );
            return SearchOutcome::Stale;
        }

        match result {
            Ok(candidates) => {
                debug!(generation, results = candidates.len(), "Search results delivered");
                self.events
                    .publish(event(generation, query.to_string(), candidates.clone()));
                SearchOutcome::Delivered(candidates)
            }
            Err(error) => {
                self.events.publish(MapEvent::SearchFailed {
                    generation,
                    query: query.to_string(),
                    error: error.clone(),
                });
                SearchOutcome::Failed(error)
            }
        }
    }
}
