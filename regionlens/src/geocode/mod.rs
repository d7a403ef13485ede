//! Geocode adapter
//!
//! Translates free-text place queries into [`GeocodeCandidate`]s through a
//! Nominatim-compatible search endpoint. Two query kinds exist:
//!
//! - forward search (`format=geojson`): one candidate per feature with a
//!   bbox, centered on the bbox centroid
//! - suggestions (`format=json`, limited): candidates taken straight from
//!   each record's `lon`/`lat`
//!
//! Each call issues at most one request. There is no caching and no retry.
//! The `try_*` methods report failures; the plain methods log them and
//! answer with an empty list.

mod error;
mod nominatim;
mod types;

pub use error::GeocodeError;
pub use nominatim::NominatimGeocoder;
pub use types::{
    GeocodeCandidate, SuggestPolicy, DEFAULT_SUGGEST_DEBOUNCE, DEFAULT_SUGGEST_LIMIT,
    DEFAULT_SUGGEST_MIN_LENGTH,
};

use std::future::Future;

use tracing::{debug, warn};

/// Place search backend.
pub trait Geocoder: Send + Sync {
    /// Full search for `query`.
    fn try_forward_geocode(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<GeocodeCandidate>, GeocodeError>> + Send;

    /// As-you-type suggestions for `query`, at most `limit` of them.
    fn try_suggest(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<GeocodeCandidate>, GeocodeError>> + Send;

    /// Like [`try_forward_geocode`](Self::try_forward_geocode), but failures
    /// yield an empty list.
    fn forward_geocode(&self, query: &str) -> impl Future<Output = Vec<GeocodeCandidate>> + Send {
        async move { lenient("forward_geocode", self.try_forward_geocode(query).await) }
    }

    /// Like [`try_suggest`](Self::try_suggest), but failures yield an empty
    /// list.
    fn suggest(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = Vec<GeocodeCandidate>> + Send {
        async move { lenient("suggest", self.try_suggest(query, limit).await) }
    }
}

fn lenient(
    operation: &'static str,
    result: Result<Vec<GeocodeCandidate>, GeocodeError>,
) -> Vec<GeocodeCandidate> {
    match result {
        Ok(candidates) => candidates,
        Err(GeocodeError::EmptyQuery) => {
            debug!(operation, "Empty query, nothing to search");
            Vec::new()
        }
        Err(e) => {
            warn!(operation, error = %e, "Geocoding failed");
            Vec::new()
        }
    }
}
