//! Nominatim search client.

use reqwest::Url;
use tracing::{debug, info};

use super::types::{parse_forward, parse_suggestions, GeocodeCandidate, SuggestPolicy};
use super::{GeocodeError, Geocoder};
use crate::http::AsyncHttpClient;

/// Geocoder backed by a Nominatim `search` endpoint.
pub struct NominatimGeocoder<C> {
    client: C,
    search_url: Url,
    policy: SuggestPolicy,
}

impl<C: AsyncHttpClient> NominatimGeocoder<C> {
    /// Create a geocoder for the server rooted at `base_url`.
    ///
    /// The search endpoint is `{base_url}search`; a missing trailing slash
    /// is added.
    pub fn new(base_url: &str, client: C) -> Result<Self, GeocodeError> {
        let invalid = |reason: String| GeocodeError::InvalidEndpoint {
            url: base_url.to_string(),
            reason,
        };

        let mut root = base_url.trim().to_string();
        if !root.ends_with('/') {
            root.push('/');
        }
        let search_url = Url::parse(&root)
            .and_then(|base| base.join("search"))
            .map_err(|e| invalid(e.to_string()))?;
        if search_url.cannot_be_a_base() || !matches!(search_url.scheme(), "http" | "https") {
            return Err(invalid("expected an http(s) URL".to_string()));
        }

        Ok(Self {
            client,
            search_url,
            policy: SuggestPolicy::default(),
        })
    }

    pub fn with_policy(mut self, policy: SuggestPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &SuggestPolicy {
        &self.policy
    }

    pub fn search_url(&self) -> &Url {
        &self.search_url
    }

    fn forward_url(&self, query: &str) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "geojson")
            .append_pair("polygon_geojson", "1")
            .append_pair("addressdetails", "1");
        url
    }

    fn suggest_url(&self, query: &str, limit: usize) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "json")
            .append_pair("addressdetails", "1")
            .append_pair("limit", &limit.to_string());
        url
    }
}

impl<C: AsyncHttpClient> Geocoder for NominatimGeocoder<C> {
    async fn try_forward_geocode(&self, query: &str) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }

        let url = self.forward_url(query);
        debug!(query, url = %url, "Forward geocode request");
        let body = self.client.get(url.as_str()).await?;
        let candidates = parse_forward(&body)?;

        info!(query, results = candidates.len(), "Forward geocode complete");
        Ok(candidates)
    }

    async fn try_suggest(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Vec<GeocodeCandidate>, GeocodeError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyQuery);
        }
        if !self.policy.accepts(query) || limit == 0 {
            debug!(
                query,
                min_length = self.policy.min_length,
                limit,
                "Query below suggestion threshold, skipping request"
            );
            return Ok(Vec::new());
        }

        let url = self.suggest_url(query, limit);
        debug!(query, url = %url, "Suggestion request");
        let body = self.client.get(url.as_str()).await?;
        let mut candidates = parse_suggestions(&body)?;
        candidates.truncate(limit);

        debug!(query, results = candidates.len(), "Suggestions received");
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Position;
    use crate::http::tests::MockAsyncHttpClient;
    use crate::http::HttpError;

    const BASE: &str = "http://geo.test:8081/";

    fn geocoder(mock: MockAsyncHttpClient) -> NominatimGeocoder<MockAsyncHttpClient> {
        NominatimGeocoder::new(BASE, mock).unwrap()
    }

    #[test]
    fn test_search_url_appends_slash() {
        let geocoder =
            NominatimGeocoder::new("http://geo.test/nominatim", MockAsyncHttpClient::ok("[]"))
                .unwrap();
        assert_eq!(
            geocoder.search_url().as_str(),
            "http://geo.test/nominatim/search"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            NominatimGeocoder::new("not a url", MockAsyncHttpClient::ok("[]")),
            Err(GeocodeError::InvalidEndpoint { .. })
        ));
        assert!(matches!(
            NominatimGeocoder::new("ftp://geo.test/", MockAsyncHttpClient::ok("[]")),
            Err(GeocodeError::InvalidEndpoint { .. })
        ));
    }

    #[tokio::test]
    async fn test_forward_request_parameters() {
        let geocoder = geocoder(MockAsyncHttpClient::ok(r#"{"features": []}"#));

        let candidates = geocoder.try_forward_geocode("  Santa Fe, NM ").await.unwrap();

        assert!(candidates.is_empty());
        assert_eq!(
            geocoder.client.requests(),
            vec![
                "http://geo.test:8081/search?q=Santa+Fe%2C+NM&format=geojson&polygon_geojson=1&addressdetails=1"
                    .to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_forward_returns_centroid_candidates() {
        let body = r#"{"features": [
            {"bbox": [-106.0, 35.6, -105.9, 35.8], "properties": {"display_name": "Santa Fe"}}
        ]}"#;
        let geocoder = geocoder(MockAsyncHttpClient::ok(body));

        let candidates = geocoder.forward_geocode("Santa Fe").await;

        assert_eq!(candidates.len(), 1);
        let point = candidates[0].point;
        assert!((point.longitude - (-105.95)).abs() < 1e-9);
        assert!((point.latitude - 35.7).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_suggest_request_parameters() {
        let geocoder = geocoder(MockAsyncHttpClient::ok("[]"));

        geocoder.try_suggest("Paris", 5).await.unwrap();

        assert_eq!(
            geocoder.client.requests(),
            vec![
                "http://geo.test:8081/search?q=Paris&format=json&addressdetails=1&limit=5"
                    .to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_short_suggest_query_issues_no_request() {
        let geocoder = geocoder(MockAsyncHttpClient::ok("[]"));

        assert_eq!(geocoder.try_suggest("Pa", 5).await, Ok(Vec::new()));
        assert!(geocoder.client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_empty_query_issues_no_request() {
        let geocoder = geocoder(MockAsyncHttpClient::ok("[]"));

        assert_eq!(
            geocoder.try_forward_geocode("   ").await,
            Err(GeocodeError::EmptyQuery)
        );
        assert_eq!(geocoder.try_suggest("", 5).await, Err(GeocodeError::EmptyQuery));
        assert!(geocoder.forward_geocode("").await.is_empty());
        assert!(geocoder.client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_suggest_truncates_to_limit() {
        let body = r#"[
            {"lat": "1", "lon": "1", "display_name": "a"},
            {"lat": "2", "lon": "2", "display_name": "b"},
            {"lat": "3", "lon": "3", "display_name": "c"}
        ]"#;
        let geocoder = geocoder(MockAsyncHttpClient::ok(body));

        let candidates = geocoder.suggest("abc", 2).await;
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[1].point, Position::new(2.0, 2.0));
    }

    #[tokio::test]
    async fn test_network_failure_is_reported_or_empty() {
        let geocoder = geocoder(MockAsyncHttpClient::failing(HttpError::Status {
            status: 502,
            url: BASE.to_string(),
        }));

        assert!(matches!(
            geocoder.try_forward_geocode("Denver").await,
            Err(GeocodeError::Network(HttpError::Status { status: 502, .. }))
        ));
        assert!(geocoder.forward_geocode("Denver").await.is_empty());
        assert!(geocoder.suggest("Denver", 5).await.is_empty());
        // one request per call, no retry
        assert_eq!(geocoder.client.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_parse_failure_is_reported_or_empty() {
        let geocoder = geocoder(MockAsyncHttpClient::ok("<html>502</html>"));

        assert!(matches!(
            geocoder.try_suggest("Denver", 5).await,
            Err(GeocodeError::Parse(_))
        ));
        assert!(geocoder.suggest("Denver", 5).await.is_empty());
    }
}
