//! Image search client composing query rendering, transport, and decoding.
//!
//! # Design
//! `SearchClient` is configured once (key, endpoint, transport options) and
//! then used for any number of independent `search` calls. URL and header
//! assembly lives in `build_search` so it can be tested without a network;
//! `search` composes it with `Transport::send` and a serde_json decode.

use std::time::Duration;

use tracing::debug;

use crate::error::SearchError;
use crate::http::{HttpMethod, HttpRequest};
use crate::query::SearchRequest;
use crate::transport::Transport;
use crate::types::ImageSearchResponse;

/// Endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.cognitive.microsoft.com/bing/v5.0/images/search";

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Synchronous client for the image search API.
///
/// The API key must be non-empty; the server rejects requests without a
/// valid key with a 401 response.
#[derive(Debug, Clone)]
pub struct SearchClient {
    api_key: String,
    endpoint: String,
    transport: Transport,
}

impl SearchClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            transport: Transport::new(),
        }
    }

    /// Point the client at a different endpoint, for example a staging
    /// deployment or a local test server.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the `User-Agent` header sent with every request.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.transport = self.transport.with_user_agent(user_agent);
        self
    }

    /// Bound each request to `timeout`. Without one, a hung connection
    /// blocks indefinitely.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.transport = self.transport.with_timeout(timeout);
        self
    }

    /// Assemble the GET request for `request`: `endpoint?query` with the
    /// subscription-key header and no body. The `?` is always appended,
    /// even when every parameter is absent.
    pub fn build_search(&self, request: &SearchRequest) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}?{}", self.endpoint, request.to_query_string()),
            headers: vec![(SUBSCRIPTION_KEY_HEADER.to_string(), self.api_key.clone())],
            body: None,
        }
    }

    /// Execute a search and decode the response.
    ///
    /// Transport failures (including non-2xx statuses) surface as
    /// `SearchError::Transport`; a body that is not valid JSON for the
    /// response schema surfaces as `SearchError::Decode`.
    pub fn search(&self, request: &SearchRequest) -> Result<ImageSearchResponse, SearchError> {
        let http_request = self.build_search(request);
        debug!(url = %http_request.path, "search request");

        let body = self.transport.send(&http_request)?;
        decode(&body)
    }
}

fn decode(body: &str) -> Result<ImageSearchResponse, SearchError> {
    serde_json::from_str(body).map_err(|err| SearchError::Decode(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SearchRequest;

    fn client() -> SearchClient {
        SearchClient::new("secret-key").with_endpoint("http://localhost:3000/images/search")
    }

    #[test]
    fn build_search_produces_get_without_body() {
        let request = SearchRequest::new().query("sunset");
        let req = client().build_search(&request);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/images/search?q=sunset");
        assert!(req.body.is_none());
    }

    #[test]
    fn build_search_attaches_subscription_key_header() {
        let req = client().build_search(&SearchRequest::new());
        assert_eq!(
            req.headers,
            vec![(
                "Ocp-Apim-Subscription-Key".to_string(),
                "secret-key".to_string()
            )]
        );
    }

    #[test]
    fn empty_request_keeps_bare_question_mark() {
        let req = client().build_search(&SearchRequest::new());
        assert_eq!(req.path, "http://localhost:3000/images/search?");
    }

    #[test]
    fn default_endpoint_is_used_without_override() {
        let req = SearchClient::new("k").build_search(&SearchRequest::new());
        assert!(req.path.starts_with(DEFAULT_ENDPOINT));
    }

    #[test]
    fn urls_with_different_counts_differ_only_in_count_pair() {
        let c = client();
        let one = c.build_search(&SearchRequest::new().query("sunset").count(1));
        let two = c.build_search(&SearchRequest::new().query("sunset").count(2));
        assert_ne!(one.path, two.path);
        assert_eq!(one.path.replace("count=1", "count=2"), two.path);
    }

    #[test]
    fn decode_accepts_empty_value_list() {
        let response = decode(r#"{"value":[]}"#).unwrap();
        assert!(response.value.is_empty());
        assert!(response.total_estimated_matches.is_none());
    }

    #[test]
    fn decode_reads_results_and_total() {
        let body = r#"{
            "totalEstimatedMatches": 201,
            "value": [
                {"name": "Sunset", "contentUrl": "http://img.example/1.jpg", "width": 1920, "height": 1080}
            ]
        }"#;
        let response = decode(body).unwrap();
        assert_eq!(response.total_estimated_matches, Some(201));
        assert_eq!(response.value.len(), 1);
        assert_eq!(response.value[0].name.as_deref(), Some("Sunset"));
        assert_eq!(response.value[0].width, Some(1920));
    }

    #[test]
    fn decode_rejects_malformed_json() {
        let err = decode("not json").unwrap_err();
        assert!(matches!(err, SearchError::Decode(_)));
    }

    #[test]
    fn decode_rejects_schema_mismatch() {
        let err = decode(r#"{"value": 42}"#).unwrap_err();
        assert!(matches!(err, SearchError::Decode(_)));
    }
}
