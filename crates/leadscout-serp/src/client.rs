//! HTTP client for the search-aggregation API.
//!
//! Wraps `reqwest` with API key management and the engine-selectable query
//! contract: every request carries `engine`, `q`, and `api_key`; the Google
//! engines additionally carry `gl` (region) and `hl` (locale). A 2xx body
//! with a top-level `"error"` string is surfaced as [`SerpError::Api`].

use reqwest::{Client, Url};
use serde_json::Value;

use leadscout_core::SearchRequest;

use crate::error::SerpError;
use crate::extract::extract_listings;

const DEFAULT_BASE_URL: &str = "https://serpapi.com/search";

/// Client for the search-aggregation API.
///
/// Manages the HTTP client, API key, and base URL. Use [`SerpClient::new`]
/// for production or [`SerpClient::with_base_url`] to point at a mock server
/// in tests. The primary search call deliberately carries no overall request
/// timeout; only the connection attempt is bounded.
pub struct SerpClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl SerpClient {
    /// Creates a new client pointed at the production search API.
    ///
    /// An empty `api_key` is accepted at construction; searches will then
    /// fail with [`SerpError::MissingApiKey`] until a key is configured.
    ///
    /// # Errors
    ///
    /// Returns [`SerpError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, user_agent: &str) -> Result<Self, SerpError> {
        Self::with_base_url(api_key, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SerpError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SerpError::Api`] if `base_url` is not a
    /// valid URL.
    pub fn with_base_url(
        api_key: &str,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, SerpError> {
        let client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .user_agent(user_agent.to_owned())
            .build()?;

        let base_url = Url::parse(base_url)
            .map_err(|e| SerpError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Runs one search and extracts the engine-specific listing array.
    ///
    /// # Errors
    ///
    /// - [`SerpError::MissingApiKey`] when no key is configured.
    /// - [`SerpError::Http`] on network failure or a non-2xx status.
    /// - [`SerpError::Api`] when the response carries an error message.
    /// - [`SerpError::Deserialize`] when the body is not valid JSON.
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<Value>, SerpError> {
        if self.api_key.is_empty() {
            return Err(SerpError::MissingApiKey);
        }

        let url = self.build_url(request);
        let body = self.request_json(&url).await?;
        Self::check_api_error(&body)?;

        Ok(extract_listings(request.engine, &body))
    }

    /// Best-effort variant of [`SerpClient::search`] for the chat path:
    /// every failure is logged and collapsed into an empty list, making
    /// "no results" and "upstream failure" indistinguishable to the caller.
    pub async fn search_or_empty(&self, request: &SearchRequest) -> Vec<Value> {
        match self.search(request).await {
            Ok(listings) => listings,
            Err(e) => {
                tracing::warn!(
                    engine = %request.engine,
                    keyword = %request.keyword,
                    error = %e,
                    "search failed, returning empty result set"
                );
                Vec::new()
            }
        }
    }

    /// Builds the full request URL with percent-encoded query parameters.
    ///
    /// Region (`gl`) and locale (`hl`) are only sent to engines that accept
    /// them; `bing_maps` and `apple_maps` take the bare query.
    fn build_url(&self, request: &SearchRequest) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("engine", request.engine.as_str());
            pairs.append_pair("q", &request.query());
            pairs.append_pair("api_key", &self.api_key);
            if request.engine.uses_region() {
                pairs.append_pair("gl", request.region_code());
                pairs.append_pair("hl", "en");
            }
        }
        url
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    async fn request_json(&self, url: &Url) -> Result<Value, SerpError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| SerpError::Deserialize {
            context: url.path().to_string(),
            source: e,
        })
    }

    /// Checks the top-level `"error"` field and returns an error if present.
    fn check_api_error(body: &Value) -> Result<(), SerpError> {
        if let Some(message) = body.get("error").and_then(Value::as_str) {
            return Err(SerpError::Api(message.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use leadscout_core::EngineId;

    use super::*;

    fn test_client(base_url: &str) -> SerpClient {
        SerpClient::with_base_url("test-key", "leadscout-test/0.1", base_url)
            .expect("client construction should not fail")
    }

    fn request(engine: EngineId) -> SearchRequest {
        SearchRequest::new("plumber", "austin", "usa", engine).expect("valid request")
    }

    #[test]
    fn build_url_includes_region_for_google_maps() {
        let client = test_client("https://serpapi.com/search");
        let url = client.build_url(&request(EngineId::GoogleMaps));
        assert_eq!(
            url.as_str(),
            "https://serpapi.com/search?engine=google_maps&q=plumber+in+austin&api_key=test-key&gl=us&hl=en"
        );
    }

    #[test]
    fn build_url_omits_region_for_bing_maps() {
        let client = test_client("https://serpapi.com/search");
        let url = client.build_url(&request(EngineId::BingMaps));
        assert_eq!(
            url.as_str(),
            "https://serpapi.com/search?engine=bing_maps&q=plumber+in+austin&api_key=test-key"
        );
    }

    #[test]
    fn build_url_omits_region_for_apple_maps() {
        let client = test_client("https://serpapi.com/search");
        let url = client.build_url(&request(EngineId::AppleMaps));
        assert!(!url.as_str().contains("gl="), "unexpected region: {url}");
        assert!(!url.as_str().contains("hl="), "unexpected locale: {url}");
    }

    #[test]
    fn build_url_percent_encodes_query() {
        let client = test_client("https://serpapi.com/search");
        let req =
            SearchRequest::new("coffee & tea", "", "uk", EngineId::Google).expect("valid request");
        let url = client.build_url(&req);
        assert!(
            url.as_str().contains("coffee+%26+tea") || url.as_str().contains("coffee%20%26%20tea"),
            "query param should be percent-encoded: {url}"
        );
    }

    #[test]
    fn check_api_error_passes_clean_body() {
        let body = serde_json::json!({"local_results": []});
        assert!(SerpClient::check_api_error(&body).is_ok());
    }

    #[test]
    fn check_api_error_surfaces_message() {
        let body = serde_json::json!({"error": "Invalid API key"});
        let err = SerpClient::check_api_error(&body).unwrap_err();
        assert!(
            err.to_string().contains("Invalid API key"),
            "expected API message in error, got: {err}"
        );
    }

    #[tokio::test]
    async fn search_without_api_key_fails_fast() {
        let client = SerpClient::with_base_url("", "leadscout-test/0.1", "https://serpapi.com")
            .expect("client construction should not fail");
        let result = client.search(&request(EngineId::GoogleMaps)).await;
        assert!(matches!(result, Err(SerpError::MissingApiKey)));
    }
}
