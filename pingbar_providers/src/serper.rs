use std::time::Duration;

use async_trait::async_trait;
use pingbar_core::{ProviderError, SearchProvider};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use serde_json::value::RawValue;
use tracing::{debug, info};

use crate::retry::retry_with_backoff;

const DEFAULT_BASE_URL: &str = "https://google.serper.dev";
const PLACES_TIMEOUT: Duration = Duration::from_secs(15);
const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);
const SNIPPET_RESULTS: usize = 5;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResponse {
    organic: Vec<OrganicResult>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OrganicResult {
    snippet: String,
}

/// Serper.dev client for the `/places` and `/search` endpoints.
pub struct SerperProvider {
    client: Client,
    api_key: String,
    base_url: String,
    retry_delays: Vec<Duration>,
}

impl SerperProvider {
    pub fn new(api_key: String) -> Self {
        info!("Creating SerperProvider");
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            retry_delays: vec![Duration::from_millis(500), Duration::from_secs(1)],
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub fn with_retry_delays(mut self, retry_delays: Vec<Duration>) -> Self {
        self.retry_delays = retry_delays;
        self
    }

    fn ensure_api_key(&self) -> Result<(), ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::NoApiKey);
        }
        Ok(())
    }

    /// Helper method to send a single request
    async fn try_send(
        &self,
        endpoint: &str,
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<String, ProviderError> {
        let response = self
            .client
            .post(format!("{}/{endpoint}", self.base_url))
            .header("X-API-KEY", &self.api_key)
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::Connection(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .text()
                .await
                .map_err(|e| ProviderError::Connection(e.to_string())),
            StatusCode::UNAUTHORIZED => Err(ProviderError::InvalidKey),
            StatusCode::TOO_MANY_REQUESTS => Err(ProviderError::LimitReached),
            status => Err(ProviderError::Status(status.as_u16())),
        }
    }

    async fn send(
        &self,
        endpoint: &str,
        body: serde_json::Value,
        timeout: Duration,
    ) -> Result<String, ProviderError> {
        retry_with_backoff(
            || self.try_send(endpoint, &body, timeout),
            &self.retry_delays,
            ProviderError::is_transient,
        )
        .await
    }
}

#[async_trait]
impl SearchProvider for SerperProvider {
    async fn fetch_places(
        &self,
        business: &str,
        city: &str,
        limit: usize,
    ) -> Result<Box<RawValue>, ProviderError> {
        self.ensure_api_key()?;

        // Over-fetch so that filtering by city still leaves `limit` results.
        let request = json!({
            "q": format!("{business} {city}"),
            "gl": "es",
            "hl": "es",
            "location": format!("{city}, España"),
            "num": limit * 2,
        });

        info!("Searching places: business={business}, city={city}");
        let body = self.send("places", request, PLACES_TIMEOUT).await?;
        Ok(RawValue::from_string(body)?)
    }

    async fn fetch_snippets(
        &self,
        business: &str,
        city: &str,
    ) -> Result<Vec<String>, ProviderError> {
        self.ensure_api_key()?;

        let request = json!({
            "q": format!("horario {business} {city}"),
            "gl": "es",
            "hl": "es",
            "num": SNIPPET_RESULTS,
        });

        info!("Searching hours: business={business}, city={city}");
        let body = self.send("search", request, SEARCH_TIMEOUT).await?;
        let response: SearchResponse = serde_json::from_str(&body)?;

        let snippets: Vec<String> = response
            .organic
            .into_iter()
            .map(|result| result.snippet)
            .filter(|snippet| !snippet.is_empty())
            .collect();
        debug!("Got {} snippet(s) for {business}", snippets.len());

        Ok(snippets)
    }
}
