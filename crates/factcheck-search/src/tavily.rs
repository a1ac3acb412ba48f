//! Tavily Provider Implementation
//!
//! Integration with the Tavily web search API. Deep searches map to
//! Tavily's `advanced` depth and shallow ones to `basic`.

use crate::SearchError;
use async_trait::async_trait;
use factcheck_domain::traits::{SearchDepth, SearchProvider, SearchRequest};
use factcheck_domain::SearchResponse;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default Tavily API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.tavily.com";

/// Default timeout for search requests (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for [`TavilyProvider`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TavilyConfig {
    /// API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Ask the service for a synthesized answer
    #[serde(default = "default_true")]
    pub include_answer: bool,
}

impl Default for TavilyConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            include_answer: true,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

/// Tavily search provider
pub struct TavilyProvider {
    endpoint: String,
    api_key: String,
    include_answer: bool,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct TavilyRequest<'a> {
    query: &'a str,
    max_results: usize,
    search_depth: &'static str,
    include_answer: bool,
}

impl TavilyProvider {
    /// Create a provider against the default endpoint
    pub fn new(api_key: impl Into<String>) -> Result<Self, SearchError> {
        Self::from_config(&TavilyConfig::default(), api_key)
    }

    /// Create a provider from connection settings
    pub fn from_config(config: &TavilyConfig, api_key: impl Into<String>) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SearchError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            include_answer: config.include_answer,
            client,
        })
    }

    /// Override the API base URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }
}

/// Tavily's name for a search depth
fn depth_param(depth: SearchDepth) -> &'static str {
    match depth {
        SearchDepth::Shallow => "basic",
        SearchDepth::Deep => "advanced",
    }
}

#[async_trait]
impl SearchProvider for TavilyProvider {
    type Error = SearchError;

    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, Self::Error> {
        let url = format!("{}/search", self.endpoint);
        let body = TavilyRequest {
            query: &request.query,
            max_results: request.max_results,
            search_depth: depth_param(request.depth),
            include_answer: self.include_answer,
        };

        debug!("POST {} (depth {}, max {})", url, body.search_depth, body.max_results);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<SearchResponse>()
                .await
                .map_err(|e| SearchError::InvalidResponse(format!("Failed to parse response: {}", e)));
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        Err(match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                SearchError::Unauthorized(error_text)
            }
            reqwest::StatusCode::TOO_MANY_REQUESTS => SearchError::RateLimitExceeded,
            s => SearchError::Communication(format!("HTTP {}: {}", s, error_text)),
        })
    }
}
