//! factcheck Search Provider Layer
//!
//! Implementations of the `SearchProvider` trait from `factcheck-domain`.
//!
//! # Providers
//!
//! - `MockSearchProvider`: Deterministic mock for testing
//! - `TavilyProvider`: Tavily search API integration

#![warn(missing_docs)]

pub mod tavily;

use async_trait::async_trait;
use factcheck_domain::traits::{SearchProvider, SearchRequest};
use factcheck_domain::{SearchResponse, Source};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use tavily::{TavilyConfig, TavilyProvider};

/// Errors that can occur during search operations
#[derive(Error, Debug)]
pub enum SearchError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// API key rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Generic error
    #[error("Search error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum MockReply {
    Results(SearchResponse),
    Fail(String),
}

/// Mock search provider for deterministic testing
///
/// Replies are chosen by the first registered needle contained in the
/// query, falling back to the default response.
///
/// # Examples
///
/// ```
/// use factcheck_search::MockSearchProvider;
///
/// let mut provider = MockSearchProvider::with_sources(3);
/// provider.add_error("flaky topic", "timeout");
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockSearchProvider {
    default_reply: MockReply,
    rules: Arc<Mutex<Vec<(String, MockReply)>>>,
    requests: Arc<Mutex<Vec<SearchRequest>>>,
    call_count: Arc<AtomicUsize>,
}

impl MockSearchProvider {
    /// Create a mock returning `response` for every query
    pub fn new(response: SearchResponse) -> Self {
        Self::with_default(MockReply::Results(response))
    }

    /// Create a mock returning `n` numbered sources for every query
    pub fn with_sources(n: usize) -> Self {
        Self::new(SearchResponse {
            results: numbered_sources(n),
            answer: None,
        })
    }

    /// Create a mock that fails every query
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_default(MockReply::Fail(message.into()))
    }

    fn with_default(default_reply: MockReply) -> Self {
        Self {
            default_reply,
            rules: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Respond with `response` to any query containing `needle`
    pub fn add_response(&mut self, needle: impl Into<String>, response: SearchResponse) {
        lock(&self.rules).push((needle.into(), MockReply::Results(response)));
    }

    /// Fail any query containing `needle`
    pub fn add_error(&mut self, needle: impl Into<String>, message: impl Into<String>) {
        lock(&self.rules).push((needle.into(), MockReply::Fail(message.into())));
    }

    /// Number of search calls made
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Requests received so far, in call order
    pub fn requests(&self) -> Vec<SearchRequest> {
        lock(&self.requests).clone()
    }
}

impl Default for MockSearchProvider {
    fn default() -> Self {
        Self::new(SearchResponse::default())
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    type Error = SearchError;

    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, Self::Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        lock(&self.requests).push(request.clone());

        let reply = lock(&self.rules)
            .iter()
            .find(|(needle, _)| request.query.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| self.default_reply.clone());

        match reply {
            MockReply::Results(mut response) => {
                response.results.truncate(request.max_results);
                Ok(response)
            }
            MockReply::Fail(message) => Err(SearchError::Other(message)),
        }
    }
}

/// `n` sources titled `Source 1..=n` with distinct URLs
pub fn numbered_sources(n: usize) -> Vec<Source> {
    (1..=n)
        .map(|i| {
            Source::new(
                format!("Source {}", i),
                format!("https://example.com/{}", i),
                format!("Content of source {}", i),
            )
        })
        .collect()
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
