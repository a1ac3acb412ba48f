//! Evidence retrieval for a single claim

use factcheck_domain::traits::{SearchDepth, SearchProvider, SearchRequest};
use factcheck_domain::RetrievalOutcome;
use std::sync::Arc;
use tracing::{debug, warn};

/// Fetches ranked sources for a claim's search query
///
/// Never fails: service errors come back as an unsuccessful
/// [`RetrievalOutcome`] so callers handle them as ordinary values.
pub struct EvidenceRetriever<S>
where
    S: SearchProvider,
{
    provider: Arc<S>,
    max_results: usize,
    depth: SearchDepth,
}

impl<S> EvidenceRetriever<S>
where
    S: SearchProvider,
{
    /// Create a retriever
    pub fn new(provider: Arc<S>, max_results: usize, depth: SearchDepth) -> Self {
        Self {
            provider,
            max_results,
            depth,
        }
    }

    /// Retrieve sources for a query, in the service's relevance order
    pub async fn retrieve(&self, search_query: &str) -> RetrievalOutcome {
        let request = SearchRequest {
            query: search_query.to_string(),
            max_results: self.max_results,
            depth: self.depth,
        };

        match self.provider.search(&request).await {
            Ok(response) => {
                debug!(
                    "Search for '{}' returned {} sources",
                    search_query,
                    response.results.len()
                );
                response.into()
            }
            Err(e) => {
                warn!("Search for '{}' failed: {}", search_query, e);
                RetrievalOutcome::failed(e.to_string())
            }
        }
    }
}
