//! Evidence sources returned by web search

use serde::{Deserialize, Serialize};

const NO_TITLE: &str = "No title";
const NO_URL: &str = "No URL";
const NO_CONTENT: &str = "No content";

/// A single web search result used as evidence
///
/// Missing upstream fields deserialize to placeholder strings so downstream
/// formatting never has to special-case absent values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Page title
    #[serde(default = "default_title")]
    pub title: String,

    /// Page URL
    #[serde(default = "default_url")]
    pub url: String,

    /// Content snippet
    #[serde(default = "default_content")]
    pub content: String,
}

impl Source {
    /// Create a new source
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: content.into(),
        }
    }

    /// Content truncated to at most `max_chars` characters
    pub fn snippet(&self, max_chars: usize) -> &str {
        match self.content.char_indices().nth(max_chars) {
            Some((idx, _)) => &self.content[..idx],
            None => &self.content,
        }
    }
}

impl Default for Source {
    fn default() -> Self {
        Self::new(NO_TITLE, NO_URL, NO_CONTENT)
    }
}

fn default_title() -> String {
    NO_TITLE.to_string()
}

fn default_url() -> String {
    NO_URL.to_string()
}

fn default_content() -> String {
    NO_CONTENT.to_string()
}

/// Raw response of the web search collaborator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Ranked results, most relevant first
    #[serde(default)]
    pub results: Vec<Source>,

    /// Synthesized answer, when the service provides one
    #[serde(default)]
    pub answer: Option<String>,
}

/// Outcome of retrieving evidence for one claim
///
/// Failure is an ordinary value: a failed retrieval has `success == false`,
/// an error message, and no sources. A successful retrieval with zero
/// sources is distinct from a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalOutcome {
    /// Whether the search call completed
    pub success: bool,
    /// Ranked sources as returned by the search service
    pub sources: Vec<Source>,
    /// Synthesized answer, empty when absent
    pub answer: String,
    /// Error message when `success` is false
    pub error: Option<String>,
}

impl RetrievalOutcome {
    /// Successful retrieval
    pub fn succeeded(sources: Vec<Source>, answer: impl Into<String>) -> Self {
        Self {
            success: true,
            sources,
            answer: answer.into(),
            error: None,
        }
    }

    /// Failed retrieval carrying the error message
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            sources: Vec::new(),
            answer: String::new(),
            error: Some(error.into()),
        }
    }

    /// Error message, or `"Unknown error"` for a failure without one
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or("Unknown error")
    }
}

impl From<SearchResponse> for RetrievalOutcome {
    fn from(response: SearchResponse) -> Self {
        Self::succeeded(response.results, response.answer.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_get_placeholders() {
        let source: Source = serde_json::from_str(r#"{"url": "https://example.com"}"#).unwrap();
        assert_eq!(source.title, "No title");
        assert_eq!(source.url, "https://example.com");
        assert_eq!(source.content, "No content");
    }

    #[test]
    fn test_snippet_truncates_on_char_boundary() {
        let source = Source::new("t", "u", "héllo world");
        assert_eq!(source.snippet(2), "hé");
        assert_eq!(source.snippet(5), "héllo");
        assert_eq!(source.snippet(500), "héllo world");
    }

    #[test]
    fn test_failed_outcome_is_empty() {
        let outcome = RetrievalOutcome::failed("timeout");
        assert!(!outcome.success);
        assert!(outcome.sources.is_empty());
        assert!(outcome.answer.is_empty());
        assert_eq!(outcome.error_message(), "timeout");
    }

    #[test]
    fn test_zero_results_is_success() {
        let outcome: RetrievalOutcome = SearchResponse::default().into();
        assert!(outcome.success);
        assert!(outcome.sources.is_empty());
        assert!(outcome.error.is_none());
    }

    #[test]
    fn test_search_response_ignores_extra_fields() {
        let json = r#"{
            "query": "q",
            "answer": "yes",
            "results": [{"title": "A", "url": "https://a", "content": "c", "score": 0.9}]
        }"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.answer.as_deref(), Some("yes"));
    }
}
