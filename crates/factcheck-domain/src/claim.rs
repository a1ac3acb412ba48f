//! Claim module - the unit of work of a fact-checking run

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category assigned to a claim when the extractor does not supply one
pub const DEFAULT_CATEGORY: &str = "General";

/// A discrete, verifiable factual assertion extracted from a document
///
/// Claims are immutable once produced. Use the builder-style methods to
/// override the category or search query at construction time.
///
/// # Examples
///
/// ```
/// use factcheck_domain::Claim;
///
/// let claim = Claim::new("Bitcoin launched in 2009");
/// assert_eq!(claim.category(), "General");
/// assert_eq!(claim.search_query(), "Bitcoin launched in 2009");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    text: String,
    category: String,
    search_query: String,
}

impl Claim {
    /// Create a claim whose category is `General` and whose search query is its text
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            search_query: text.clone(),
            category: DEFAULT_CATEGORY.to_string(),
            text,
        }
    }

    /// Set the category, falling back to the default when blank
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        if !category.trim().is_empty() {
            self.category = category;
        }
        self
    }

    /// Set the search query, falling back to the claim text when blank
    pub fn with_search_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        if !query.trim().is_empty() {
            self.search_query = query;
        }
        self
    }

    /// The asserted statement
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Free-text category label
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Query used to retrieve evidence
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// First `max_chars` characters of the claim text, for progress display
    pub fn preview(&self, max_chars: usize) -> String {
        self.text.chars().take(max_chars).collect()
    }
}

impl fmt::Display for Claim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.text)
    }
}

/// Identifier of a single pipeline run, based on UUIDv7
///
/// Run identifiers sort chronologically, which keeps log lines from
/// consecutive runs in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RunId(u128);

impl RunId {
    /// Generate a new UUIDv7-based RunId
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}
