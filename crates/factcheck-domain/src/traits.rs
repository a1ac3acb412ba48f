//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and the services
//! it depends on. Infrastructure implementations live in other crates.

use crate::SearchResponse;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape the caller expects the completion to take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseShape {
    /// Free text
    #[default]
    Text,
    /// Machine-parseable JSON
    Structured,
}

/// A single request to the language model service
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Prompt text
    pub prompt: String,
    /// Requested output shape
    pub response_shape: ResponseShape,
    /// Sampling temperature; low values favour repeatable output
    pub temperature: f32,
}

impl CompletionRequest {
    /// Request for structured (JSON) output
    pub fn structured(prompt: impl Into<String>, temperature: f32) -> Self {
        Self {
            prompt: prompt.into(),
            response_shape: ResponseShape::Structured,
            temperature,
        }
    }
}

/// Trait for language model operations
///
/// Implemented by the infrastructure layer (factcheck-llm)
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Error type for LLM operations
    type Error: fmt::Display + Send;

    /// Generate a completion for the request
    async fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error>;
}

/// Search depth; `Deep` trades latency for better recall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDepth {
    /// Quick search
    Shallow,
    /// Thorough search
    #[default]
    Deep,
}

impl SearchDepth {
    /// Lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchDepth::Shallow => "shallow",
            SearchDepth::Deep => "deep",
        }
    }
}

/// A single request to the web search service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Query text
    pub query: String,
    /// Maximum number of ranked results
    pub max_results: usize,
    /// Search depth
    pub depth: SearchDepth,
}

/// Trait for web search operations
///
/// Implemented by the infrastructure layer (factcheck-search)
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Error type for search operations
    type Error: fmt::Display + Send;

    /// Run a search and return ranked results
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, Self::Error>;
}

/// Trait for obtaining the plain text of a document
///
/// Implemented by the presentation layer (factcheck-cli)
pub trait DocumentSource {
    /// Error type for document reading
    type Error: fmt::Display;

    /// Read the document's text
    fn read_text(&self) -> Result<String, Self::Error>;
}
