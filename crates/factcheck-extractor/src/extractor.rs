//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::parser::parse_claims;
use crate::prompt::PromptBuilder;
use factcheck_domain::traits::{CompletionRequest, LlmProvider};
use factcheck_domain::Claim;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info};

/// Converts document text into a sequence of claims
///
/// One extraction makes exactly one LLM call. Retrying is left to the caller.
pub struct ClaimExtractor<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    config: ExtractorConfig,
    category_hints: Vec<String>,
}

impl<L> ClaimExtractor<L>
where
    L: LlmProvider,
{
    /// Create a new Extractor
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Self {
        Self::with_shared(Arc::new(llm_provider), config)
    }

    /// Create an Extractor around a provider shared with other components
    pub fn with_shared(llm_provider: Arc<L>, config: ExtractorConfig) -> Self {
        Self {
            llm_provider,
            config,
            category_hints: Vec::new(),
        }
    }

    /// Offer these example categories to the model
    pub fn with_category_hints(mut self, hints: Vec<String>) -> Self {
        self.category_hints = hints;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract claims from document text, preserving the model's order
    ///
    /// # Errors
    ///
    /// - `EmptyInput` if the text is empty or whitespace
    /// - `TextTooLong` if the text exceeds `max_text_length`
    /// - `Service` / `Timeout` if the LLM call fails
    /// - `Parse` if the response is not an accepted shape
    pub async fn extract(&self, document_text: &str) -> Result<Vec<Claim>, ExtractorError> {
        if document_text.trim().is_empty() {
            return Err(ExtractorError::EmptyInput);
        }

        let length = document_text.chars().count();
        if length > self.config.max_text_length {
            return Err(ExtractorError::TextTooLong(length, self.config.max_text_length));
        }

        info!("Starting claim extraction, text length {}", length);

        let prompt = PromptBuilder::new(document_text)
            .with_category_hints(self.category_hints.clone())
            .build();

        debug!("Prompt length: {} chars", prompt.len());

        let request = CompletionRequest::structured(prompt, self.config.temperature);
        let response = timeout(
            self.config.extraction_timeout(),
            self.llm_provider.complete(&request),
        )
        .await
        .map_err(|_| ExtractorError::Timeout)?
        .map_err(|e| ExtractorError::Service(e.to_string()))?;

        debug!("LLM response length: {} chars", response.len());

        let claims = parse_claims(&response)?;

        info!("Extracted {} claims", claims.len());

        Ok(claims)
    }
}
