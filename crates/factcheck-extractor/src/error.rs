//! Error types for the Extractor

use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Document text is empty or whitespace
    #[error("Document text is empty")]
    EmptyInput,

    /// Text exceeds maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// LLM service call failed (transport, auth, rate limit)
    #[error("LLM service error: {0}")]
    Service(String),

    /// Response was not in an accepted shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Extraction timeout
    #[error("Extraction timeout")]
    Timeout,
}

impl ExtractorError {
    /// Whether the error came from the service rather than the input or response
    pub fn is_service_error(&self) -> bool {
        matches!(self, ExtractorError::Service(_) | ExtractorError::Timeout)
    }
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::Parse(e.to_string())
    }
}
