//! Error types for the pipeline

use thiserror::Error;

/// Errors that end a run or an export operation
///
/// Per-claim failures never surface here; they become ERROR verdicts.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Document text is empty or unusable
    #[error("Input error: {0}")]
    Input(String),

    /// Configuration rejected by validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// Export file is malformed
    #[error("Export error: {0}")]
    Export(String),

    /// I/O error while reading or writing an export
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
