//! factcheck Pipeline
//!
//! Runs a document through claim extraction, evidence retrieval and verdict
//! analysis, then aggregates the verdicts into a summary.
//!
//! # Architecture
//!
//! ```text
//! Text → ClaimExtractor → [EvidenceRetriever → VerdictAnalyzer] per claim → aggregate → RunSummary
//! ```
//!
//! Claims are checked in extraction order. With `max_concurrency > 1` several
//! checks run at once but results and progress still arrive in claim order.
//!
//! # Example Usage
//!
//! ```no_run
//! use factcheck_extractor::ExtractorConfig;
//! use factcheck_llm::MockProvider;
//! use factcheck_pipeline::{Pipeline, PipelineConfig};
//! use factcheck_search::MockSearchProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = Pipeline::new(
//!     MockProvider::default(),
//!     MockSearchProvider::with_sources(5),
//!     ExtractorConfig::default(),
//!     PipelineConfig::default(),
//! )?;
//!
//! let report = pipeline
//!     .run("The Eiffel Tower is 330 metres tall.", |p| println!("{}", p))
//!     .await?;
//! println!("{} accurate", report.summary.counts.accurate);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod aggregate;
mod analyzer;
mod cancel;
mod config;
mod error;
mod export;
mod orchestrator;
mod progress;
mod report;
mod retriever;


pub use aggregate::aggregate;
pub use analyzer::{parse_verdict, VerdictAnalyzer};
pub use cancel::CancelToken;
pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use export::{from_json, read_export, to_json, write_export, DEFAULT_EXPORT_FILE};
pub use orchestrator::{run_pipeline, Pipeline};
pub use progress::{Progress, PROGRESS_PREVIEW_CHARS};
pub use report::{RunReport, RunStatus};
pub use retriever::EvidenceRetriever;
