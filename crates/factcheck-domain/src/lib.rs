//! factcheck Domain Layer
//!
//! This crate contains the data model of a fact-checking run and the trait
//! interfaces for every external collaborator the pipeline talks to.
//!
//! ## Key Concepts
//!
//! - **Claim**: A discrete, independently verifiable assertion taken from a document
//! - **Source**: A single web search result used as evidence
//! - **Verdict**: The outcome of checking one claim against its evidence
//! - **ClaimResult**: The per-claim unit of output
//! - **RunSummary**: Counts by verdict plus every ClaimResult in extraction order
//!
//! ## Architecture
//!
//! - Value types only, no I/O
//! - Infrastructure implementations (LLM, search, document reading) live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod result;
pub mod source;
pub mod traits;
pub mod verdict;

// Re-exports for convenience
pub use claim::{Claim, RunId, DEFAULT_CATEGORY};
pub use result::{ClaimResult, RunSummary, VerdictCounts};
pub use source::{RetrievalOutcome, SearchResponse, Source};
pub use verdict::{ConfidenceTier, Verdict, VerdictLabel};
