//! JSON export of claim results
//!
//! The export is the ordered list of [`ClaimResult`]s with the field names
//! `claim`, `category`, `search_query`, `analysis` and `sources`. Source
//! content is written in full.

use crate::aggregate::aggregate;
use crate::error::{PipelineError, Result};
use factcheck_domain::{ClaimResult, RunSummary};
use std::fs;
use std::path::Path;
use tracing::info;

/// Suggested file name for exports
pub const DEFAULT_EXPORT_FILE: &str = "fact_check_results.json";

/// Serialize results as pretty-printed JSON
pub fn to_json(results: &[ClaimResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Parse an export document back into results
pub fn from_json(json: &str) -> Result<Vec<ClaimResult>> {
    serde_json::from_str(json).map_err(|e| PipelineError::Export(e.to_string()))
}

/// Write a summary's results to `path`
pub fn write_export(summary: &RunSummary, path: &Path) -> Result<()> {
    let json = to_json(&summary.results)?;
    fs::write(path, json)?;
    info!("Exported {} results to {}", summary.len(), path.display());
    Ok(())
}

/// Load an export and recompute its counts
pub fn read_export(path: &Path) -> Result<RunSummary> {
    let json = fs::read_to_string(path)?;
    Ok(aggregate(from_json(&json)?))
}
