//! Run outcome

use factcheck_domain::{RunId, RunSummary};

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// Every extracted claim was checked
    Completed,
    /// Extraction produced no claims; `reason` is set when extraction failed
    NoClaims {
        /// Extraction error message
        reason: Option<String>,
    },
    /// Cancellation stopped the run after `completed` of `total` claims
    Cancelled {
        /// Claims checked before cancellation took effect
        completed: usize,
        /// Claims extracted
        total: usize,
    },
}

/// Result of one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Identifier used in this run's log lines
    pub run_id: RunId,
    /// Checked claims and their counts
    pub summary: RunSummary,
    /// How the run ended
    pub status: RunStatus,
}

impl RunReport {
    /// Whether extraction yielded nothing to check
    pub fn found_no_claims(&self) -> bool {
        matches!(self.status, RunStatus::NoClaims { .. })
    }
}
