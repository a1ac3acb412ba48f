//! Progress notifications

use factcheck_domain::VerdictLabel;
use std::fmt;

/// Characters of claim text shown in progress messages
pub const PROGRESS_PREVIEW_CHARS: usize = 60;

/// Emitted after each claim check completes, in claim order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// 1-based claim index
    pub index: usize,
    /// Number of extracted claims
    pub total: usize,
    /// Claim text, cut to [`PROGRESS_PREVIEW_CHARS`]
    pub claim_preview: String,
    /// Verdict reached for this claim
    pub label: VerdictLabel,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Checking claim {}/{}: {}...",
            self.index, self.total, self.claim_preview
        )
    }
}
