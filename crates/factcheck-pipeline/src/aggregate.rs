//! Result aggregation

use factcheck_domain::{ClaimResult, RunSummary, VerdictCounts};

/// Count verdicts and wrap the results into a [`RunSummary`]
///
/// Pure: result order is kept and the same input always gives the same counts.
pub fn aggregate(results: Vec<ClaimResult>) -> RunSummary {
    RunSummary {
        counts: VerdictCounts::tally(&results),
        results,
    }
}
