//! Per-claim results and run-level summary

use crate::{Claim, Source, Verdict, VerdictLabel};
use serde::{Deserialize, Serialize};

/// Output unit for one claim
///
/// Serializes to the export record shape:
/// `{claim, category, search_query, analysis{...}, sources[...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimResult {
    /// The asserted statement
    pub claim: String,

    /// Category label
    pub category: String,

    /// Query used to retrieve evidence
    pub search_query: String,

    /// Verdict for the claim
    #[serde(rename = "analysis")]
    pub verdict: Verdict,

    /// Leading sources in retrieval order
    #[serde(rename = "sources", default)]
    pub top_sources: Vec<Source>,
}

impl ClaimResult {
    /// Build a result keeping the first `limit` sources in the order given
    pub fn new(claim: &Claim, verdict: Verdict, sources: &[Source], limit: usize) -> Self {
        Self {
            claim: claim.text().to_string(),
            category: claim.category().to_string(),
            search_query: claim.search_query().to_string(),
            verdict,
            top_sources: sources.iter().take(limit).cloned().collect(),
        }
    }

    /// Verdict label shortcut
    pub fn label(&self) -> VerdictLabel {
        self.verdict.label
    }
}

/// Number of results per verdict label
///
/// UNVERIFIABLE and ERROR are tracked separately; use
/// [`VerdictCounts::unverifiable_or_error`] for the combined display bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictCounts {
    /// ACCURATE verdicts
    pub accurate: usize,
    /// INACCURATE verdicts
    pub inaccurate: usize,
    /// PARTIALLY_ACCURATE verdicts
    pub partially_accurate: usize,
    /// UNVERIFIABLE verdicts
    pub unverifiable: usize,
    /// ERROR verdicts
    pub error: usize,
}

impl VerdictCounts {
    /// Count the labels of a result sequence
    pub fn tally(results: &[ClaimResult]) -> Self {
        let mut counts = Self::default();
        for result in results {
            counts.record(result.label());
        }
        counts
    }

    /// Record one verdict
    pub fn record(&mut self, label: VerdictLabel) {
        match label {
            VerdictLabel::Accurate => self.accurate += 1,
            VerdictLabel::Inaccurate => self.inaccurate += 1,
            VerdictLabel::PartiallyAccurate => self.partially_accurate += 1,
            VerdictLabel::Unverifiable => self.unverifiable += 1,
            VerdictLabel::Error => self.error += 1,
        }
    }

    /// Count for a single label
    pub fn get(&self, label: VerdictLabel) -> usize {
        match label {
            VerdictLabel::Accurate => self.accurate,
            VerdictLabel::Inaccurate => self.inaccurate,
            VerdictLabel::PartiallyAccurate => self.partially_accurate,
            VerdictLabel::Unverifiable => self.unverifiable,
            VerdictLabel::Error => self.error,
        }
    }

    /// Combined UNVERIFIABLE + ERROR bucket
    pub fn unverifiable_or_error(&self) -> usize {
        self.unverifiable + self.error
    }

    /// Total number of verdicts
    pub fn total(&self) -> usize {
        self.accurate + self.inaccurate + self.partially_accurate + self.unverifiable_or_error()
    }
}

/// Aggregate outcome of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Counts by verdict label
    pub counts: VerdictCounts,
    /// Every result, in extraction order
    pub results: Vec<ClaimResult>,
}

impl RunSummary {
    /// Whether the run produced no results
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of results
    pub fn len(&self) -> usize {
        self.results.len()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::ConfidenceTier;
    use proptest::prelude::*;

    fn label_strategy() -> impl Strategy<Value = VerdictLabel> {
        (0usize..5).prop_map(|i| VerdictLabel::ALL[i])
    }

    proptest! {
        /// Property: top_sources is a prefix of the retrieved order, never longer than the limit
        #[test]
        fn test_top_sources_prefix(n in 0usize..12, limit in 0usize..6) {
            let all: Vec<Source> = (0..n)
                .map(|i| Source::new(format!("t{}", i), format!("u{}", i), "c"))
                .collect();
            let result = ClaimResult::new(&Claim::new("c"), Verdict::error("e"), &all, limit);

            prop_assert!(result.top_sources.len() <= limit);
            prop_assert!(result.top_sources.len() <= n);
            prop_assert_eq!(&result.top_sources[..], &all[..result.top_sources.len()]);
        }

        /// Property: tally covers every result exactly once
        #[test]
        fn test_tally_total(labels in proptest::collection::vec(label_strategy(), 0..40)) {
            let results: Vec<ClaimResult> = labels
                .iter()
                .map(|label| {
                    let verdict = Verdict::new(*label, ConfidenceTier::Low, "", "");
                    ClaimResult::new(&Claim::new("c"), verdict, &[], 3)
                })
                .collect();
            let counts = VerdictCounts::tally(&results);

            prop_assert_eq!(counts.total(), labels.len());
            for label in VerdictLabel::ALL {
                let expected = labels.iter().filter(|l| **l == label).count();
                prop_assert_eq!(counts.get(label), expected);
            }
        }
    }
}
