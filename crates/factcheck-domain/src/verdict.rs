//! Verdict module - the outcome of checking a claim

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of a claim against its evidence
///
/// Always one of five fixed values; free-form labels from a model are
/// rejected at parse time rather than carried through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictLabel {
    /// Evidence supports the claim
    Accurate,
    /// Evidence contradicts the claim
    Inaccurate,
    /// Evidence supports part of the claim
    PartiallyAccurate,
    /// Evidence is insufficient to decide
    Unverifiable,
    /// Checking failed before a verdict could be reached
    Error,
}

impl VerdictLabel {
    /// All labels in display order
    pub const ALL: [VerdictLabel; 5] = [
        VerdictLabel::Accurate,
        VerdictLabel::Inaccurate,
        VerdictLabel::PartiallyAccurate,
        VerdictLabel::Unverifiable,
        VerdictLabel::Error,
    ];

    /// Wire form of the label
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictLabel::Accurate => "ACCURATE",
            VerdictLabel::Inaccurate => "INACCURATE",
            VerdictLabel::PartiallyAccurate => "PARTIALLY_ACCURATE",
            VerdictLabel::Unverifiable => "UNVERIFIABLE",
            VerdictLabel::Error => "ERROR",
        }
    }

    /// Whether the label falls in the combined "unverifiable" display bucket
    pub fn is_unverifiable_or_error(&self) -> bool {
        matches!(self, VerdictLabel::Unverifiable | VerdictLabel::Error)
    }
}

impl fmt::Display for VerdictLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VerdictLabel {
    type Err = String;

    /// Case-insensitive; spaces and hyphens are read as underscores
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        VerdictLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == normalized)
            .ok_or_else(|| format!("Unknown verdict label: {}", s))
    }
}

/// Confidence tier attached to a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceTier {
    /// Strong, consistent evidence
    High,
    /// Some evidence, some gaps
    Medium,
    /// Weak or missing evidence
    Low,
}

impl ConfidenceTier {
    /// Wire form of the tier
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "HIGH",
            ConfidenceTier::Medium => "MEDIUM",
            ConfidenceTier::Low => "LOW",
        }
    }
}

impl fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfidenceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "HIGH" => Ok(ConfidenceTier::High),
            "MEDIUM" => Ok(ConfidenceTier::Medium),
            "LOW" => Ok(ConfidenceTier::Low),
            _ => Err(format!("Unknown confidence tier: {}", s)),
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_uppercase().replace([' ', '-'], "_")
}

/// Verdict for a single claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Classification
    #[serde(rename = "verdict")]
    pub label: VerdictLabel,

    /// Confidence tier
    pub confidence: ConfidenceTier,

    /// Short explanation of the verdict
    pub explanation: String,

    /// Supporting or contradicting evidence, may be empty
    #[serde(default)]
    pub evidence: String,
}

impl Verdict {
    /// Create a new verdict
    pub fn new(
        label: VerdictLabel,
        confidence: ConfidenceTier,
        explanation: impl Into<String>,
        evidence: impl Into<String>,
    ) -> Self {
        Self {
            label,
            confidence,
            explanation: explanation.into(),
            evidence: evidence.into(),
        }
    }

    /// Synthetic verdict for a claim whose check failed
    ///
    /// # Examples
    ///
    /// ```
    /// use factcheck_domain::{ConfidenceTier, Verdict, VerdictLabel};
    ///
    /// let verdict = Verdict::error("Search failed: timeout");
    /// assert_eq!(verdict.label, VerdictLabel::Error);
    /// assert_eq!(verdict.confidence, ConfidenceTier::Low);
    /// assert!(verdict.evidence.is_empty());
    /// ```
    pub fn error(explanation: impl Into<String>) -> Self {
        Self::new(VerdictLabel::Error, ConfidenceTier::Low, explanation, "")
    }
}
