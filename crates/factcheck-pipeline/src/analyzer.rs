//! Verdict analysis: judge a claim against its retrieved sources

use factcheck_domain::traits::{CompletionRequest, LlmProvider};
use factcheck_domain::{ConfidenceTier, Source, Verdict, VerdictLabel};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Asks the LLM for a verdict on one claim
///
/// Always returns a [`Verdict`]; a failed or unparseable call yields an
/// ERROR verdict whose explanation carries the reason.
pub struct VerdictAnalyzer<L>
where
    L: LlmProvider,
{
    provider: Arc<L>,
    max_sources: usize,
    snippet_chars: usize,
    temperature: f32,
    timeout: Duration,
}

/// Verdict object as the model writes it
#[derive(Debug, Deserialize)]
struct RawVerdict {
    verdict: String,
    #[serde(default)]
    confidence: Option<String>,
    #[serde(default)]
    explanation: Option<String>,
    #[serde(default)]
    evidence: Option<Value>,
}

impl<L> VerdictAnalyzer<L>
where
    L: LlmProvider,
{
    /// Create an analyzer
    pub fn new(
        provider: Arc<L>,
        max_sources: usize,
        snippet_chars: usize,
        temperature: f32,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            max_sources,
            snippet_chars,
            temperature,
            timeout,
        }
    }

    /// Numbered evidence block covering at most `max_sources` sources
    pub fn format_evidence(&self, sources: &[Source]) -> String {
        let mut block = String::new();
        for (i, source) in sources.iter().take(self.max_sources).enumerate() {
            block.push_str(&format!("\n{}. {}\n", i + 1, source.title));
            block.push_str(&format!("   URL: {}\n", source.url));
            block.push_str(&format!(
                "   Content: {}...\n",
                source.snippet(self.snippet_chars)
            ));
        }
        block
    }

    /// Full analysis prompt for a claim
    pub fn build_prompt(&self, claim: &str, sources: &[Source]) -> String {
        let evidence = if sources.is_empty() {
            "\n(no search results were found)\n".to_string()
        } else {
            self.format_evidence(sources)
        };

        format!(
            "Analyze the following claim against the search results and determine if it's accurate.\n\n\
             Claim: {claim}\n\n\
             Search Results:\n{evidence}\n\
             {ANALYSIS_FORMAT}"
        )
    }

    /// Produce a verdict for a claim
    pub async fn analyze(&self, claim: &str, sources: &[Source]) -> Verdict {
        let prompt = self.build_prompt(claim, sources);
        let request = CompletionRequest::structured(prompt, self.temperature);

        let response = match timeout(self.timeout, self.provider.complete(&request)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return failed(e),
            Err(_) => return failed(format!("timed out after {}s", self.timeout.as_secs())),
        };

        match parse_verdict(&response) {
            Ok(verdict) => {
                debug!("Verdict {} ({}) for '{}'", verdict.label, verdict.confidence, claim);
                verdict
            }
            Err(reason) => failed(reason),
        }
    }
}

fn failed(reason: impl std::fmt::Display) -> Verdict {
    warn!("Analysis failed: {}", reason);
    Verdict::error(format!("Error analyzing claim: {}", reason))
}

/// Parse a model response into a verdict
///
/// The label must be one of the five known values. A missing or unknown
/// confidence is read as LOW.
pub fn parse_verdict(response: &str) -> Result<Verdict, String> {
    let json = strip_code_fence(response);
    let raw: RawVerdict =
        serde_json::from_str(json).map_err(|e| format!("Invalid verdict JSON: {}", e))?;

    let label: VerdictLabel = raw.verdict.parse()?;

    let confidence = match raw.confidence.as_deref().map(str::parse::<ConfidenceTier>) {
        Some(Ok(tier)) => tier,
        Some(Err(e)) => {
            warn!("{}, using LOW", e);
            ConfidenceTier::Low
        }
        None => ConfidenceTier::Low,
    };

    let explanation = raw
        .explanation
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| "No explanation provided".to_string());

    Ok(Verdict::new(
        label,
        confidence,
        explanation,
        evidence_text(raw.evidence),
    ))
}

/// Evidence may come back as a string or a list of strings
fn evidence_text(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    match trimmed.strip_prefix("```") {
        Some(rest) => {
            let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or("");
            body.trim_end().trim_end_matches("```").trim()
        }
        None => trimmed,
    }
}

const ANALYSIS_FORMAT: &str = r#"Provide your analysis in the following JSON format:
{
    "verdict": "ACCURATE" or "INACCURATE" or "PARTIALLY_ACCURATE" or "UNVERIFIABLE",
    "confidence": "HIGH" or "MEDIUM" or "LOW",
    "explanation": "Brief explanation of your verdict (2-3 sentences)",
    "evidence": "Key supporting or contradicting evidence from search results"
}

JSON Response:"#;
