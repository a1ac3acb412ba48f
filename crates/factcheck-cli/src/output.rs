//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use factcheck_domain::{ClaimResult, RunSummary, VerdictCounts, VerdictLabel};
use factcheck_pipeline::{to_json, Progress, RunReport, RunStatus};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Characters of source content shown per source
pub const SOURCE_DISPLAY_CHARS: usize = 300;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format the outcome of a check run.
    pub fn format_report(&self, report: &RunReport) -> Result<String> {
        if self.format != OutputFormat::Table {
            return self.format_summary(&report.summary);
        }

        let mut out = String::new();
        match &report.status {
            RunStatus::NoClaims { reason: Some(reason) } => {
                out.push_str(&self.error(&format!("Claim extraction failed: {}", reason)));
                out.push('\n');
                out.push_str(&self.warning("No claims found in the document."));
                return Ok(out);
            }
            RunStatus::NoClaims { reason: None } => {
                return Ok(self.warning("No claims found in the document."));
            }
            RunStatus::Cancelled { completed, total } => {
                out.push_str(&self.warning(&format!(
                    "Cancelled after {} of {} claims; showing completed results.",
                    completed, total
                )));
                out.push_str("\n\n");
            }
            RunStatus::Completed => {}
        }

        out.push_str(&self.format_summary(&report.summary)?);
        Ok(out)
    }

    /// Format a summary: counts, then every claim in detail.
    pub fn format_summary(&self, summary: &RunSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(to_json(&summary.results)?),
            OutputFormat::Quiet => Ok(self.format_quiet(summary)),
            OutputFormat::Table => Ok(self.format_table(summary)),
        }
    }

    fn format_table(&self, summary: &RunSummary) -> String {
        if summary.is_empty() {
            return self.colorize("No claims found.", "yellow");
        }

        let mut out = String::new();
        out.push_str(&format!("Total claims analyzed: {}\n", summary.len()));
        out.push_str(&self.counts_table(&summary.counts));
        out.push_str("\n\nDetailed Results\n");

        for (i, result) in summary.results.iter().enumerate() {
            out.push('\n');
            out.push_str(&self.claim_detail(i + 1, result));
        }

        out
    }

    /// Four-bucket verdict count table.
    pub fn counts_table(&self, counts: &VerdictCounts) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Accurate", "Inaccurate", "Partially Accurate", "Unverifiable/Error"]);
        builder.push_record([
            counts.accurate.to_string(),
            counts.inaccurate.to_string(),
            counts.partially_accurate.to_string(),
            counts.unverifiable_or_error().to_string(),
        ]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Detail block for one claim.
    pub fn claim_detail(&self, index: usize, result: &ClaimResult) -> String {
        let verdict = &result.verdict;
        let mut out = format!("Claim {}: {}\n", index, result.category);
        out.push_str(&format!("  Claim:       {}\n", result.claim));
        out.push_str(&format!(
            "  Verdict:     {}\n",
            self.verdict_label(verdict.label)
        ));
        out.push_str(&format!("  Confidence:  {}\n", verdict.confidence));
        out.push_str(&format!("  Explanation: {}\n", verdict.explanation));
        if !verdict.evidence.is_empty() {
            out.push_str(&format!("  Evidence:    {}\n", verdict.evidence));
        }

        if !result.top_sources.is_empty() {
            out.push_str("  Sources:\n");
            for (i, source) in result.top_sources.iter().enumerate() {
                out.push_str(&format!("    {}. {}\n", i + 1, source.title));
                out.push_str(&format!("       {}\n", self.colorize(&source.url, "cyan")));
                out.push_str(&format!(
                    "       {}\n",
                    display_snippet(&source.content, SOURCE_DISPLAY_CHARS)
                ));
            }
        }

        out
    }

    fn format_quiet(&self, summary: &RunSummary) -> String {
        summary
            .results
            .iter()
            .map(|r| format!("{}\t{}", r.label(), r.claim))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Verdict label colored by outcome.
    pub fn verdict_label(&self, label: VerdictLabel) -> String {
        let color = match label {
            VerdictLabel::Accurate => "green",
            VerdictLabel::Inaccurate => "red",
            VerdictLabel::PartiallyAccurate => "yellow",
            VerdictLabel::Unverifiable | VerdictLabel::Error => "grey",
        };
        self.colorize(label.as_str(), color)
    }

    /// Progress line for a checked claim.
    pub fn progress(&self, progress: &Progress) -> String {
        format!("{} {}", progress, self.verdict_label(progress.label))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "grey" => text.bright_black().to_string(),
            _ => text.to_string(),
        }
    }
}

/// First `max_chars` characters, with an ellipsis when cut.
pub fn display_snippet(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use factcheck_domain::{Claim, ConfidenceTier, RunId, Source, Verdict};
    use factcheck_pipeline::aggregate;

    fn summary() -> RunSummary {
        let accurate = ClaimResult::new(
            &Claim::new("Bitcoin was created in 2009").with_category("Cryptocurrency"),
            Verdict::new(VerdictLabel::Accurate, ConfidenceTier::High, "Whitepaper 2008, launch 2009.", "Source 1"),
            &[Source::new("Bitcoin", "https://example.com/btc", "y".repeat(400))],
            3,
        );
        let failed = ClaimResult::new(
            &Claim::new("GPT-5 has 10T parameters"),
            Verdict::error("Search failed: timeout"),
            &[],
            3,
        );
        aggregate(vec![accurate, failed])
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_summary(&summary()).unwrap();
        assert!(output.contains("Total claims analyzed: 2"));
        assert!(output.contains("Unverifiable/Error"));
        assert!(output.contains("Claim 1: Cryptocurrency"));
        assert!(output.contains("Verdict:     ACCURATE"));
        assert!(output.contains("Evidence:    Source 1"));
        assert!(output.contains("Claim 2: General"));
        assert!(output.contains("Search failed: timeout"));
    }

    #[test]
    fn test_source_content_truncated_for_display() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_summary(&summary()).unwrap();
        assert!(output.contains(&format!("{}...", "y".repeat(SOURCE_DISPLAY_CHARS))));
        assert!(!output.contains(&"y".repeat(SOURCE_DISPLAY_CHARS + 1)));
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_summary(&summary()).unwrap();
        assert!(output.contains("\"analysis\""));
        assert!(output.contains(&"y".repeat(400)));
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_summary(&summary()).unwrap();
        assert_eq!(
            output,
            "ACCURATE\tBitcoin was created in 2009\nERROR\tGPT-5 has 10T parameters"
        );
    }

    #[test]
    fn test_no_claims_report() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let report = RunReport {
            run_id: RunId::new(),
            summary: RunSummary::default(),
            status: RunStatus::NoClaims {
                reason: Some("Parse error: not JSON".to_string()),
            },
        };
        let output = formatter.format_report(&report).unwrap();
        assert!(output.contains("Claim extraction failed: Parse error: not JSON"));
        assert!(output.contains("No claims found"));
    }

    #[test]
    fn test_cancelled_report() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let report = RunReport {
            run_id: RunId::new(),
            summary: summary(),
            status: RunStatus::Cancelled { completed: 2, total: 5 },
        };
        let output = formatter.format_report(&report).unwrap();
        assert!(output.contains("Cancelled after 2 of 5 claims"));
        assert!(output.contains("Total claims analyzed: 2"));
    }

    #[test]
    fn test_progress_line() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let progress = Progress {
            index: 1,
            total: 3,
            claim_preview: "Bitcoin was created in 2009".to_string(),
            label: VerdictLabel::Accurate,
        };
        assert_eq!(
            formatter.progress(&progress),
            "Checking claim 1/3: Bitcoin was created in 2009... ACCURATE"
        );
    }

    #[test]
    fn test_display_snippet() {
        assert_eq!(display_snippet("short", 300), "short");
        assert_eq!(display_snippet("héllo wörld", 5), "héllo...");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
