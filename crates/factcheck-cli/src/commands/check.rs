//! Check command implementation.

use crate::cli::CheckArgs;
use crate::config::{Config, OutputFormat};
use crate::document::PlainTextDocument;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use factcheck_domain::traits::{DocumentSource, LlmProvider, SearchProvider};
use factcheck_llm::MistralProvider;
use factcheck_pipeline::{write_export, CancelToken, Pipeline, RunReport};
use factcheck_search::TavilyProvider;
use tracing::{info, warn};

/// Execute the check command.
pub async fn execute_check(args: CheckArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let document = match &args.path {
        Some(path) => PlainTextDocument::File(path.clone()),
        None => PlainTextDocument::Stdin,
    };
    let text = read_document(&document)?;

    let llm = MistralProvider::from_config(&config.llm, config.credentials.mistral()?)
        .map_err(|e| CliError::Service(e.to_string()))?;
    let search = TavilyProvider::from_config(&config.search, config.credentials.tavily()?)
        .map_err(|e| CliError::Service(e.to_string()))?;

    let pipeline = Pipeline::new(
        llm,
        search,
        config.extractor.clone(),
        args.pipeline_config(&config.pipeline),
    )?;

    let report = run_with_interrupt(&pipeline, &text, formatter).await?;
    println!("{}", formatter.format_report(&report)?);

    if let Some(path) = &args.output {
        if report.found_no_claims() {
            warn!("No results to export, {} not written", path.display());
            return Ok(());
        }
        write_export(&report.summary, path)?;
        if formatter.format() == OutputFormat::Table {
            println!(
                "{}",
                formatter.success(&format!("Results saved to {}", path.display()))
            );
        }
    }

    Ok(())
}

/// Read document text, rejecting documents with nothing to check.
pub fn read_document<D: DocumentSource>(document: &D) -> Result<String> {
    let text = document.read_text().map_err(|e| {
        CliError::InvalidInput(format!("Could not read document: {}", e))
    })?;
    if text.trim().is_empty() {
        return Err(CliError::InvalidInput(
            "Could not extract text from the document".to_string(),
        ));
    }
    Ok(text)
}

/// Run the pipeline with Ctrl+C wired to its cancel token.
pub async fn run_with_interrupt<L, S>(
    pipeline: &Pipeline<L, S>,
    text: &str,
    formatter: &Formatter,
) -> Result<RunReport>
where
    L: LlmProvider,
    S: SearchProvider,
{
    let token = CancelToken::new();
    let interrupt = {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupt received, finishing claims in flight");
                token.cancel();
            }
        })
    };

    let show_progress = formatter.format() == OutputFormat::Table;
    let report = pipeline
        .run_with_cancel(text, &token, |progress| {
            if show_progress {
                eprintln!("{}", formatter.progress(progress));
            }
        })
        .await;
    interrupt.abort();

    let report = report?;
    info!("Run {} finished: {:?}", report.run_id, report.status);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use factcheck_extractor::ExtractorConfig;
    use factcheck_llm::MockProvider;
    use factcheck_pipeline::{PipelineConfig, RunStatus};
    use factcheck_search::MockSearchProvider;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_blank_document_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "  \n\t").unwrap();

        let err = read_document(&PlainTextDocument::File(file.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("Could not extract text"));
    }

    #[tokio::test]
    async fn test_run_with_mocks() {
        let mut llm = MockProvider::new(r#"[{"claim": "Paris is the capital of France"}]"#);
        llm.add_response(
            "Claim: Paris",
            r#"{"verdict": "ACCURATE", "confidence": "HIGH", "explanation": "Well known."}"#,
        );
        let pipeline = Pipeline::new(
            llm,
            MockSearchProvider::with_sources(5),
            ExtractorConfig::default(),
            PipelineConfig::default(),
        )
        .unwrap();
        let formatter = Formatter::new(OutputFormat::Quiet, false);

        let report = run_with_interrupt(&pipeline, "Paris is the capital of France.", &formatter)
            .await
            .unwrap();

        assert_eq!(report.status, RunStatus::Completed);
        assert_eq!(report.summary.counts.accurate, 1);
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Some claim.").unwrap();
        let args = CheckArgs {
            path: Some(file.path().to_path_buf()),
            stdin: false,
            output: None,
            preset: None,
            concurrency: None,
            depth: None,
        };
        let formatter = Formatter::new(OutputFormat::Table, false);

        let err = execute_check(args, &Config::default(), &formatter).await.unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }
}
