//! Pipeline orchestration
//!
//! One run moves through `Extracting`, then a retrieve/analyze check per
//! claim, then `Aggregating`. Claim checks never fail the run; the worst a
//! claim can end with is an ERROR verdict.

use crate::aggregate::aggregate;
use crate::analyzer::VerdictAnalyzer;
use crate::cancel::CancelToken;
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::progress::{Progress, PROGRESS_PREVIEW_CHARS};
use crate::report::{RunReport, RunStatus};
use crate::retriever::EvidenceRetriever;
use factcheck_domain::traits::{LlmProvider, SearchProvider};
use factcheck_domain::{Claim, ClaimResult, RunId, RunSummary, Verdict};
use factcheck_extractor::{ClaimExtractor, ExtractorConfig, ExtractorError};
use futures::future::ready;
use futures::stream::{self, StreamExt};
use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Claim-checking pipeline over an LLM and a search service
///
/// The pipeline holds only its components and configuration. Each run
/// gets its own [`CancelToken`], so nothing carries over between runs.
pub struct Pipeline<L, S>
where
    L: LlmProvider,
    S: SearchProvider,
{
    extractor: ClaimExtractor<L>,
    retriever: EvidenceRetriever<S>,
    analyzer: VerdictAnalyzer<L>,
    config: PipelineConfig,
}

impl<L, S> Pipeline<L, S>
where
    L: LlmProvider,
    S: SearchProvider,
{
    /// Build a pipeline; the LLM provider is shared by extraction and analysis
    pub fn new(
        llm: L,
        search: S,
        extractor_config: ExtractorConfig,
        config: PipelineConfig,
    ) -> Result<Self> {
        extractor_config.validate().map_err(PipelineError::Config)?;
        config.validate().map_err(PipelineError::Config)?;

        let llm = Arc::new(llm);
        let analyzer = VerdictAnalyzer::new(
            Arc::clone(&llm),
            config.prompt_sources,
            config.prompt_snippet_chars,
            config.analysis_temperature,
            config.analysis_timeout(),
        );
        let retriever = EvidenceRetriever::new(
            Arc::new(search),
            config.max_search_results,
            config.search_depth,
        );

        Ok(Self {
            extractor: ClaimExtractor::with_shared(llm, extractor_config),
            retriever,
            analyzer,
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Check every claim in a document
    ///
    /// `on_progress` is called once per checked claim, in claim order.
    ///
    /// # Errors
    ///
    /// `Input` if the text is empty. Extraction failures are not errors;
    /// they end the run with [`RunStatus::NoClaims`].
    pub async fn run<F>(&self, document_text: &str, on_progress: F) -> Result<RunReport>
    where
        F: FnMut(&Progress),
    {
        self.run_with_cancel(document_text, &CancelToken::new(), on_progress)
            .await
    }

    /// Like [`Pipeline::run`], stopping early once `cancel` is signalled
    ///
    /// The token only affects this run. Checks already in flight when it is
    /// signalled finish and their results are kept.
    pub async fn run_with_cancel<F>(
        &self,
        document_text: &str,
        cancel: &CancelToken,
        mut on_progress: F,
    ) -> Result<RunReport>
    where
        F: FnMut(&Progress),
    {
        let run_id = RunId::new();

        if document_text.trim().is_empty() {
            return Err(PipelineError::Input("Document text is empty".to_string()));
        }

        info!("[run {}] Extracting claims", run_id);
        let claims = match self.extract_with_retry(run_id, document_text).await {
            Ok(claims) => claims,
            Err(ExtractorError::EmptyInput) => {
                return Err(PipelineError::Input("Document text is empty".to_string()));
            }
            Err(e) => {
                warn!("[run {}] Extraction failed: {}", run_id, e);
                return Ok(RunReport {
                    run_id,
                    summary: RunSummary::default(),
                    status: RunStatus::NoClaims {
                        reason: Some(e.to_string()),
                    },
                });
            }
        };

        if claims.is_empty() {
            info!("[run {}] No claims found", run_id);
            return Ok(RunReport {
                run_id,
                summary: RunSummary::default(),
                status: RunStatus::NoClaims { reason: None },
            });
        }

        let total = claims.len();
        info!(
            "[run {}] Checking {} claims, concurrency {}",
            run_id, total, self.config.max_concurrency
        );

        let mut results = Vec::with_capacity(total);
        {
            let checks = stream::iter(claims.iter())
                .take_while(|_| ready(!cancel.is_cancelled()))
                .map(|claim| async move { (claim, self.check_claim(claim).await) })
                .buffered(self.config.max_concurrency);
            let mut checks = pin!(checks);

            while let Some((claim, result)) = checks.next().await {
                let progress = Progress {
                    index: results.len() + 1,
                    total,
                    claim_preview: claim.preview(PROGRESS_PREVIEW_CHARS),
                    label: result.label(),
                };
                debug!("[run {}] {} -> {}", run_id, progress, progress.label);
                on_progress(&progress);
                results.push(result);
            }
        }

        let completed = results.len();
        info!("[run {}] Aggregating {} results", run_id, completed);
        let summary = aggregate(results);

        let status = if completed < total {
            warn!("[run {}] Cancelled after {}/{} claims", run_id, completed, total);
            RunStatus::Cancelled { completed, total }
        } else {
            RunStatus::Completed
        };

        info!("[run {}] Done", run_id);
        Ok(RunReport {
            run_id,
            summary,
            status,
        })
    }

    /// Retrieve evidence for one claim and judge it
    pub async fn check_claim(&self, claim: &Claim) -> ClaimResult {
        let outcome = self.retriever.retrieve(claim.search_query()).await;

        let verdict = if outcome.success {
            self.analyzer.analyze(claim.text(), &outcome.sources).await
        } else {
            Verdict::error(format!("Search failed: {}", outcome.error_message()))
        };

        ClaimResult::new(claim, verdict, &outcome.sources, self.config.top_sources)
    }

    async fn extract_with_retry(
        &self,
        run_id: RunId,
        document_text: &str,
    ) -> std::result::Result<Vec<Claim>, ExtractorError> {
        let mut attempt = 1;
        let mut backoff = Duration::from_millis(self.config.retry_backoff_ms);

        loop {
            match self.extractor.extract(document_text).await {
                Err(e) if e.is_service_error() && attempt < self.config.extraction_attempts => {
                    warn!(
                        "[run {}] Extraction attempt {} failed: {}, retrying in {:?}",
                        run_id, attempt, e, backoff
                    );
                    sleep(backoff).await;
                    backoff *= 2;
                    attempt += 1;
                }
                outcome => return outcome,
            }
        }
    }
}

/// Run the pipeline once with default configuration
///
/// `progress` receives `(index, total, claim_text_prefix)` after each claim.
pub async fn run_pipeline<L, S, F>(
    llm: L,
    search: S,
    document_text: &str,
    mut progress: F,
) -> Result<RunSummary>
where
    L: LlmProvider,
    S: SearchProvider,
    F: FnMut(usize, usize, &str),
{
    let pipeline = Pipeline::new(
        llm,
        search,
        ExtractorConfig::default(),
        PipelineConfig::default(),
    )?;
    let report = pipeline
        .run(document_text, |p| progress(p.index, p.total, &p.claim_preview))
        .await?;
    Ok(report.summary)
}
