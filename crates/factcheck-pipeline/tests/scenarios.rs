//! End-to-end runs of the pipeline against mock services

use factcheck_domain::{ConfidenceTier, SearchResponse, Source, Verdict, VerdictLabel};
use factcheck_extractor::ExtractorConfig;
use factcheck_llm::MockProvider;
use factcheck_pipeline::{
    run_pipeline, CancelToken, Pipeline, PipelineConfig, PipelineError, RunStatus,
};
use factcheck_search::{numbered_sources, MockSearchProvider};

const ACCURATE: &str = r#"{"verdict": "ACCURATE", "confidence": "HIGH", "explanation": "Matches every source.", "evidence": "Source 1 confirms the date."}"#;
const INACCURATE: &str = r#"{"verdict": "INACCURATE", "confidence": "MEDIUM", "explanation": "Sources give a different figure.", "evidence": "Source 2"}"#;

fn claims_json(texts: &[&str]) -> String {
    let items: Vec<String> = texts
        .iter()
        .map(|t| format!(r#"{{"claim": "{}", "category": "General", "search_query": "{}"}}"#, t, t))
        .collect();
    format!("[{}]", items.join(","))
}

fn pipeline(
    llm: &MockProvider,
    search: &MockSearchProvider,
    config: PipelineConfig,
) -> Pipeline<MockProvider, MockSearchProvider> {
    Pipeline::new(llm.clone(), search.clone(), ExtractorConfig::default(), config).unwrap()
}

#[tokio::test]
async fn empty_document_fails_before_any_service_call() {
    let llm = MockProvider::new(claims_json(&["anything"]));
    let search = MockSearchProvider::with_sources(5);

    let err = run_pipeline(llm.clone(), search.clone(), "   \n", |_, _, _| {})
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Input(_)));
    assert_eq!(llm.call_count(), 0);
    assert_eq!(search.call_count(), 0);
}

#[tokio::test]
async fn no_claims_skips_retrieval_and_analysis() {
    let llm = MockProvider::new("[]");
    let search = MockSearchProvider::with_sources(5);

    let report = pipeline(&llm, &search, PipelineConfig::default())
        .run("Nothing checkable here.", |_| panic!("no progress expected"))
        .await
        .unwrap();

    assert!(report.summary.is_empty());
    assert_eq!(report.status, RunStatus::NoClaims { reason: None });
    assert_eq!(llm.call_count(), 1);
    assert_eq!(search.call_count(), 0);
}

#[tokio::test]
async fn failed_retrieval_yields_error_without_analysis() {
    let llm = MockProvider::new(claims_json(&["The Moon is made of cheese"]));
    let search = MockSearchProvider::failing("timeout");

    let summary = run_pipeline(llm.clone(), search.clone(), "The Moon is made of cheese.", |_, _, _| {})
        .await
        .unwrap();

    assert_eq!(summary.len(), 1);
    let result = &summary.results[0];
    assert_eq!(result.verdict.label, VerdictLabel::Error);
    assert_eq!(result.verdict.confidence, ConfidenceTier::Low);
    assert!(result.verdict.explanation.starts_with("Search failed:"));
    assert!(result.verdict.explanation.contains("timeout"));
    assert!(result.top_sources.is_empty());
    // extraction only
    assert_eq!(llm.call_count(), 1);
    assert_eq!(search.call_count(), 1);
}

#[tokio::test]
async fn successful_check_keeps_top_three_sources() {
    let mut llm = MockProvider::new(claims_json(&["Bitcoin was created in 2009"]));
    llm.add_response("Claim: Bitcoin", ACCURATE);
    let search = MockSearchProvider::with_sources(5);

    let summary = run_pipeline(llm, search, "Bitcoin was created in 2009.", |_, _, _| {})
        .await
        .unwrap();

    let result = &summary.results[0];
    assert_eq!(result.top_sources, numbered_sources(3));
    assert_eq!(
        result.verdict,
        Verdict::new(
            VerdictLabel::Accurate,
            ConfidenceTier::High,
            "Matches every source.",
            "Source 1 confirms the date.",
        )
    );
}

#[tokio::test]
async fn counts_and_order_follow_extraction() {
    let mut llm = MockProvider::new(claims_json(&["First claim", "Second claim"]));
    llm.add_response("Claim: First claim", ACCURATE);
    llm.add_response("Claim: Second claim", INACCURATE);
    let search = MockSearchProvider::with_sources(5);

    let mut seen = Vec::new();
    let summary = run_pipeline(llm, search, "First claim. Second claim.", |i, n, text| {
        seen.push((i, n, text.to_string()))
    })
    .await
    .unwrap();

    assert_eq!(summary.counts.accurate, 1);
    assert_eq!(summary.counts.inaccurate, 1);
    assert_eq!(summary.counts.partially_accurate, 0);
    assert_eq!(summary.counts.unverifiable_or_error(), 0);
    assert_eq!(summary.results[0].claim, "First claim");
    assert_eq!(summary.results[1].claim, "Second claim");
    assert_eq!(
        seen,
        vec![
            (1, 2, "First claim".to_string()),
            (2, 2, "Second claim".to_string()),
        ]
    );
}

#[tokio::test]
async fn concurrent_checks_keep_claim_order() {
    let texts = ["Claim one", "Claim two", "Claim three", "Claim four", "Claim five", "Claim six"];
    let mut llm = MockProvider::new(claims_json(&texts));
    llm.add_response("Claim: Claim two", INACCURATE);
    llm.add_response("Claim: Claim", ACCURATE);
    let mut search = MockSearchProvider::with_sources(5);
    search.add_error("Claim five", "connection reset");

    let config = PipelineConfig {
        max_concurrency: 4,
        ..PipelineConfig::default()
    };
    let mut indices = Vec::new();
    let report = pipeline(&llm, &search, config)
        .run("Six claims.", |p| indices.push(p.index))
        .await
        .unwrap();

    assert_eq!(indices, vec![1, 2, 3, 4, 5, 6]);
    let claims: Vec<&str> = report.summary.results.iter().map(|r| r.claim.as_str()).collect();
    assert_eq!(claims, texts);
    assert_eq!(report.summary.results[1].label(), VerdictLabel::Inaccurate);
    assert_eq!(report.summary.results[4].label(), VerdictLabel::Error);
    assert_eq!(report.summary.counts.accurate, 4);
    assert_eq!(report.status, RunStatus::Completed);
}

#[tokio::test]
async fn cancellation_keeps_completed_results() {
    let texts = ["Claim A", "Claim B", "Claim C", "Claim D"];
    let mut llm = MockProvider::new(claims_json(&texts));
    llm.add_response("Claim: Claim", ACCURATE);
    let search = MockSearchProvider::with_sources(5);

    let pipeline = pipeline(&llm, &search, PipelineConfig::default());
    let token = CancelToken::new();

    let report = pipeline
        .run_with_cancel("Four claims.", &token, |p| {
            if p.index == 2 {
                token.cancel();
            }
        })
        .await
        .unwrap();

    assert_eq!(report.status, RunStatus::Cancelled { completed: 2, total: 4 });
    assert_eq!(report.summary.len(), 2);
    assert_eq!(report.summary.results[1].claim, "Claim B");
    assert_eq!(search.call_count(), 2);
}

#[tokio::test]
async fn cancellation_does_not_outlive_its_run() {
    let texts = ["Claim A", "Claim B"];
    let mut llm = MockProvider::new(claims_json(&texts));
    llm.add_response("Claim: Claim", ACCURATE);
    let search = MockSearchProvider::with_sources(5);

    let pipeline = pipeline(&llm, &search, PipelineConfig::default());
    let token = CancelToken::new();

    let first = pipeline
        .run_with_cancel("Two claims.", &token, |_| token.cancel())
        .await
        .unwrap();
    assert_eq!(first.status, RunStatus::Cancelled { completed: 1, total: 2 });

    let second = pipeline.run("Two claims.", |_| {}).await.unwrap();
    assert_eq!(second.status, RunStatus::Completed);
    assert_eq!(second.summary.len(), 2);
    assert_eq!(second.summary.counts.accurate, 2);
    assert_eq!(search.call_count(), 3);

    let fresh = CancelToken::new();
    let third = pipeline
        .run_with_cancel("Two claims.", &fresh, |_| {})
        .await
        .unwrap();
    assert_eq!(third.status, RunStatus::Completed);
}

#[tokio::test]
async fn zero_search_results_still_analyzed() {
    let mut llm = MockProvider::new(claims_json(&["An obscure fact"]));
    llm.add_response(
        "Claim: An obscure fact",
        r#"{"verdict": "UNVERIFIABLE", "confidence": "LOW", "explanation": "No sources."}"#,
    );
    let search = MockSearchProvider::new(SearchResponse {
        results: Vec::<Source>::new(),
        answer: None,
    });

    let summary = run_pipeline(llm.clone(), search, "An obscure fact.", |_, _, _| {})
        .await
        .unwrap();

    assert_eq!(summary.results[0].label(), VerdictLabel::Unverifiable);
    assert_eq!(summary.counts.unverifiable_or_error(), 1);
    assert_eq!(llm.call_count(), 2);
}
