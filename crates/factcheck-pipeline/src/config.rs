//! Configuration for a pipeline run

use factcheck_domain::traits::SearchDepth;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for retrieval, analysis and orchestration
///
/// # Examples
///
/// ```
/// use factcheck_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::default();
/// assert_eq!(config.top_sources, 3);
/// assert_eq!(config.max_concurrency, 1);
///
/// let fast = PipelineConfig::fast();
/// assert!(fast.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Sources requested from the search service per claim
    pub max_search_results: usize,

    /// Search depth for evidence retrieval
    pub search_depth: SearchDepth,

    /// Sources included in the analysis prompt
    pub prompt_sources: usize,

    /// Characters of each source's content included in the analysis prompt
    pub prompt_snippet_chars: usize,

    /// Sources kept on each ClaimResult
    pub top_sources: usize,

    /// Sampling temperature for verdict analysis
    pub analysis_temperature: f32,

    /// Maximum time for one analysis call (seconds)
    pub analysis_timeout_secs: u64,

    /// Claims checked at the same time; 1 is strictly sequential
    pub max_concurrency: usize,

    /// Extraction attempts; attempts after the first only follow service errors
    pub extraction_attempts: u32,

    /// Base delay between extraction attempts (milliseconds), doubled per attempt
    pub retry_backoff_ms: u64,
}

impl PipelineConfig {
    /// Analysis timeout as a Duration
    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_search_results == 0 {
            return Err("max_search_results must be greater than 0".to_string());
        }
        if self.prompt_sources == 0 {
            return Err("prompt_sources must be greater than 0".to_string());
        }
        if self.prompt_snippet_chars == 0 {
            return Err("prompt_snippet_chars must be greater than 0".to_string());
        }
        if self.top_sources > self.max_search_results {
            return Err("top_sources cannot exceed max_search_results".to_string());
        }
        if !(0.0..=1.0).contains(&self.analysis_temperature) {
            return Err(format!(
                "analysis_temperature {} out of range [0.0, 1.0]",
                self.analysis_temperature
            ));
        }
        if self.analysis_timeout_secs == 0 {
            return Err("analysis_timeout_secs must be greater than 0".to_string());
        }
        if self.max_concurrency == 0 {
            return Err("max_concurrency must be greater than 0".to_string());
        }
        if self.extraction_attempts == 0 {
            return Err("extraction_attempts must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Thorough preset: more evidence per claim, longer timeouts
    pub fn thorough() -> Self {
        Self {
            max_search_results: 8,
            prompt_sources: 8,
            prompt_snippet_chars: 800,
            analysis_timeout_secs: 300,
            extraction_attempts: 3,
            ..Self::default()
        }
    }

    /// Fast preset: shallow search, a few claims in flight at once
    pub fn fast() -> Self {
        Self {
            max_search_results: 3,
            search_depth: SearchDepth::Shallow,
            prompt_sources: 3,
            prompt_snippet_chars: 300,
            analysis_timeout_secs: 60,
            max_concurrency: 4,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_search_results: 5,
            search_depth: SearchDepth::Deep,
            prompt_sources: 5,
            prompt_snippet_chars: 500,
            top_sources: 3,
            analysis_temperature: 0.1,
            analysis_timeout_secs: 120,
            max_concurrency: 1,
            extraction_attempts: 1,
            retry_backoff_ms: 1_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
        assert!(PipelineConfig::thorough().validate().is_ok());
        assert!(PipelineConfig::fast().validate().is_ok());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let config = PipelineConfig {
            max_concurrency: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_top_sources_bounded_by_search_results() {
        let config = PipelineConfig {
            max_search_results: 2,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = PipelineConfig::from_toml("max_concurrency = 3\nsearch_depth = \"shallow\"").unwrap();
        assert_eq!(config.max_concurrency, 3);
        assert_eq!(config.search_depth, SearchDepth::Shallow);
        assert_eq!(config.top_sources, 3);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = PipelineConfig::thorough();
        let parsed = PipelineConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }
}
