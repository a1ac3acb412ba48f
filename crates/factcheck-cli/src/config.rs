//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use factcheck_extractor::ExtractorConfig;
use factcheck_llm::MistralConfig;
use factcheck_pipeline::PipelineConfig;
use factcheck_search::TavilyConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// API keys
    #[serde(default)]
    pub credentials: Credentials,

    /// Mistral connection settings
    #[serde(default)]
    pub llm: MistralConfig,

    /// Tavily connection settings
    #[serde(default)]
    pub search: TavilyConfig,

    /// Claim extraction settings
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Retrieval, analysis and orchestration settings
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// API keys for the external services.
///
/// Built once at startup and handed to the provider constructors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Mistral API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mistral_api_key: Option<String>,

    /// Tavily API key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tavily_api_key: Option<String>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".factcheck").join("config.toml"))
    }

    /// Load configuration from `path`, or defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check the extractor and pipeline sections.
    pub fn validate(&self) -> Result<()> {
        self.extractor.validate().map_err(CliError::Config)?;
        self.pipeline.validate().map_err(CliError::Config)?;
        Ok(())
    }

    /// Apply command-line or environment keys, then validate; what `check` runs with.
    pub fn with_key_overrides(
        mut self,
        mistral: Option<String>,
        tavily: Option<String>,
    ) -> Result<Self> {
        self.credentials.override_with(mistral, tavily);
        self.validate()?;
        Ok(self)
    }

    /// Copy with API keys masked, for display.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        config.credentials.mistral_api_key = config.credentials.mistral_api_key.as_deref().map(mask);
        config.credentials.tavily_api_key = config.credentials.tavily_api_key.as_deref().map(mask);
        config
    }
}

impl Credentials {
    /// Let keys given on the command line or in the environment win over the file.
    pub fn override_with(&mut self, mistral: Option<String>, tavily: Option<String>) {
        if let Some(key) = mistral.filter(|k| !k.trim().is_empty()) {
            self.mistral_api_key = Some(key);
        }
        if let Some(key) = tavily.filter(|k| !k.trim().is_empty()) {
            self.tavily_api_key = Some(key);
        }
    }

    /// Mistral key, or an error naming where to set it.
    pub fn mistral(&self) -> Result<&str> {
        require(self.mistral_api_key.as_deref(), "MISTRAL_API_KEY", "mistral_api_key")
    }

    /// Tavily key, or an error naming where to set it.
    pub fn tavily(&self) -> Result<&str> {
        require(self.tavily_api_key.as_deref(), "TAVILY_API_KEY", "tavily_api_key")
    }
}

fn require<'a>(key: Option<&'a str>, env: &str, field: &str) -> Result<&'a str> {
    match key {
        Some(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(CliError::Config(format!(
            "Missing API key: set {} or [credentials] {} in the config file",
            env, field
        ))),
    }
}

fn mask(key: &str) -> String {
    let tail: String = key
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("****{}", tail)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
