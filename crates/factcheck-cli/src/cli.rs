//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use factcheck_domain::traits::SearchDepth;
use factcheck_pipeline::PipelineConfig;
use std::path::PathBuf;

/// factcheck - Extract the factual claims in a document and check each one against the web.
#[derive(Debug, Parser)]
#[command(name = "factcheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Mistral API key
    #[arg(long, env = "MISTRAL_API_KEY", hide_env_values = true, global = true)]
    pub mistral_api_key: Option<String>,

    /// Tavily API key
    #[arg(long, env = "TAVILY_API_KEY", hide_env_values = true, global = true)]
    pub tavily_api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (one verdict per line)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check the claims in a document
    Check(CheckArgs),

    /// Show the summary of an exported result file
    Summarize(SummarizeArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the check command.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Plain-text document to check
    #[arg(required_unless_present = "stdin")]
    pub path: Option<PathBuf>,

    /// Read the document from stdin
    #[arg(long, conflicts_with = "path")]
    pub stdin: bool,

    /// Write results as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Start from a preset instead of the configured pipeline settings
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Claims checked at once
    #[arg(short = 'j', long)]
    pub concurrency: Option<usize>,

    /// Search depth
    #[arg(long, value_enum)]
    pub depth: Option<DepthArg>,
}

/// Arguments for the summarize command.
#[derive(Debug, Args)]
pub struct SummarizeArgs {
    /// Exported result file
    pub file: PathBuf,
}

/// Arguments for configuration management.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration with keys masked
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

/// Pipeline presets.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PresetArg {
    /// Default settings
    Default,
    /// More evidence per claim
    Thorough,
    /// Shallow search, several claims at once
    Fast,
}

/// Search depth argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum DepthArg {
    /// Quicker, less thorough search
    Shallow,
    /// Slower, more thorough search
    Deep,
}

impl CheckArgs {
    /// Apply preset and flag overrides to the configured pipeline settings.
    pub fn pipeline_config(&self, configured: &PipelineConfig) -> PipelineConfig {
        let mut config = match self.preset {
            Some(preset) => preset.into(),
            None => configured.clone(),
        };
        if let Some(concurrency) = self.concurrency {
            config.max_concurrency = concurrency;
        }
        if let Some(depth) = self.depth {
            config.search_depth = depth.into();
        }
        config
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<PresetArg> for PipelineConfig {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Default => PipelineConfig::default(),
            PresetArg::Thorough => PipelineConfig::thorough(),
            PresetArg::Fast => PipelineConfig::fast(),
        }
    }
}

impl From<DepthArg> for SearchDepth {
    fn from(depth: DepthArg) -> Self {
        match depth {
            DepthArg::Shallow => SearchDepth::Shallow,
            DepthArg::Deep => SearchDepth::Deep,
        }
    }
}
