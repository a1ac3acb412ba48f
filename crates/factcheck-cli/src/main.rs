//! factcheck CLI - Check the factual claims in a document.

use clap::Parser;
use factcheck_cli::cli::CliFormat;
use factcheck_cli::commands;
use factcheck_cli::config::Settings;
use factcheck_cli::{Cli, Command, Config, Formatter};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> factcheck_cli::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let loaded = Config::load_from(&config_path);

    match cli.command {
        Command::Check(args) => {
            let config = loaded?.with_key_overrides(cli.mistral_api_key, cli.tavily_api_key)?;
            let formatter = formatter(cli.format, cli.no_color, &config.settings);
            commands::execute_check(args, &config, &formatter).await?
        }
        Command::Summarize(args) => {
            let formatter = formatter(cli.format, cli.no_color, &settings_of(&loaded));
            commands::execute_summarize(args, &formatter).await?
        }
        Command::Config(args) => {
            let formatter = formatter(cli.format, cli.no_color, &settings_of(&loaded));
            commands::execute_config(args, loaded, &config_path, &formatter).await?
        }
    }

    Ok(())
}

/// Display settings from the file, or defaults when it cannot be read
fn settings_of(loaded: &factcheck_cli::Result<Config>) -> Settings {
    match loaded {
        Ok(config) => config.settings.clone(),
        Err(e) => {
            warn!("Using default display settings: {}", e);
            Settings::default()
        }
    }
}

fn formatter(format: Option<CliFormat>, no_color: bool, settings: &Settings) -> Formatter {
    let format = format.map(Into::into).unwrap_or(settings.format);
    Formatter::new(format, !no_color && settings.color)
}

/// Log to stderr; `RUST_LOG` overrides the verbosity flags
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
