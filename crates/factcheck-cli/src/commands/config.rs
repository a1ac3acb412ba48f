//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;

/// Execute the config command.
///
/// `loaded` is the outcome of reading the file at `path`. Only `show` needs
/// it, so `init` and `path` still work when the file is broken.
pub async fn execute_config(
    args: ConfigArgs,
    loaded: Result<Config>,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            let config = loaded?;
            let shown = toml::to_string_pretty(&config.redacted())
                .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
            println!("{}", shown);
            if let Err(e) = config.validate() {
                eprintln!("{}", formatter.warning(&e.to_string()));
            }
        }
        ConfigAction::Init { force } => {
            init_config(path, force)?;
            println!(
                "{}",
                formatter.success(&format!("Wrote default configuration to {}", path.display()))
            );
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
    }

    Ok(())
}

/// Write a default configuration file unless one exists.
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CliError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    Config::default().save_to(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use std::fs;
    use tempfile::TempDir;

    fn formatter() -> Formatter {
        Formatter::new(OutputFormat::Table, false)
    }

    #[test]
    fn test_init_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        init_config(&path, false).unwrap();
        assert!(path.exists());
        assert!(Config::load_from(&path).is_ok());

        assert!(init_config(&path, false).is_err());
        assert!(init_config(&path, true).is_ok());
    }

    #[tokio::test]
    async fn test_broken_file_can_be_replaced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[pipeline\nmax_concurrency = ").unwrap();

        let loaded = Config::load_from(&path);
        assert!(matches!(loaded, Err(CliError::Toml(_))));

        let args = ConfigArgs {
            action: ConfigAction::Init { force: true },
        };
        execute_config(args, loaded, &path, &formatter()).await.unwrap();

        assert!(Config::load_from(&path).is_ok());
    }

    #[tokio::test]
    async fn test_path_ignores_broken_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "not = [valid").unwrap();

        let args = ConfigArgs {
            action: ConfigAction::Path,
        };
        let loaded = Config::load_from(&path);
        assert!(execute_config(args, loaded, &path, &formatter()).await.is_ok());
    }

    #[tokio::test]
    async fn test_show_reports_broken_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "not = [valid").unwrap();

        let args = ConfigArgs {
            action: ConfigAction::Show,
        };
        let loaded = Config::load_from(&path);
        assert!(execute_config(args, loaded, &path, &formatter()).await.is_err());
    }
}
