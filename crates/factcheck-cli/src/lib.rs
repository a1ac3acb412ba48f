//! factcheck CLI library.
//!
//! Configuration, document input, command execution and output formatting
//! for the `factcheck` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod document;
pub mod error;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
