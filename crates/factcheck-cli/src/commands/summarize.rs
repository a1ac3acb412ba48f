//! Summarize command implementation.

use crate::cli::SummarizeArgs;
use crate::error::Result;
use crate::output::Formatter;
use factcheck_pipeline::read_export;

/// Execute the summarize command.
pub async fn execute_summarize(args: SummarizeArgs, formatter: &Formatter) -> Result<()> {
    let summary = read_export(&args.file)?;
    println!("{}", formatter.format_summary(&summary)?);
    Ok(())
}
