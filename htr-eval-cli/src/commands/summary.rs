//! Summary command implementation

use crate::input::resolve_patterns;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use clap::Args;
use htr_eval_core::EvalReport;
use std::io;

/// Arguments for the summary command
#[derive(Debug, Args)]
pub struct SummaryArgs {
    /// Report files or patterns (supports glob)
    #[arg(value_name = "REPORT", required = true)]
    pub reports: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl SummaryArgs {
    /// Execute the summary command
    pub fn execute(&self) -> Result<()> {
        let paths = resolve_patterns(&self.reports)?;
        log::info!("Summarizing {} reports", paths.len());

        let mut formatter = self.format.formatter(io::stdout().lock());
        for path in paths {
            let report = EvalReport::load(&path)
                .with_context(|| format!("Failed to load report: {}", path.display()))?;
            if report.results.is_empty() {
                log::warn!("{} has no results", path.display());
            }

            let label = if report.config.model.is_empty() {
                path.display().to_string()
            } else {
                format!("{} ({})", report.config.model, path.display())
            };
            formatter.format_summary(&label, &report.summary())?;
        }
        formatter.finish()?;

        Ok(())
    }
}
