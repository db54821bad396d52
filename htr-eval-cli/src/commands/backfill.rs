//! Recompute the metrics of a stored report

use super::EvaluationArgs;
use crate::error::CliError;
use crate::input::FileReader;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use clap::Args;
use htr_eval_core::{EvalReport, Evaluator};
use std::io;
use std::path::{Path, PathBuf};

/// Arguments for the backfill command
#[derive(Debug, Args)]
pub struct BackfillArgs {
    /// Report to recompute
    #[arg(short, long, value_name = "FILE")]
    pub report: PathBuf,

    /// Base directory for the stored transcript paths
    #[arg(short, long, value_name = "DIR", default_value = "./")]
    pub dir: PathBuf,

    #[command(flatten)]
    pub evaluation: EvaluationArgs,

    /// Write the updated report here instead of overwriting the input
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format for the printed summary
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Number of worker threads (default: from config)
    #[arg(long)]
    pub threads: Option<usize>,
}

impl BackfillArgs {
    /// Execute the backfill command
    pub fn execute(&self) -> Result<()> {
        log::info!("Backfilling {}", self.report.display());

        let mut report = EvalReport::load(&self.report)
            .with_context(|| format!("Failed to load report: {}", self.report.display()))?;

        let cli_config = self.evaluation.cli_config()?;
        let evaluation = self
            .evaluation
            .resolve(report.config.evaluation(), &cli_config)?;
        let evaluator = Evaluator::with_config(evaluation)?;
        let format = OutputFormat::resolve(self.format, &cli_config.output.default_format)?;

        let updated = recompute(
            &mut report,
            &evaluator,
            &self.dir,
            self.threads.unwrap_or_else(|| cli_config.worker_threads()),
            cli_config.performance.parallel_threshold_rows,
        )?;
        if updated == 0 {
            return Err(CliError::NoRowsEvaluated.into());
        }
        log::info!("Recomputed {updated} of {} rows", report.results.len());

        report.config.set_evaluation(evaluator.config());
        let path = self.output.as_deref().unwrap_or(&self.report);
        report.save(path, cli_config.output.pretty_json)?;

        let label = if report.config.model.is_empty() {
            report_label(&self.report)
        } else {
            report.config.model.clone()
        };
        let mut formatter = format.formatter(io::stdout().lock());
        formatter.format_summary(&label, &report.summary())?;
        formatter.finish()?;
        eprintln!("Saved report to {}", path.display());

        Ok(())
    }
}

/// Re-read each row's ground truth and replace its metrics in place.
///
/// Rows whose ground truth cannot be read keep their stored metrics. Returns
/// the number of rows recomputed.
fn recompute(
    report: &mut EvalReport,
    evaluator: &Evaluator,
    base: &Path,
    threads: usize,
    parallel_threshold: usize,
) -> Result<usize> {
    let mut indices = Vec::with_capacity(report.results.len());
    let mut ground_truths = Vec::with_capacity(report.results.len());

    for (index, result) in report.results.iter().enumerate() {
        let path = FileReader::resolve(base, &result.transcript_path);
        match FileReader::read_text(&path) {
            Ok(text) => {
                indices.push(index);
                ground_truths.push(text);
            }
            Err(e) => log::warn!("Keeping stored metrics for {}: {e:#}", result.identifier),
        }
    }

    let pairs: Vec<(&str, &str)> = indices
        .iter()
        .zip(&ground_truths)
        .map(|(&index, gt)| {
            (
                gt.as_str(),
                report.results[index].provider_response.as_str(),
            )
        })
        .collect();
    let metrics = evaluator.evaluate_batch(&pairs, Some(threads), parallel_threshold)?;

    for (index, metrics) in indices.iter().zip(metrics) {
        report.results[*index].metrics = metrics;
    }
    Ok(indices.len())
}

fn report_label(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
