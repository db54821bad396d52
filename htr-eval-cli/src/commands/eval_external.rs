//! Evaluate transcriptions produced outside this tool

use super::EvaluationArgs;
use crate::error::CliError;
use crate::input::{FileReader, RowManifest};
use crate::output::OutputFormat;
use crate::progress::ProgressReporter;
use anyhow::Result;
use clap::Args;
use htr_eval_core::report::{report_path, EXTERNAL_PROVIDER, TIMESTAMP_FORMAT};
use htr_eval_core::{EvalReport, EvalResult, EvaluationConfig, Evaluator, RunConfig};
use std::io;
use std::path::{Path, PathBuf};

const EXTERNAL_PROMPT: &str = "Evaluated from external source";

/// Arguments for the eval-external command
#[derive(Debug, Args)]
pub struct EvalExternalArgs {
    /// Name of the model that produced the transcriptions
    #[arg(short, long)]
    pub name: String,

    /// TOML manifest listing transcript/transcription pairs
    #[arg(
        short,
        long,
        value_name = "FILE",
        conflicts_with = "ground_truth",
        required_unless_present_any = ["ground_truth", "csv"]
    )]
    pub manifest: Option<PathBuf>,

    /// Two-column CSV (transcript, transcription) with an optional header row
    #[arg(long, value_name = "FILE", conflicts_with_all = ["manifest", "ground_truth"])]
    pub csv: Option<PathBuf>,

    /// Ground-truth files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", requires = "transcriptions")]
    pub ground_truth: Vec<String>,

    /// Directory holding one transcription per ground-truth file name
    #[arg(short, long, value_name = "DIR")]
    pub transcriptions: Option<PathBuf>,

    /// Base directory for manifest and CSV paths
    #[arg(short, long, value_name = "DIR", default_value = "./")]
    pub dir: PathBuf,

    /// Zero-based rows to evaluate (default: all)
    #[arg(short, long, value_delimiter = ',', value_name = "N,...")]
    pub rows: Vec<usize>,

    #[command(flatten)]
    pub evaluation: EvaluationArgs,

    /// Report file, JSON or YAML by extension (default: <output_dir>/<name>.<report_format>)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format for printed results
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Number of worker threads (default: from config)
    #[arg(long)]
    pub threads: Option<usize>,
}

/// A row whose files were read successfully
#[derive(Debug)]
struct LoadedRow {
    identifier: String,
    transcript_path: PathBuf,
    ground_truth: String,
    transcription: String,
}

impl EvalExternalArgs {
    /// Execute the eval-external command
    pub fn execute(&self, quiet: bool) -> Result<()> {
        log::info!("Evaluating external transcriptions for {}", self.name);
        log::debug!("Arguments: {:?}", self);

        let cli_config = self.evaluation.cli_config()?;
        let evaluation = self
            .evaluation
            .resolve(EvaluationConfig::default(), &cli_config)?;
        let evaluator = Evaluator::with_config(evaluation)?;
        let format = OutputFormat::resolve(self.format, &cli_config.output.default_format)?;

        let manifest = self.load_manifest()?;
        let base = match self.manifest_file() {
            Some(_) => self.dir.as_path(),
            None => Path::new(""),
        };
        let selected = manifest.select(&self.rows);
        log::info!("{} rows selected", selected.len());

        let mut progress = ProgressReporter::new(quiet);
        progress.init_loading(selected.len() as u64);

        let mut rows = Vec::with_capacity(selected.len());
        for (index, row) in selected {
            if !row.is_complete() {
                log::warn!(
                    "Skipping row {}: expected two columns (transcript, transcription)",
                    index + 1
                );
                progress.row_loaded(&row.transcript);
                continue;
            }

            let (transcript_path, transcription_path) = RowManifest::resolve(row, base);
            match load_row(transcript_path, &transcription_path) {
                Ok(loaded) => {
                    progress.row_loaded(&loaded.identifier);
                    rows.push(loaded);
                }
                Err(e) => {
                    log::warn!("Skipping row {}: {e:#}", index + 1);
                    progress.row_loaded(&row.transcript);
                }
            }
        }
        progress.finish();

        if rows.is_empty() {
            return Err(CliError::NoRowsEvaluated.into());
        }

        let pairs: Vec<(&str, &str)> = rows
            .iter()
            .map(|row| (row.ground_truth.as_str(), row.transcription.as_str()))
            .collect();
        let threads = self.threads.unwrap_or_else(|| cli_config.worker_threads());
        let metrics = evaluator.evaluate_batch(
            &pairs,
            Some(threads),
            cli_config.performance.parallel_threshold_rows,
        )?;

        let results: Vec<EvalResult> = rows
            .into_iter()
            .zip(metrics)
            .map(|(row, metrics)| EvalResult {
                identifier: row.identifier,
                transcript_path: row.transcript_path.display().to_string(),
                provider_response: row.transcription,
                metrics,
                ..Default::default()
            })
            .collect();

        let mut config = RunConfig {
            provider: EXTERNAL_PROVIDER.to_string(),
            model: self.name.clone(),
            prompt: EXTERNAL_PROMPT.to_string(),
            csv_path: self
                .manifest_file()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            rows: self.rows.clone(),
            timestamp: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
            ..Default::default()
        };
        config.set_evaluation(evaluator.config());
        let report = EvalReport { config, results };

        let mut formatter = format.formatter(io::stdout().lock());
        for result in &report.results {
            formatter.format_result(result)?;
        }
        formatter.format_summary(&self.name, &report.summary())?;
        formatter.finish()?;

        let path = self
            .output
            .clone()
            .unwrap_or_else(|| {
                report_path(
                    &cli_config.output.output_dir,
                    &self.name,
                    cli_config.output.report_format,
                )
            });
        report.save(&path, cli_config.output.pretty_json)?;
        log::info!("Evaluated {} rows", report.results.len());
        eprintln!("Saved report to {}", path.display());

        Ok(())
    }

    /// Manifest or CSV file the rows come from, if any
    fn manifest_file(&self) -> Option<&Path> {
        self.csv.as_deref().or(self.manifest.as_deref())
    }

    fn load_manifest(&self) -> Result<RowManifest> {
        if let Some(path) = &self.csv {
            return RowManifest::from_csv(path);
        }
        match (&self.manifest, &self.transcriptions) {
            (Some(path), _) => RowManifest::from_file(path),
            (None, Some(transcriptions)) => {
                RowManifest::from_glob(&self.ground_truth, transcriptions)
            }
            (None, None) => Err(CliError::ConfigError(
                "one of --manifest, --csv or --ground-truth with --transcriptions is required"
                    .to_string(),
            )
            .into()),
        }
    }
}

fn load_row(transcript_path: PathBuf, transcription_path: &Path) -> Result<LoadedRow> {
    let ground_truth = FileReader::read_text(&transcript_path)?;
    let transcription = FileReader::read_text(transcription_path)?;
    let identifier = transcript_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| transcript_path.display().to_string());

    Ok(LoadedRow {
        identifier,
        transcript_path,
        ground_truth,
        transcription,
    })
}
