//! Compare command implementation

use super::EvaluationArgs;
use crate::input::FileReader;
use crate::output::OutputFormat;
use anyhow::Result;
use clap::Args;
use htr_eval_core::{EvalResult, EvaluationConfig, Evaluator};
use std::io;
use std::path::PathBuf;

/// Arguments for the compare command
#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Ground-truth transcript
    #[arg(short, long, value_name = "FILE")]
    pub ground_truth: PathBuf,

    /// Transcription to score
    #[arg(short, long, value_name = "FILE")]
    pub transcription: PathBuf,

    #[command(flatten)]
    pub evaluation: EvaluationArgs,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl CompareArgs {
    /// Execute the compare command
    pub fn execute(&self) -> Result<()> {
        let cli_config = self.evaluation.cli_config()?;
        let evaluation = self
            .evaluation
            .resolve(EvaluationConfig::default(), &cli_config)?;
        let evaluator = Evaluator::with_config(evaluation)?;
        let format = OutputFormat::resolve(self.format, &cli_config.output.default_format)?;

        let ground_truth = FileReader::read_text(&self.ground_truth)?;
        let transcription = FileReader::read_text(&self.transcription)?;

        let result = EvalResult {
            identifier: self.transcription.display().to_string(),
            transcript_path: self.ground_truth.display().to_string(),
            metrics: evaluator.evaluate(&ground_truth, &transcription),
            provider_response: transcription,
            ..Default::default()
        };

        let mut formatter = format.formatter(io::stdout().lock());
        formatter.format_result(&result)?;
        formatter.finish()?;

        Ok(())
    }
}
