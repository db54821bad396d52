//! CLI command implementations

use crate::config::CliConfig;
use anyhow::Result;
use clap::{Args, Subcommand};
use htr_eval_core::EvaluationConfig;
use std::path::PathBuf;

pub mod backfill;
pub mod compare;
pub mod eval_external;
pub mod summary;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Evaluate transcription files produced by an external model
    EvalExternal(eval_external::EvalExternalArgs),

    /// Recompute the metrics of a stored report
    Backfill(backfill::BackfillArgs),

    /// Print aggregate statistics for stored reports
    Summary(summary::SummaryArgs),

    /// Evaluate a single ground-truth/transcription pair
    Compare(compare::CompareArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self, quiet: bool) -> Result<()> {
        match self {
            Commands::EvalExternal(args) => args.execute(quiet),
            Commands::Backfill(args) => args.execute(),
            Commands::Summary(args) => args.execute(),
            Commands::Compare(args) => args.execute(),
        }
    }
}

/// Evaluation settings shared by the commands that score text
#[derive(Debug, Default, Args)]
pub struct EvaluationArgs {
    /// Ground-truth pattern marking unreadable text (repeatable)
    #[arg(short, long = "ignore", value_name = "PATTERN")]
    pub ignore: Vec<String>,

    /// Clear ignore patterns inherited from the config file or report
    #[arg(long, conflicts_with = "ignore")]
    pub no_ignore: bool,

    /// Flatten both texts to a single line before comparing
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub single_line: Option<bool>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl EvaluationArgs {
    /// Load the configuration file, or defaults when none was given
    pub fn cli_config(&self) -> Result<CliConfig> {
        match &self.config {
            Some(path) => {
                log::debug!("Loading configuration from {}", path.display());
                CliConfig::from_file(path)
            }
            None => Ok(CliConfig::default()),
        }
    }

    /// Layer the config file section and then the flags over `base`
    pub fn resolve(&self, base: EvaluationConfig, config: &CliConfig) -> Result<EvaluationConfig> {
        let mut resolved = config.evaluation.apply(base);

        if self.no_ignore {
            resolved.ignore_patterns.clear();
        } else if !self.ignore.is_empty() {
            resolved.ignore_patterns = self.ignore.clone();
        }
        if let Some(single_line) = self.single_line {
            resolved.single_line = single_line;
        }

        resolved.validate()?;
        log::debug!("Evaluation settings: {resolved:?}");
        Ok(resolved)
    }
}

/// Initialize logging based on verbosity level
pub fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match (quiet, verbose) {
        (true, _) => "error",
        (_, 0) => "warn",
        (_, 1) => "info",
        (_, 2) => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}
