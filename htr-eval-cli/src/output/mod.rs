//! Output formatting module

use crate::error::CliError;
use anyhow::Result;
use clap::ValueEnum;
use htr_eval_core::{BatchSummary, EvalResult};
use std::io::Write;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format a single evaluated row
    fn format_result(&mut self, result: &EvalResult) -> Result<()>;

    /// Format aggregate statistics for a labelled batch
    fn format_summary(&mut self, label: &str, summary: &BatchSummary) -> Result<()>;

    /// Finalize output (e.g., write the collected JSON document)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable blocks, one per row
    Text,
    /// A single JSON document with results and summaries
    Json,
    /// Markdown tables
    Markdown,
}

impl OutputFormat {
    /// Pick the explicit format, falling back to the configured default
    pub fn resolve(explicit: Option<Self>, configured: &str) -> Result<Self> {
        if let Some(format) = explicit {
            return Ok(format);
        }
        Self::from_str(configured, true).map_err(|_| {
            CliError::ConfigError(format!("unknown output format '{configured}'")).into()
        })
    }

    /// Create a formatter writing to `writer`
    pub fn formatter<'a, W: Write + 'a>(self, writer: W) -> Box<dyn OutputFormatter + 'a> {
        match self {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        }
    }
}
