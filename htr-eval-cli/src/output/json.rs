//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use htr_eval_core::{BatchSummary, EvalResult};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - collects everything and writes one document on finish
pub struct JsonFormatter<W: Write> {
    writer: W,
    document: JsonDocument,
}

/// Data structure for JSON output
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct JsonDocument {
    /// Evaluated rows
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub results: Vec<EvalResult>,
    /// Labelled batch summaries
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub summaries: Vec<LabelledSummary>,
}

/// A batch summary with the label it was reported under
#[derive(Debug, Serialize, Deserialize)]
pub struct LabelledSummary {
    /// Report or model name
    pub label: String,
    #[serde(flatten)]
    pub summary: BatchSummary,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            document: JsonDocument::default(),
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn format_result(&mut self, result: &EvalResult) -> Result<()> {
        self.document.results.push(result.clone());
        Ok(())
    }

    fn format_summary(&mut self, label: &str, summary: &BatchSummary) -> Result<()> {
        self.document.summaries.push(LabelledSummary {
            label: label.to_string(),
            summary: summary.clone(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.document)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
