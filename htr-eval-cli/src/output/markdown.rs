//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use htr_eval_core::{BatchSummary, EvalResult};
use std::io::Write;

/// Markdown formatter - rows and summaries as tables
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    result_count: usize,
    summary_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            result_count: 0,
            summary_count: 0,
        }
    }
}

impl<W: Write> OutputFormatter for MarkdownFormatter<W> {
    fn format_result(&mut self, result: &EvalResult) -> Result<()> {
        if self.result_count == 0 {
            writeln!(
                self.writer,
                "| Identifier | Char Sim | Char Acc | Word Sim | Word Acc | WER | Correct | Sub | Del | Ins |"
            )?;
            writeln!(
                self.writer,
                "|---|---:|---:|---:|---:|---:|---:|---:|---:|---:|"
            )?;
        }
        self.result_count += 1;

        let m = &result.metrics;
        writeln!(
            self.writer,
            "| {} | {:.3} | {:.3} | {:.3} | {:.3} | {:.3} | {} | {} | {} | {} |",
            result.identifier,
            m.character_similarity,
            m.character_accuracy,
            m.word_similarity,
            m.word_accuracy,
            m.word_error_rate,
            m.correct_words,
            m.substitutions,
            m.deletions,
            m.insertions,
        )?;
        Ok(())
    }

    fn format_summary(&mut self, label: &str, summary: &BatchSummary) -> Result<()> {
        if self.summary_count == 0 {
            if self.result_count > 0 {
                writeln!(self.writer)?;
            }
            writeln!(
                self.writer,
                "| Batch | Rows | Avg Char Sim | Avg Char Acc | Avg Word Sim | Avg Word Acc | Avg WER |"
            )?;
            writeln!(self.writer, "|---|---:|---:|---:|---:|---:|---:|")?;
        }
        self.summary_count += 1;

        writeln!(
            self.writer,
            "| {} | {} | {:.3} | {:.3} | {:.3} | {:.3} | {:.3} |",
            label,
            summary.count,
            summary.average_character_similarity,
            summary.average_character_accuracy,
            summary.average_word_similarity,
            summary.average_word_accuracy,
            summary.average_word_error_rate,
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(
            self.writer,
            "*Rows: {}, batches: {}*",
            self.result_count, self.summary_count
        )?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use htr_eval_core::evaluate_text;

    #[test]
    fn test_tables() {
        let result = EvalResult {
            identifier: "page1.txt".to_string(),
            metrics: evaluate_text("a b c", "a b d", &[], false),
            ..Default::default()
        };
        let summary = BatchSummary::from_metrics([&result.metrics]);

        let mut buffer = Vec::new();
        let mut formatter = MarkdownFormatter::new(&mut buffer);
        formatter.format_result(&result).unwrap();
        formatter.format_result(&result).unwrap();
        formatter.format_summary("loghi", &summary).unwrap();
        formatter.finish().unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output.matches("| Identifier |").count(), 1);
        assert!(output.contains("| page1.txt | 0.800 | 0.800 | 0.667 | 0.667 | 0.333 | 2 | 1 | 0 | 0 |"));
        assert!(output.contains("| loghi | 1 |"));
        assert!(output.contains("*Rows: 2, batches: 1*"));
    }
}
