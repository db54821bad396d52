//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use htr_eval_core::{BatchSummary, EvalResult};
use std::io::Write;

/// Plain text formatter - one block of metrics per row
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn format_result(&mut self, result: &EvalResult) -> Result<()> {
        let m = &result.metrics;
        let w = &mut self.writer;
        writeln!(w, "\n=== Results for {} ===", result.identifier)?;
        if !result.image_path.is_empty() {
            writeln!(w, "Image: {}", result.image_path)?;
        }
        writeln!(w, "Transcript: {}", result.transcript_path)?;
        writeln!(w, "Character Similarity: {:.3}", m.character_similarity)?;
        writeln!(w, "Character Accuracy: {:.3}", m.character_accuracy)?;
        writeln!(w, "Word Similarity: {:.3}", m.word_similarity)?;
        writeln!(w, "Word Accuracy: {:.3}", m.word_accuracy)?;
        writeln!(w, "Word Error Rate: {:.3}", m.word_error_rate)?;
        writeln!(w, "Total Words (Original): {}", m.total_words_original)?;
        writeln!(w, "Total Words (Transcribed): {}", m.total_words_transcribed)?;
        writeln!(w, "Correct Words: {}", m.correct_words)?;
        writeln!(w, "Substitutions: {}", m.substitutions)?;
        writeln!(w, "Deletions: {}", m.deletions)?;
        writeln!(w, "Insertions: {}", m.insertions)?;
        if m.ignored_chars_count > 0 {
            writeln!(w, "Ignored Characters: {}", m.ignored_chars_count)?;
        }
        Ok(())
    }

    fn format_summary(&mut self, label: &str, summary: &BatchSummary) -> Result<()> {
        let w = &mut self.writer;
        writeln!(w, "\n=== SUMMARY STATISTICS: {label} ===")?;
        writeln!(w, "Total Evaluations: {}", summary.count)?;
        writeln!(
            w,
            "Average Character Similarity: {:.3}",
            summary.average_character_similarity
        )?;
        writeln!(
            w,
            "Average Character Accuracy: {:.3}",
            summary.average_character_accuracy
        )?;
        writeln!(
            w,
            "Average Word Similarity: {:.3}",
            summary.average_word_similarity
        )?;
        writeln!(w, "Average Word Accuracy: {:.3}", summary.average_word_accuracy)?;
        writeln!(
            w,
            "Average Word Error Rate: {:.3}",
            summary.average_word_error_rate
        )?;
        writeln!(
            w,
            "Pooled Word Error Rate: {:.3}",
            summary.pooled_word_error_rate()
        )?;
        if summary.ignored_chars_count > 0 {
            writeln!(w, "Ignored Characters: {}", summary.ignored_chars_count)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
