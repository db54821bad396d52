//! Aggregation of per-row metrics across a batch

use crate::metrics::AccuracyMetrics;
use serde::{Deserialize, Serialize};

/// Averages and totals over a batch of [`AccuracyMetrics`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Number of evaluations aggregated
    pub count: usize,
    pub average_character_similarity: f64,
    pub average_character_accuracy: f64,
    pub average_word_similarity: f64,
    pub average_word_accuracy: f64,
    pub average_word_error_rate: f64,
    pub total_words_original: usize,
    pub total_words_transcribed: usize,
    pub correct_words: usize,
    pub substitutions: usize,
    pub deletions: usize,
    pub insertions: usize,
    pub ignored_chars_count: usize,
}

impl BatchSummary {
    /// Summarise a batch; an empty batch gives zero means and `count == 0`
    pub fn from_metrics<'a, I>(metrics: I) -> Self
    where
        I: IntoIterator<Item = &'a AccuracyMetrics>,
    {
        let mut summary = Self::default();

        for m in metrics {
            summary.count += 1;
            summary.average_character_similarity += m.character_similarity;
            summary.average_character_accuracy += m.character_accuracy;
            summary.average_word_similarity += m.word_similarity;
            summary.average_word_accuracy += m.word_accuracy;
            summary.average_word_error_rate += m.word_error_rate;
            summary.total_words_original += m.total_words_original;
            summary.total_words_transcribed += m.total_words_transcribed;
            summary.correct_words += m.correct_words;
            summary.substitutions += m.substitutions;
            summary.deletions += m.deletions;
            summary.insertions += m.insertions;
            summary.ignored_chars_count += m.ignored_chars_count;
        }

        if summary.count > 0 {
            let n = summary.count as f64;
            summary.average_character_similarity /= n;
            summary.average_character_accuracy /= n;
            summary.average_word_similarity /= n;
            summary.average_word_accuracy /= n;
            summary.average_word_error_rate /= n;
        }

        summary
    }

    /// Word error rate pooled over every word in the batch, as opposed to
    /// the per-row mean in `average_word_error_rate`
    pub fn pooled_word_error_rate(&self) -> f64 {
        if self.total_words_original == 0 {
            return 0.0;
        }
        (self.substitutions + self.deletions + self.insertions) as f64
            / self.total_words_original as f64
    }
}
