//! The accuracy record and the evaluation pipeline that produces it

use crate::config::EvaluationConfig;
use crate::distance::{character_accuracy, similarity};
use crate::ignore::align;
use crate::normalize::normalize;
use crate::words::{align_words, tokenize};
use serde::{Deserialize, Serialize};

/// One ground-truth/transcription pair plus the settings to compare them with
#[derive(Debug, Clone, Copy)]
pub struct EvaluationInput<'a> {
    /// Reference transcript
    pub ground_truth: &'a str,
    /// Text produced by the vision provider or external model
    pub transcription: &'a str,
    /// Markers for unreadable ground-truth text
    pub ignore_patterns: &'a [String],
    /// Flatten both texts to a single line first
    pub single_line: bool,
}

impl<'a> EvaluationInput<'a> {
    /// Pair two texts with the settings from `config`
    pub fn new(ground_truth: &'a str, transcription: &'a str, config: &'a EvaluationConfig) -> Self {
        Self {
            ground_truth,
            transcription,
            ignore_patterns: &config.ignore_patterns,
            single_line: config.single_line,
        }
    }
}

/// Character and word level accuracy of one transcription
///
/// Field names are the persisted identifiers read by report tooling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccuracyMetrics {
    /// `1 - char distance / max length`
    pub character_similarity: f64,
    /// `1 - char distance / original length`
    pub character_accuracy: f64,
    /// `1 - word distance / max word count`
    pub word_similarity: f64,
    /// `1 - word_error_rate`
    pub word_accuracy: f64,
    /// `(substitutions + deletions + insertions) / total_words_original`
    pub word_error_rate: f64,
    pub total_words_original: usize,
    pub total_words_transcribed: usize,
    pub correct_words: usize,
    pub substitutions: usize,
    pub deletions: usize,
    pub insertions: usize,
    /// Ground-truth characters masked by ignore patterns
    pub ignored_chars_count: usize,
}

/// Compute the accuracy of `input.transcription` against `input.ground_truth`.
///
/// Never fails: empty texts and empty pattern lists all yield a defined
/// record.
pub fn evaluate(input: &EvaluationInput<'_>) -> AccuracyMetrics {
    let ground_truth = normalize(input.ground_truth, input.single_line);
    let transcription = normalize(input.transcription, input.single_line);

    let pair = align(&ground_truth, &transcription, input.ignore_patterns);
    let original = fold_case(&pair.ground_truth);
    let transcribed = fold_case(&pair.transcription);
    log::trace!(
        "processed pair: ground truth {original:?}, transcription {transcribed:?}, {} ignored",
        pair.ignored_count
    );

    let words = align_words(&tokenize(&original), &tokenize(&transcribed));

    AccuracyMetrics {
        character_similarity: similarity(&original, &transcribed),
        character_accuracy: character_accuracy(&original, &transcribed),
        word_similarity: words.word_similarity(),
        word_accuracy: words.word_accuracy(),
        word_error_rate: words.word_error_rate(),
        total_words_original: words.total_original_words,
        total_words_transcribed: words.total_transcribed_words,
        correct_words: words.correct,
        substitutions: words.substitutions,
        deletions: words.deletions,
        insertions: words.insertions,
        ignored_chars_count: pair.ignored_count,
    }
}

/// Lower-case one `char` at a time, keeping only the first char of any
/// multi-char mapping so character counts never change.
fn fold_case(text: &str) -> String {
    text.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

/// Convenience wrapper around [`evaluate`] taking the fields directly
pub fn evaluate_text(
    ground_truth: &str,
    transcription: &str,
    ignore_patterns: &[String],
    single_line: bool,
) -> AccuracyMetrics {
    evaluate(&EvaluationInput {
        ground_truth,
        transcription,
        ignore_patterns,
        single_line,
    })
}
