//! Word-level alignment with edit classification
//!
//! A full `(m + 1) × (n + 1)` table is built over the two word sequences and
//! walked back from the bottom-right corner to label every step as a correct
//! word, a substitution, a deletion or an insertion.

use serde::{Deserialize, Serialize};

/// Outcome of aligning an original word sequence against a transcribed one
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordAlignment {
    /// Words matched exactly
    pub correct: usize,
    /// Original words replaced by a different word
    pub substitutions: usize,
    /// Original words missing from the transcription
    pub deletions: usize,
    /// Transcribed words with no original counterpart
    pub insertions: usize,
    /// Number of original words
    pub total_original_words: usize,
    /// Number of transcribed words
    pub total_transcribed_words: usize,
    /// Minimum word-level edit distance
    pub distance: usize,
}

impl WordAlignment {
    /// Substitutions, deletions and insertions combined
    pub fn edits(&self) -> usize {
        self.substitutions + self.deletions + self.insertions
    }

    /// `edits / total_original_words`, or `0.0` without original words
    pub fn word_error_rate(&self) -> f64 {
        if self.total_original_words == 0 {
            return 0.0;
        }
        self.edits() as f64 / self.total_original_words as f64
    }

    /// `1 - word_error_rate`; negative when insertions outnumber originals
    pub fn word_accuracy(&self) -> f64 {
        1.0 - self.word_error_rate()
    }

    /// `1 - distance / max(m, n)`, or `1.0` when both sides are empty
    pub fn word_similarity(&self) -> f64 {
        let max_len = self.total_original_words.max(self.total_transcribed_words);
        if max_len == 0 {
            return 1.0;
        }
        1.0 - self.distance as f64 / max_len as f64
    }
}

/// Split on whitespace, dropping empty tokens
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

/// Align two word sequences and classify every edit.
///
/// When several predecessors give the same cost the backtrace prefers a
/// substitution, then a deletion, then an insertion.
pub fn align_words<S: AsRef<str>>(original: &[S], transcribed: &[S]) -> WordAlignment {
    let m = original.len();
    let n = transcribed.len();
    let width = n + 1;
    let same = |i: usize, j: usize| original[i - 1].as_ref() == transcribed[j - 1].as_ref();

    let mut dp = vec![0usize; (m + 1) * width];
    for i in 0..=m {
        dp[i * width] = i;
    }
    for j in 0..=n {
        dp[j] = j;
    }
    for i in 1..=m {
        for j in 1..=n {
            dp[i * width + j] = if same(i, j) {
                dp[(i - 1) * width + j - 1]
            } else {
                1 + dp[(i - 1) * width + j]
                    .min(dp[i * width + j - 1])
                    .min(dp[(i - 1) * width + j - 1])
            };
        }
    }

    let mut alignment = WordAlignment {
        total_original_words: m,
        total_transcribed_words: n,
        distance: dp[m * width + n],
        ..Default::default()
    };

    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        let here = dp[i * width + j];
        if i > 0 && j > 0 && same(i, j) {
            alignment.correct += 1;
            i -= 1;
            j -= 1;
        } else if i > 0 && j > 0 && here == dp[(i - 1) * width + j - 1] + 1 {
            alignment.substitutions += 1;
            i -= 1;
            j -= 1;
        } else if i > 0 && here == dp[(i - 1) * width + j] + 1 {
            alignment.deletions += 1;
            i -= 1;
        } else {
            debug_assert!(j > 0 && here == dp[i * width + j - 1] + 1);
            alignment.insertions += 1;
            j -= 1;
        }
    }

    alignment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn align(original: &str, transcribed: &str) -> WordAlignment {
        align_words(&tokenize(original), &tokenize(transcribed))
    }

    #[test]
    fn test_tokenize_discards_empty_tokens() {
        assert_eq!(tokenize("  hello   world \n"), vec!["hello", "world"]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn test_exact_match() {
        let a = align("a b c", "a b c");
        assert_eq!(a.correct, 3);
        assert_eq!(a.edits(), 0);
        assert_eq!(a.word_accuracy(), 1.0);
        assert_eq!(a.word_similarity(), 1.0);
    }

    #[test]
    fn test_single_substitution() {
        let a = align("a b c", "a b d");
        assert_eq!((a.correct, a.substitutions), (2, 1));
        assert_eq!((a.deletions, a.insertions), (0, 0));
        assert!((a.word_accuracy() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_deletion() {
        let a = align("the quick fox", "the fox");
        assert_eq!((a.correct, a.deletions), (2, 1));
        assert_eq!(a.distance, 1);
    }

    #[test]
    fn test_insertion() {
        let a = align("the fox", "the quick fox");
        assert_eq!((a.correct, a.insertions), (2, 1));
        assert!((a.word_error_rate() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_and_accuracy_diverge_on_length_mismatch() {
        let a = align("a b", "a b c d");
        assert_eq!(a.insertions, 2);
        // accuracy normalises by 2 original words, similarity by 4
        assert_eq!(a.word_accuracy(), 0.0);
        assert_eq!(a.word_similarity(), 0.5);
    }

    #[test]
    fn test_accuracy_goes_negative_with_many_insertions() {
        let a = align("a", "x y z");
        assert!(a.word_accuracy() < 0.0);
    }

    #[test]
    fn test_empty_sequences() {
        let a = align("", "");
        assert_eq!(a, WordAlignment::default());
        assert_eq!(a.word_error_rate(), 0.0);
        assert_eq!(a.word_similarity(), 1.0);

        let a = align("", "extra words");
        assert_eq!(a.insertions, 2);
        assert_eq!(a.word_error_rate(), 0.0);
        assert_eq!(a.word_similarity(), 0.0);

        let a = align("lost words", "");
        assert_eq!(a.deletions, 2);
        assert_eq!(a.word_accuracy(), 0.0);
    }

    #[test]
    fn test_substitution_preferred_over_deletion_and_insertion() {
        // "b" -> "x" could be a deletion plus an insertion; a substitution wins
        let a = align("a b", "a x");
        assert_eq!((a.substitutions, a.deletions, a.insertions), (1, 0, 0));
    }

    #[test]
    fn test_deletion_preferred_over_insertion() {
        // At the corner a deletion and an insertion cost the same. Taking the
        // insertion first would yield (1, 2, 0, 1)
        let a = align("a b a", "b c a b");
        assert_eq!(a.distance, 3);
        assert_eq!(
            (a.correct, a.substitutions, a.deletions, a.insertions),
            (2, 0, 1, 2)
        );

        let a = align("a b a", "b a b");
        assert_eq!(
            (a.correct, a.substitutions, a.deletions, a.insertions),
            (2, 0, 1, 1)
        );
    }

    #[test]
    fn test_every_original_word_is_accounted_for() {
        let a = align(
            "the cat sat on the mat today",
            "a cat sat in on mat yesterday evening",
        );
        assert_eq!(
            a.correct + a.substitutions + a.deletions,
            a.total_original_words
        );
        assert_eq!(a.edits(), a.distance);
    }
}
