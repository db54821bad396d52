//! Ignore-pattern alignment
//!
//! Ground truth may contain markers for text the labeler could not read.
//! Alignment removes each marker from the ground truth and skips the matching
//! span of the transcription, so neither side is penalised for it.
//!
//! A marker is *standalone* when it is bounded by whitespace or a string
//! edge on both sides; it then masks one whole transcribed word. Otherwise it
//! is *embedded* in a word and masks a single transcribed character.
//!
//! All scanning is done over `char`s so multi-byte text is never split.

/// Ground truth and transcription after ignore-pattern alignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedPair {
    /// Ground truth with every marker removed
    pub ground_truth: String,
    /// Transcription with the masked spans skipped
    pub transcription: String,
    /// Number of ignored ground-truth characters
    pub ignored_count: usize,
}

/// Remove ignore markers from `ground_truth` and skip the matching spans in
/// `transcription`.
///
/// Patterns are tried in the given order at every ground-truth position and
/// the first literal match wins. Empty patterns never match. With no usable
/// patterns both strings are returned unchanged.
pub fn align(ground_truth: &str, transcription: &str, patterns: &[String]) -> ProcessedPair {
    let patterns: Vec<Vec<char>> = patterns
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| p.chars().collect())
        .collect();

    if patterns.is_empty() {
        return ProcessedPair {
            ground_truth: ground_truth.to_string(),
            transcription: transcription.to_string(),
            ignored_count: 0,
        };
    }

    let gt: Vec<char> = ground_truth.chars().collect();
    let trans: Vec<char> = transcription.chars().collect();

    let mut out_gt = String::with_capacity(ground_truth.len());
    let mut out_trans = String::with_capacity(transcription.len());
    let mut i = 0;
    let mut j = 0;

    while i < gt.len() {
        let Some(pattern) = patterns
            .iter()
            .find(|p| gt[i..].starts_with(p.as_slice()))
        else {
            out_gt.push(gt[i]);
            if j < trans.len() {
                out_trans.push(trans[j]);
                j += 1;
            }
            i += 1;
            continue;
        };

        let end = i + pattern.len();
        let bounded_before = i == 0 || gt[i - 1].is_whitespace();
        let bounded_after = end == gt.len() || gt[end].is_whitespace();
        i = end;

        if bounded_before && bounded_after {
            j = skip_word(&trans, j);
        } else if j < trans.len() {
            j += 1;
        }
    }

    ProcessedPair {
        ground_truth: out_gt,
        transcription: out_trans,
        ignored_count: ignored_count(ground_truth, &patterns),
    }
}

/// Skip leading whitespace, then one run of non-whitespace.
fn skip_word(text: &[char], mut pos: usize) -> usize {
    while pos < text.len() && text[pos].is_whitespace() {
        pos += 1;
    }
    while pos < text.len() && !text[pos].is_whitespace() {
        pos += 1;
    }
    pos
}

/// Characters covered by non-overlapping occurrences of each pattern.
///
/// Counted per pattern over the original ground truth, independent of how
/// the scan classified each occurrence.
fn ignored_count(ground_truth: &str, patterns: &[Vec<char>]) -> usize {
    patterns
        .iter()
        .map(|p| {
            let needle: String = p.iter().collect();
            ground_truth.matches(needle.as_str()).count() * p.len()
        })
        .sum()
}
