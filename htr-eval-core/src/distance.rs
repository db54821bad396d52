//! Character-level edit distance and the ratios derived from it

/// Levenshtein distance between `a` and `b`, counted in `char`s.
///
/// Unit cost for insertion, deletion and substitution. Only two rows of the
/// dynamic-programming table are kept, so memory stays linear in `b`.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    edit_distance(&a, &b)
}

/// Generic unit-cost edit distance over any comparable sequence.
pub(crate) fn edit_distance<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, x) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, y) in b.iter().enumerate() {
            let cost = usize::from(x != y);
            curr[j + 1] = (prev[j] + cost)
                .min(prev[j + 1] + 1)
                .min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// `1 - distance / max(|a|, |b|)`, or `1.0` when both are empty.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

/// Complement of the character error rate, `1 - distance / |original|`.
///
/// Defined as `1.0` for an empty original. The result is clamped at zero so a
/// transcription much longer than the original cannot go negative.
pub fn character_accuracy(original: &str, transcribed: &str) -> f64 {
    let len = original.chars().count();
    if len == 0 {
        return 1.0;
    }
    (1.0 - levenshtein(original, transcribed) as f64 / len as f64).max(0.0)
}
