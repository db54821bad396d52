//! Text normalization applied before alignment

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

static LINE_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\n\r\t]").expect("static regex is valid"));

static SPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("static regex is valid"));

/// Flatten `text` to a single line when `single_line` is set.
///
/// Every `\n`, `\r` and `\t` becomes a space, then runs of spaces collapse to
/// one. Leading and trailing spaces are kept. Without `single_line` the text
/// is returned untouched; case folding happens later, at comparison time.
pub fn normalize(text: &str, single_line: bool) -> Cow<'_, str> {
    if !single_line {
        return Cow::Borrowed(text);
    }

    let flattened = LINE_BREAKS.replace_all(text, " ");
    let collapsed = SPACE_RUNS.replace_all(&flattened, " ").into_owned();
    Cow::Owned(collapsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_when_not_single_line() {
        let text = "Line one\n\tLine  two";
        let result = normalize(text, false);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, text);
    }

    #[test]
    fn test_newlines_become_spaces() {
        assert_eq!(normalize("Line one\nLine two", true), "Line one Line two");
    }

    #[test]
    fn test_crlf_and_tabs_collapse_to_one_space() {
        assert_eq!(normalize("a\r\n\tb", true), "a b");
    }

    #[test]
    fn test_space_runs_collapse() {
        assert_eq!(normalize("a    b  c", true), "a b c");
    }

    #[test]
    fn test_leading_and_trailing_spaces_preserved() {
        assert_eq!(normalize("\n  hello\n", true), " hello ");
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(normalize("", true), "");
    }

    #[test]
    fn test_multibyte_text_untouched() {
        assert_eq!(normalize("Grüße\naus Köln", true), "Grüße aus Köln");
    }
}
