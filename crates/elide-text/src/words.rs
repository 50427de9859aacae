#![forbid(unsafe_code)]

//! Whitespace-delimited words.
//!
//! A *word* is a maximal run of non-whitespace characters. No linguistic
//! segmentation happens here: `"l'été"` is one word, `"foo-bar"` is one word,
//! and CJK text without spaces is one word.

/// Remove the last word from `text` and return the trimmed remainder.
///
/// The input is trimmed first. When the input ends in whitespace, that
/// trailing run is what gets consumed, so the result is simply the trimmed
/// input; otherwise the final word and the whitespace before it are dropped.
/// Either way the result is strictly shorter than any non-empty input, which
/// is what lets the fitter make progress one call at a time.
///
/// Total: every string, including the empty one, has a defined result.
///
/// ```
/// use elide_text::remove_last_word;
///
/// assert_eq!(remove_last_word("a b c"), "a b");
/// assert_eq!(remove_last_word("solo"), "");
/// assert_eq!(remove_last_word("  padded  text  "), "padded  text");
/// assert_eq!(remove_last_word("padded  text"), "padded");
/// assert_eq!(remove_last_word(""), "");
/// ```
#[must_use]
pub fn remove_last_word(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.len() < text.trim_start().len() {
        return trimmed;
    }

    match trimmed.rfind(char::is_whitespace) {
        Some(idx) => trimmed[..idx].trim_end(),
        None => "",
    }
}

/// A run of either whitespace or non-whitespace characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The run's text.
    pub text: &'a str,
    /// Whether the run is whitespace.
    pub is_space: bool,
}

/// Split `text` into alternating word and whitespace runs.
///
/// Concatenating the segments reproduces `text` exactly.
///
/// ```
/// use elide_text::segments;
///
/// let runs: Vec<_> = segments("hi  there").map(|s| (s.text, s.is_space)).collect();
/// assert_eq!(runs, vec![("hi", false), ("  ", true), ("there", false)]);
/// ```
pub fn segments(text: &str) -> impl Iterator<Item = Segment<'_>> {
    let mut rest = text;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let is_space = first.is_whitespace();
        let end = rest
            .char_indices()
            .find(|&(_, c)| c.is_whitespace() != is_space)
            .map_or(rest.len(), |(idx, _)| idx);
        let (run, tail) = rest.split_at(end);
        rest = tail;
        Some(Segment {
            text: run,
            is_space,
        })
    })
}
