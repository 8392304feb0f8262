//! Keyword fragments floated around the kernel.

use crate::lexicon::{is_stop_word, FALLBACK_FRAGMENTS};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Most fragments kept per schema.
pub const MAX_FRAGMENTS: usize = 10;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]{3,}").expect("static regex"));

/// Extract up to [`MAX_FRAGMENTS`] words from `text`.
///
/// Words are ASCII alphabetic runs of three or more letters. Stop words are
/// dropped, duplicates are removed ignoring case (the first spelling seen
/// is kept) and source order is preserved. If nothing survives, the fixed
/// fallback list is returned.
pub fn extract(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let fragments: Vec<String> = WORD
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|word| !is_stop_word(word))
        .filter(|word| seen.insert(word.to_lowercase()))
        .take(MAX_FRAGMENTS)
        .map(str::to_string)
        .collect();

    if fragments.is_empty() {
        fallback()
    } else {
        fragments
    }
}

/// The fixed fallback fragment list.
pub fn fallback() -> Vec<String> {
    FALLBACK_FRAGMENTS.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn birthday_story_fragments() {
        let text = "Yesterday was my birthday. I met childhood friends after years; \
                    we laughed, took photos, and shared cake.";
        assert_eq!(
            extract(text),
            vec![
                "Yesterday",
                "birthday",
                "met",
                "childhood",
                "friends",
                "years",
                "laughed",
                "took",
                "photos",
                "shared"
            ]
        );
    }

    #[test]
    fn duplicates_collapse_ignoring_case() {
        assert_eq!(extract("Rain rain RAIN window"), vec!["Rain", "window"]);
    }

    #[test]
    fn short_words_and_stop_words_are_dropped() {
        assert_eq!(extract("we are in it, so be it"), fallback());
        assert_eq!(extract("ok go to the sea"), vec!["sea"]);
    }

    #[test]
    fn non_ascii_letters_split_words() {
        // "café" yields "caf", the accented letter ends the run.
        assert_eq!(extract("café naïve"), vec!["caf"]);
    }

    #[test]
    fn empty_text_uses_fallback() {
        assert_eq!(extract(""), vec!["memory", "moment", "echo", "warmth", "friends", "smile"]);
    }

    #[test]
    fn capped_at_ten() {
        let text = "alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo lima";
        let fragments = extract(text);
        assert_eq!(fragments.len(), MAX_FRAGMENTS);
        assert_eq!(fragments.last().map(String::as_str), Some("juliet"));
    }
}
