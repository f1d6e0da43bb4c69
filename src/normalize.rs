//! Text canonicalization ahead of feature extraction.
//!
//! Normalized text is NFKC-folded, lowercased, and stripped of every
//! character that is neither alphanumeric nor whitespace, then NFKC-folded
//! again: stripping can leave composable characters adjacent (`ᄀ!ᅡ`), and
//! the result must already be in its composed form. Whitespace is left
//! exactly as it was; tokenization handles runs of it downstream.

use unicode_normalization::UnicodeNormalization;

/// Canonicalize raw text for vectorization.
///
/// Total over any input: the empty string normalizes to the empty string.
/// Applying it twice yields the same result as applying it once.
pub fn normalize(text: &str) -> String {
    let folded: String = text.nfkc().collect();
    let stripped: String = folded
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect();
    stripped.nfkc().collect()
}

/// Split text into tokens: maximal runs of non-whitespace after normalization.
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(normalize("Hello!!"), "hello");
        assert_eq!(normalize("What's up?"), "whats up");
        assert_eq!(normalize("Make me laugh, with a funny joke."), "make me laugh with a funny joke");
    }

    #[test]
    fn keeps_internal_whitespace() {
        assert_eq!(normalize("  see   you\tlater "), "  see   you\tlater ");
    }

    #[test]
    fn empty_and_punctuation_only() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("?!...,;"), "");
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn strips_typographic_punctuation() {
        assert_eq!(normalize("I’d like to give some feedback."), "id like to give some feedback");
        assert_eq!(normalize("What’s the best way?"), "whats the best way");
    }

    #[test]
    fn folds_compatibility_forms() {
        assert_eq!(normalize("ＨＥＬＬＯ"), "hello");
        assert_eq!(normalize("ﬁne"), "fine");
    }

    #[test]
    fn keeps_digits_and_non_latin_letters() {
        assert_eq!(normalize("Run 5 cycles"), "run 5 cycles");
        assert_eq!(normalize("Привет, мир!"), "привет мир");
    }

    #[test]
    fn idempotent() {
        let samples = [
            "",
            "Hello!!",
            "Hi there",
            "I’d like to give some feedback on your service.",
            "ＨＥＬＬＯ ﬁne",
            "  Tabs\tand\nnewlines  ",
            "Ünïcödé: ÀÉÎÕÜ",
            "emoji 🙂 and symbols #$%&",
            "\u{1100}!\u{1161}",
            "\u{1100}\u{1161}.\u{11a8}",
            "e\u{301}!\u{301}",
            "ＡＢ！Ｃ",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn recomposes_after_stripping() {
        // Conjoining jamo separated by punctuation compose once it is gone.
        assert_eq!(normalize("\u{1100}!\u{1161}"), "\u{ac00}");
        assert_eq!(normalize("\u{1100}\u{1161}.\u{11a8}"), "\u{ac01}");
    }

    #[test]
    fn tokenize_splits_on_whitespace_runs() {
        assert_eq!(tokenize("See you   later!"), vec!["see", "you", "later"]);
        assert_eq!(tokenize("can't-stop"), vec!["cantstop"]);
    }
}
