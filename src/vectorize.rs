//! Vocabulary fitting and bag-of-words count vectors.
//!
//! A [`Vectorizer`] only exists in its fitted state: [`Vectorizer::fit`] is
//! the sole constructor, so transforming text against an unfitted vocabulary
//! cannot be expressed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::normalize::tokenize;

// ── Vocabulary ─────────────────────────────────────────────────────────────

/// Ordered, deduplicated token set with a stable token <-> index bijection.
///
/// Indices follow first-seen order over the fitted corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    tokens: Vec<String>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl Vocabulary {
    fn insert(&mut self, token: String) {
        if !self.index.contains_key(&token) {
            self.index.insert(token.clone(), self.tokens.len());
            self.tokens.push(token);
        }
    }

    /// Rebuild the lookup table after deserialization.
    fn reindex(&mut self) {
        self.index = self
            .tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i))
            .collect();
    }

    /// Index of a token, if it was seen during fitting.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }

    /// Token stored at an index.
    pub fn token(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Tokens in index order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

// ── FeatureVector ──────────────────────────────────────────────────────────

/// Token occurrence counts, one slot per vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureVector(Vec<u32>);

impl FeatureVector {
    /// All-zero vector of the given length.
    pub fn zeros(len: usize) -> Self {
        Self(vec![0; len])
    }

    pub fn from_counts(counts: Vec<u32>) -> Self {
        Self(counts)
    }

    pub fn counts(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&c| u64::from(c)).sum()
    }

    /// Whether every slot is zero (no in-vocabulary token was present).
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    /// `(index, count)` pairs for every non-zero slot.
    pub fn nonzero(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(i, &c)| (i, c))
    }
}

// ── Vectorizer ─────────────────────────────────────────────────────────────

/// A count vectorizer over a vocabulary fitted once from a training corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vectorizer {
    vocabulary: Vocabulary,
}

impl Vectorizer {
    /// Fit a vocabulary from every token of every normalized corpus text.
    pub fn fit<I, S>(corpus: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocabulary = Vocabulary::default();
        for text in corpus {
            for token in tokenize(text.as_ref()) {
                vocabulary.insert(token);
            }
        }
        Self { vocabulary }
    }

    /// Count in-vocabulary tokens of `text`. Unknown tokens are dropped.
    ///
    /// The result always has length `self.len()`.
    pub fn transform(&self, text: &str) -> FeatureVector {
        let mut counts = vec![0u32; self.vocabulary.len()];
        for token in tokenize(text) {
            if let Some(idx) = self.vocabulary.index_of(&token) {
                counts[idx] = counts[idx].saturating_add(1);
            }
        }
        FeatureVector(counts)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Vocabulary size, which is also the length of every produced vector.
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty()
    }

    /// Restore the token lookup table; called after deserializing.
    pub(crate) fn reindex(&mut self) {
        self.vocabulary.reindex();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS: [&str; 4] = ["Hello", "Hi there", "Goodbye", "See you later"];

    #[test]
    fn fit_assigns_first_seen_indices() {
        let v = Vectorizer::fit(CORPUS);
        assert_eq!(
            v.vocabulary().tokens(),
            &["hello", "hi", "there", "goodbye", "see", "you", "later"]
        );
        assert_eq!(v.vocabulary().index_of("goodbye"), Some(3));
        assert_eq!(v.vocabulary().token(6), Some("later"));
        assert_eq!(v.vocabulary().index_of("nope"), None);
    }

    #[test]
    fn fit_deduplicates_after_normalization() {
        let v = Vectorizer::fit(["Hello!", "hello", "HELLO there"]);
        assert_eq!(v.vocabulary().tokens(), &["hello", "there"]);
    }

    #[test]
    fn fit_is_deterministic() {
        let a = Vectorizer::fit(CORPUS);
        let b = Vectorizer::fit(CORPUS);
        assert_eq!(a.vocabulary(), b.vocabulary());
    }

    #[test]
    fn transform_counts_tokens() {
        let v = Vectorizer::fit(CORPUS);
        let fv = v.transform("hello hello, see you");
        assert_eq!(fv.counts(), &[2, 0, 0, 0, 1, 1, 0]);
        assert_eq!(fv.total(), 4);
        assert_eq!(fv.nonzero().collect::<Vec<_>>(), vec![(0, 2), (4, 1), (5, 1)]);
    }

    #[test]
    fn transform_length_invariant() {
        let v = Vectorizer::fit(CORPUS);
        for text in ["", "   ", "zebra quantum", "hello!!", "see you later later later"] {
            assert_eq!(v.transform(text).len(), v.len(), "length mismatch for {text:?}");
        }
    }

    #[test]
    fn unknown_tokens_yield_zero_vector() {
        let v = Vectorizer::fit(CORPUS);
        let fv = v.transform("zebra quantum flux");
        assert!(fv.is_zero());
        assert_eq!(v.len(), 7, "vocabulary must not grow after fit");
    }

    #[test]
    fn empty_corpus_fits_empty_vocabulary() {
        let v = Vectorizer::fit(Vec::<String>::new());
        assert!(v.is_empty());
        assert!(v.transform("hello").is_empty());
    }

    #[test]
    fn reindex_restores_lookup() {
        let v = Vectorizer::fit(CORPUS);
        let json = serde_json::to_string(&v).unwrap();
        let mut restored: Vectorizer = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.vocabulary().index_of("hello"), None);
        restored.reindex();
        assert_eq!(restored.vocabulary(), v.vocabulary());
        assert_eq!(restored.transform("hello"), v.transform("hello"));
    }
}
