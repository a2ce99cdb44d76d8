use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

/// Words of two or more word characters.
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?u)\b\w\w+\b").expect("token pattern compiles"));

/// Sparse document vector: `(feature index, count)` sorted by index.
pub type SparseVec = Vec<(usize, f64)>;

pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Bag-of-words vectorizer with a vocabulary fixed at fit time.
#[derive(Debug, Clone, Default)]
pub struct CountVectorizer {
    vocabulary: BTreeMap<String, usize>,
}

impl CountVectorizer {
    pub fn fit<'a>(texts: impl IntoIterator<Item = &'a str>) -> Self {
        let terms: BTreeSet<String> = texts.into_iter().flat_map(tokenize).collect();
        let vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx))
            .collect();
        Self { vocabulary }
    }

    pub fn n_features(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn vocabulary(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.keys().map(String::as_str)
    }

    /// Counts known terms in `text`; terms outside the vocabulary are dropped.
    pub fn transform(&self, text: &str) -> SparseVec {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokenize(text) {
            if let Some(&idx) = self.vocabulary.get(&token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }
        counts.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizer_lowercases_and_drops_single_chars() {
        let tokens = tokenize("Fix a BUG in v2 of the_parser!");
        assert_eq!(tokens, vec!["fix", "bug", "in", "v2", "of", "the_parser"]);
    }

    #[test]
    fn vocabulary_is_sorted_and_deduplicated() {
        let v = CountVectorizer::fit(["write docs", "Fix bug", "fix docs"]);
        let vocab: Vec<&str> = v.vocabulary().collect();
        assert_eq!(vocab, vec!["bug", "docs", "fix", "write"]);
        assert_eq!(v.n_features(), 4);
    }

    #[test]
    fn transform_counts_known_terms_only() {
        let v = CountVectorizer::fit(["fix bug", "write docs"]);
        assert_eq!(v.transform("fix the bug, fix it"), vec![(0, 1.0), (2, 2.0)]);
        assert!(v.transform("nothing familiar").is_empty());
    }

    #[test]
    fn single_letter_corpus_has_empty_vocabulary() {
        let v = CountVectorizer::fit(["a b", "c"]);
        assert_eq!(v.n_features(), 0);
        assert!(v.transform("a b c").is_empty());
    }
}
