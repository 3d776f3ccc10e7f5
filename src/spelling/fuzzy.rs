//! Edit-distance matching against a vocabulary snapshot.
//!
//! A [`FuzzyMatcher`] is built from the vocabulary of an index at a point in
//! time. Terms indexed after the snapshot was taken are invisible to it; the
//! engine rebuilds the matcher in `build()`.
//!
//! # Examples
//!
//! ```
//! use sift::lexical::index::InvertedIndex;
//! use sift::spelling::fuzzy::FuzzyMatcher;
//!
//! let mut index = InvertedIndex::new();
//! index.add_document(1, "Python is a programming language").unwrap();
//! index.add_document(3, "Python is easy to learn").unwrap();
//!
//! let matcher = FuzzyMatcher::from_index(&index, 2);
//! let ids: Vec<u64> = matcher.fuzzy_search("pythn", &index).into_iter().collect();
//! assert_eq!(ids, vec![1, 3]);
//! ```

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::lexical::index::{InvertedIndex, PostingSet};
use crate::spelling::levenshtein::LevenshteinMatcher;

/// Edit distance used when none is configured.
pub const DEFAULT_MAX_DISTANCE: usize = 2;

/// A vocabulary term close to the input term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuzzyMatch {
    /// The vocabulary term.
    pub term: String,
    /// Edit distance from the input term.
    pub distance: usize,
}

/// Finds vocabulary terms within a bounded edit distance of an input term.
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    /// Sorted, de-duplicated terms.
    vocabulary: Vec<String>,
    max_distance: usize,
}

impl FuzzyMatcher {
    /// Create a matcher over `vocabulary` with [`DEFAULT_MAX_DISTANCE`].
    pub fn new<I, S>(vocabulary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_max_distance(vocabulary, DEFAULT_MAX_DISTANCE)
    }

    /// Create a matcher over `vocabulary` accepting up to `max_distance` edits.
    pub fn with_max_distance<I, S>(vocabulary: I, max_distance: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocabulary: Vec<String> = vocabulary.into_iter().map(Into::into).collect();
        vocabulary.sort_unstable();
        vocabulary.dedup();

        FuzzyMatcher {
            vocabulary,
            max_distance,
        }
    }

    /// Snapshot the current vocabulary of `index`.
    pub fn from_index(index: &InvertedIndex, max_distance: usize) -> Self {
        Self::with_max_distance(index.vocabulary(), max_distance)
    }

    /// Largest accepted edit distance.
    pub fn max_distance(&self) -> usize {
        self.max_distance
    }

    /// Number of terms in the snapshot.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Vocabulary terms within the edit bound of `term`.
    ///
    /// Sorted by ascending distance, then lexically.
    pub fn find_similar(&self, term: &str) -> Vec<FuzzyMatch> {
        let matcher = LevenshteinMatcher::new(term);
        let query_len = matcher.query_len();
        let max_distance = self.max_distance;

        let mut matches: Vec<FuzzyMatch> = self
            .vocabulary
            .par_iter()
            .filter(|candidate| {
                // Byte length is an upper bound on the char count.
                query_len.saturating_sub(candidate.len()) <= max_distance
            })
            .filter_map(|candidate| {
                matcher
                    .distance_within(candidate, max_distance)
                    .map(|distance| FuzzyMatch {
                        term: candidate.clone(),
                        distance,
                    })
            })
            .collect();

        matches.sort_by(|a, b| a.distance.cmp(&b.distance).then_with(|| a.term.cmp(&b.term)));
        matches
    }

    /// Vocabulary terms similar to any term of `query`, each listed once.
    ///
    /// `query` is tokenized with the tokenizer of `index`. Terms keep the order
    /// in which they were first matched.
    pub fn expand(&self, query: &str, index: &InvertedIndex) -> Vec<String> {
        let mut expanded: Vec<String> = Vec::new();
        for token in index.tokenizer().terms(query) {
            for found in self.find_similar(&token) {
                if !expanded.contains(&found.term) {
                    expanded.push(found.term);
                }
            }
        }
        expanded
    }

    /// Union of the posting sets of every term similar to a query term.
    pub fn fuzzy_search(&self, query: &str, index: &InvertedIndex) -> PostingSet {
        let expanded = self.expand(query, index);
        index.postings_union(expanded.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_index() -> InvertedIndex {
        let mut index = InvertedIndex::new();
        index
            .add_document(1, "Python is a programming language")
            .unwrap();
        index
            .add_document(2, "Java is also a programming language")
            .unwrap();
        index.add_document(3, "Python is easy to learn").unwrap();
        index
    }

    #[test]
    fn test_find_similar_sorted_by_distance() {
        let matcher = FuzzyMatcher::new(["cat", "cart", "bat", "cast", "dog"]);
        let found = matcher.find_similar("cat");
        let pairs: Vec<(&str, usize)> = found
            .iter()
            .map(|m| (m.term.as_str(), m.distance))
            .collect();
        assert_eq!(pairs, vec![("cat", 0), ("bat", 1), ("cart", 1), ("cast", 1)]);
    }

    #[test]
    fn test_find_similar_respects_threshold() {
        let matcher = FuzzyMatcher::with_max_distance(["kitten", "sitting", "mitten"], 1);
        let found: Vec<String> = matcher
            .find_similar("kitten")
            .into_iter()
            .map(|m| m.term)
            .collect();
        assert_eq!(found, vec!["kitten", "mitten"]);
    }

    #[test]
    fn test_zero_distance_is_exact_match() {
        let matcher = FuzzyMatcher::with_max_distance(["python", "pythons"], 0);
        let found = matcher.find_similar("python");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].term, "python");
        assert!(matcher.find_similar("pythn").is_empty());
    }

    #[test]
    fn test_fuzzy_search_corrects_typo() {
        let index = sample_index();
        let matcher = FuzzyMatcher::from_index(&index, 2);
        let ids: Vec<u64> = matcher.fuzzy_search("pythn", &index).into_iter().collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_fuzzy_search_includes_exact_postings() {
        let index = sample_index();
        let matcher = FuzzyMatcher::from_index(&index, 0);
        for term in index.vocabulary() {
            let found = matcher.fuzzy_search(term, &index);
            assert!(index.postings(term).unwrap().is_subset(&found));
        }
    }

    #[test]
    fn test_fuzzy_search_no_match() {
        let index = sample_index();
        let matcher = FuzzyMatcher::from_index(&index, 1);
        assert!(matcher.fuzzy_search("haskell", &index).is_empty());
        assert!(matcher.fuzzy_search("", &index).is_empty());
    }

    #[test]
    fn test_expand_deduplicates() {
        let index = sample_index();
        let matcher = FuzzyMatcher::from_index(&index, 1);
        let expanded = matcher.expand("pythn python", &index);
        assert_eq!(expanded, vec!["python"]);
    }

    #[test]
    fn test_snapshot_is_frozen() {
        let mut index = sample_index();
        let matcher = FuzzyMatcher::from_index(&index, 2);
        let size = matcher.vocabulary_size();

        index.add_document(4, "Rust is fast").unwrap();
        assert_eq!(matcher.vocabulary_size(), size);
        assert!(!matcher.find_similar("rust").iter().any(|m| m.term == "rust"));
    }
}
