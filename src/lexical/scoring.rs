//! TF-IDF relevance scoring.
//!
//! For a candidate document `d` and query terms `q1..qn` the score is
//! `sum(tf(qi, d) * idf(qi))`, where `tf` is the share of the document's tokens
//! equal to the term and `idf(t) = ln(N / df(t))`. Terms that no document
//! contains get an idf of zero instead of dividing by zero.

use std::cmp::Ordering;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::lexical::index::{DocId, InvertedIndex};

/// A document id paired with its relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredDoc {
    /// The document id.
    pub doc_id: DocId,
    /// TF-IDF score (non-negative).
    pub score: f64,
}

impl ScoredDoc {
    /// Create a new scored document.
    pub fn new(doc_id: DocId, score: f64) -> Self {
        ScoredDoc { doc_id, score }
    }

    /// Ranking order: higher score first, then lower id first.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.doc_id.cmp(&other.doc_id))
    }
}

/// Scores documents of an [`InvertedIndex`] against query terms.
#[derive(Debug, Clone, Copy)]
pub struct TfIdfScorer<'a> {
    index: &'a InvertedIndex,
}

impl<'a> TfIdfScorer<'a> {
    /// Create a scorer reading statistics from `index`.
    pub fn new(index: &'a InvertedIndex) -> Self {
        TfIdfScorer { index }
    }

    /// Inverse document frequency of `term` over the current corpus.
    pub fn idf(&self, term: &str) -> f64 {
        let df = self.index.document_frequency(term);
        if df == 0 {
            return 0.0;
        }
        (self.index.doc_count() as f64 / df as f64).ln()
    }

    /// Score a single document. Repeated query terms count once per occurrence.
    pub fn score(&self, query_terms: &[String], doc_id: DocId) -> f64 {
        query_terms
            .iter()
            .map(|term| self.index.term_frequency(term, doc_id) * self.idf(term))
            .sum()
    }

    /// Score every candidate and sort by descending score, ascending id on ties.
    pub fn rank<I>(&self, query_terms: &[String], candidates: I) -> Vec<ScoredDoc>
    where
        I: IntoIterator<Item = DocId>,
    {
        let mut idf_cache: AHashMap<&str, f64> = AHashMap::with_capacity(query_terms.len());
        for term in query_terms {
            idf_cache
                .entry(term.as_str())
                .or_insert_with(|| self.idf(term));
        }

        let mut scored: Vec<ScoredDoc> = candidates
            .into_iter()
            .map(|doc_id| {
                let score = query_terms
                    .iter()
                    .map(|term| {
                        let idf = idf_cache.get(term.as_str()).copied().unwrap_or(0.0);
                        self.index.term_frequency(term, doc_id) * idf
                    })
                    .sum();
                ScoredDoc::new(doc_id, score)
            })
            .collect();

        scored.sort_by(ScoredDoc::rank_cmp);
        scored
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

    fn terms(index: &InvertedIndex, query: &str) -> Vec<String> {
        index.analyze(query)
    }

    #[test]
    fn test_idf() {
        let index = sample_index();
        let scorer = TfIdfScorer::new(&index);

        assert!((scorer.idf("python") - (3.0f64 / 2.0).ln()).abs() < 1e-12);
        assert!((scorer.idf("java") - 3.0f64.ln()).abs() < 1e-12);
        assert_eq!(scorer.idf("is"), 0.0);
        assert_eq!(scorer.idf("unknown"), 0.0);
    }

    #[test]
    fn test_rank_prefers_documents_matching_more_terms() {
        let index = sample_index();
        let scorer = TfIdfScorer::new(&index);
        let query = terms(&index, "python programming");

        let ranked = scorer.rank(&query, index.search_or("python programming"));
        let order: Vec<DocId> = ranked.iter().map(|s| s.doc_id).collect();
        assert_eq!(order, vec![1, 3, 2]);
        assert!(ranked[0].score > ranked[1].score);
    }

    #[test]
    fn test_ubiquitous_term_scores_zero() {
        let index = sample_index();
        let scorer = TfIdfScorer::new(&index);
        let query = terms(&index, "is");

        for scored in scorer.rank(&query, index.search_or("is")) {
            assert_eq!(scored.score, 0.0);
        }
    }

    #[test]
    fn test_ties_broken_by_ascending_id() {
        let mut index = InvertedIndex::new();
        index.add_document(9, "apple").unwrap();
        index.add_document(4, "apple").unwrap();
        index.add_document(7, "banana").unwrap();
        let scorer = TfIdfScorer::new(&index);
        let query = terms(&index, "apple");

        let ranked = scorer.rank(&query, [9, 4]);
        assert_eq!(ranked[0].doc_id, 4);
        assert_eq!(ranked[1].doc_id, 9);
        assert_eq!(ranked[0].score, ranked[1].score);
    }

    #[test]
    fn test_more_occurrences_never_score_lower() {
        let mut index = InvertedIndex::new();
        index.add_document(1, "rust systems").unwrap();
        index.add_document(2, "rust rust systems").unwrap();
        index.add_document(3, "garbage collected").unwrap();
        let scorer = TfIdfScorer::new(&index);
        let query = terms(&index, "rust");

        assert!(scorer.score(&query, 2) >= scorer.score(&query, 1));
        assert_eq!(scorer.score(&query, 3), 0.0);
    }

    #[test]
    fn test_rank_matches_score() {
        let index = sample_index();
        let scorer = TfIdfScorer::new(&index);
        let query = terms(&index, "python python learn");

        for scored in scorer.rank(&query, [1, 2, 3]) {
            let direct = scorer.score(&query, scored.doc_id);
            assert!((scored.score - direct).abs() < 1e-12);
        }
    }

    #[test]
    fn test_empty_candidates() {
        let index = sample_index();
        let scorer = TfIdfScorer::new(&index);
        assert!(scorer.rank(&terms(&index, "python"), Vec::new()).is_empty());
    }
}
