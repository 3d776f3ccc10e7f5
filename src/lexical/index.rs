//! In-memory inverted index.
//!
//! The index maps every term to the set of documents containing it and keeps
//! the raw text and token sequence of each document for scoring and display.
//!
//! # Examples
//!
//! ```
//! use sift::lexical::index::InvertedIndex;
//!
//! let mut index = InvertedIndex::new();
//! index.add_document(1, "Python is a programming language").unwrap();
//! index.add_document(2, "Java is also a programming language").unwrap();
//!
//! let hits = index.search_and("programming python");
//! assert_eq!(hits.into_iter().collect::<Vec<_>>(), vec![1]);
//! assert_eq!(index.document_frequency("language"), 2);
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::alphanumeric::AlphanumericTokenizer;
use crate::error::{Result, SiftError};

/// Caller-assigned document identifier.
pub type DocId = u64;

/// Posting set of a single term. Ordered so iteration is deterministic.
pub type PostingSet = BTreeSet<DocId>;

/// A document as held by the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    id: DocId,
    text: String,
    tokens: Vec<String>,
}

impl StoredDocument {
    /// The document id.
    pub fn id(&self) -> DocId {
        self.id
    }

    /// The raw text exactly as it was indexed.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The normalized token sequence, in document order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Number of tokens in the document.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether the document produced no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Term to posting set map plus the document store it was built from.
///
/// Invariant: `id` is in the posting set of `term` if and only if `term`
/// occurs at least once in the token sequence of document `id`.
#[derive(Debug, Clone)]
pub struct InvertedIndex {
    tokenizer: Arc<dyn Tokenizer>,
    postings: AHashMap<String, PostingSet>,
    documents: AHashMap<DocId, StoredDocument>,
}

impl Default for InvertedIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl InvertedIndex {
    /// Create an empty index using the alphanumeric tokenizer.
    pub fn new() -> Self {
        Self::with_tokenizer(Arc::new(AlphanumericTokenizer::new()))
    }

    /// Create an empty index that analyzes documents and queries with `tokenizer`.
    pub fn with_tokenizer(tokenizer: Arc<dyn Tokenizer>) -> Self {
        InvertedIndex {
            tokenizer,
            postings: AHashMap::new(),
            documents: AHashMap::new(),
        }
    }

    /// The tokenizer shared by indexing and querying.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Tokenize `text` the same way documents are tokenized.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        self.tokenizer.terms(text).collect()
    }

    /// Index a document under `id`.
    ///
    /// Fails with [`SiftError::DuplicateDocument`] if `id` is already present;
    /// the existing document is left untouched in that case.
    pub fn add_document<S: Into<String>>(&mut self, id: DocId, text: S) -> Result<()> {
        if self.documents.contains_key(&id) {
            return Err(SiftError::DuplicateDocument(id));
        }

        let text = text.into();
        let tokens = self.analyze(&text);

        let distinct: AHashSet<&str> = tokens.iter().map(String::as_str).collect();
        for term in distinct {
            self.postings.entry(term.to_string()).or_default().insert(id);
        }

        self.documents.insert(id, StoredDocument { id, text, tokens });
        Ok(())
    }

    /// Documents containing every term of `query`.
    ///
    /// An empty query, or one with any term missing from the vocabulary,
    /// matches nothing.
    pub fn search_and(&self, query: &str) -> PostingSet {
        let terms: AHashSet<String> = self.tokenizer.terms(query).collect();
        if terms.is_empty() {
            return PostingSet::new();
        }

        let mut sets = Vec::with_capacity(terms.len());
        for term in &terms {
            match self.postings.get(term) {
                Some(set) => sets.push(set),
                None => return PostingSet::new(),
            }
        }

        // Intersect starting from the rarest term.
        sets.sort_by_key(|set| set.len());
        let Some((first, rest)) = sets.split_first() else {
            return PostingSet::new();
        };

        first
            .iter()
            .copied()
            .filter(|id| rest.iter().all(|set| set.contains(id)))
            .collect()
    }

    /// Documents containing at least one term of `query`.
    pub fn search_or(&self, query: &str) -> PostingSet {
        let terms = self.analyze(query);
        self.postings_union(terms.iter().map(String::as_str))
    }

    /// Union of the posting sets of `terms`. Unknown terms contribute nothing.
    pub fn postings_union<'a, I>(&self, terms: I) -> PostingSet
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut result = PostingSet::new();
        for term in terms {
            if let Some(set) = self.postings.get(term) {
                result.extend(set.iter().copied());
            }
        }
        result
    }

    /// Number of occurrences of `term` in document `doc_id`.
    pub fn term_count(&self, term: &str, doc_id: DocId) -> usize {
        self.documents
            .get(&doc_id)
            .map_or(0, |doc| doc.tokens.iter().filter(|t| *t == term).count())
    }

    /// Proportion of the tokens of `doc_id` equal to `term`.
    ///
    /// Returns 0 for unknown documents, documents without tokens and absent terms.
    pub fn term_frequency(&self, term: &str, doc_id: DocId) -> f64 {
        match self.documents.get(&doc_id) {
            Some(doc) if !doc.is_empty() => {
                self.term_count(term, doc_id) as f64 / doc.len() as f64
            }
            _ => 0.0,
        }
    }

    /// Number of documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, PostingSet::len)
    }

    /// Posting set of `term`, if the term is in the vocabulary.
    pub fn postings(&self, term: &str) -> Option<&PostingSet> {
        self.postings.get(term)
    }

    /// The stored document for `id`.
    pub fn document(&self, id: DocId) -> Option<&StoredDocument> {
        self.documents.get(&id)
    }

    /// Whether a document with `id` has been indexed.
    pub fn contains(&self, id: DocId) -> bool {
        self.documents.contains_key(&id)
    }

    /// Total number of indexed documents.
    pub fn doc_count(&self) -> usize {
        self.documents.len()
    }

    /// Whether the vocabulary contains `term`.
    pub fn has_term(&self, term: &str) -> bool {
        self.postings.contains_key(term)
    }

    /// All distinct terms, sorted.
    pub fn vocabulary(&self) -> Vec<&str> {
        let mut terms: Vec<&str> = self.postings.keys().map(String::as_str).collect();
        terms.sort_unstable();
        terms
    }

    /// Number of distinct terms.
    pub fn vocabulary_size(&self) -> usize {
        self.postings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::analysis::tokenizer::regex::RegexTokenizer;

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

    fn ids(set: PostingSet) -> Vec<DocId> {
        set.into_iter().collect()
    }

    #[test]
    fn test_search_and() {
        let index = sample_index();
        assert_eq!(ids(index.search_and("python programming")), vec![1]);
        assert_eq!(ids(index.search_and("is")), vec![1, 2, 3]);
        assert_eq!(ids(index.search_and("PYTHON, is!")), vec![1, 3]);
    }

    #[test]
    fn test_search_and_unknown_term_is_empty() {
        let index = sample_index();
        assert!(index.search_and("python rust").is_empty());
        assert!(index.search_and("").is_empty());
        assert!(index.search_and("   ...").is_empty());
    }

    #[test]
    fn test_search_or() {
        let index = sample_index();
        assert_eq!(ids(index.search_or("python java")), vec![1, 2, 3]);
        assert_eq!(ids(index.search_or("java rust")), vec![2]);
        assert!(index.search_or("rust go").is_empty());
        assert!(index.search_or("").is_empty());
    }

    #[test]
    fn test_postings_union() {
        let index = sample_index();
        let union = index.postings_union(["java", "learn", "missing"]);
        assert_eq!(ids(union), vec![2, 3]);
        assert!(index.postings_union(std::iter::empty()).is_empty());
    }

    #[test]
    fn test_and_is_subset_of_or() {
        let index = sample_index();
        for query in ["python programming", "is a", "java learn", "language"] {
            let and = index.search_and(query);
            let or = index.search_or(query);
            assert!(and.is_subset(&or), "{query}");
        }
    }

    #[test]
    fn test_duplicate_document_rejected() {
        let mut index = InvertedIndex::new();
        index.add_document(1, "a").unwrap();

        let result = index.add_document(1, "b");
        assert!(matches!(result, Err(SiftError::DuplicateDocument(1))));

        assert_eq!(index.document(1).unwrap().text(), "a");
        assert!(!index.has_term("b"));
        assert_eq!(index.doc_count(), 1);
    }

    #[test]
    fn test_term_frequency() {
        let mut index = InvertedIndex::new();
        index.add_document(1, "rust rust go").unwrap();
        index.add_document(2, "!!!").unwrap();

        assert!((index.term_frequency("rust", 1) - 2.0 / 3.0).abs() < 1e-12);
        assert!((index.term_frequency("go", 1) - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(index.term_frequency("java", 1), 0.0);
        assert_eq!(index.term_frequency("rust", 2), 0.0);
        assert_eq!(index.term_frequency("rust", 99), 0.0);
        assert_eq!(index.term_count("rust", 1), 2);
    }

    #[test]
    fn test_document_frequency() {
        let index = sample_index();
        assert_eq!(index.document_frequency("python"), 2);
        assert_eq!(index.document_frequency("is"), 3);
        assert_eq!(index.document_frequency("rust"), 0);
    }

    #[test]
    fn test_posting_sets_have_no_duplicates() {
        let mut index = InvertedIndex::new();
        index.add_document(5, "echo echo echo").unwrap();
        assert_eq!(index.postings("echo").unwrap().len(), 1);
    }

    #[test]
    fn test_vocabulary_sorted() {
        let mut index = InvertedIndex::new();
        index.add_document(1, "zeta alpha mu").unwrap();
        index.add_document(2, "alpha beta").unwrap();
        assert_eq!(index.vocabulary(), vec!["alpha", "beta", "mu", "zeta"]);
        assert_eq!(index.vocabulary_size(), 4);
    }

    #[test]
    fn test_stored_document() {
        let index = sample_index();
        let doc = index.document(3).unwrap();
        assert_eq!(doc.id(), 3);
        assert_eq!(doc.text(), "Python is easy to learn");
        assert_eq!(doc.tokens(), &["python", "is", "easy", "to", "learn"]);
        assert!(index.document(42).is_none());
    }

    #[test]
    fn test_custom_tokenizer() {
        let tokenizer = RegexTokenizer::with_pattern(r"[a-z_]+").unwrap();
        let mut index = InvertedIndex::with_tokenizer(Arc::new(tokenizer));
        index.add_document(1, "snake_case words").unwrap();
        assert!(index.has_term("snake_case"));
        assert_eq!(ids(index.search_and("snake_case")), vec![1]);
    }
}
