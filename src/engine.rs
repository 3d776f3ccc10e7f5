//! High-level search engine combining indexing, ranking, autocomplete and
//! typo tolerance.
//!
//! The engine follows a two-phase discipline. During the build phase
//! documents are added with [`SearchEngine::index_document`]; then
//! [`SearchEngine::build`] snapshots the vocabulary for fuzzy matching and the
//! query phase begins. Exact search and autocomplete work at any time, but a
//! fuzzy search needs a snapshot that is at least as new as the last indexed
//! document.
//!
//! # Example
//!
//! ```
//! use sift::engine::SearchEngine;
//!
//! let mut engine = SearchEngine::new();
//! engine.index_document(1, "Python is a programming language").unwrap();
//! engine.index_document(2, "Java is also a programming language").unwrap();
//! engine.index_document(3, "Python is easy to learn").unwrap();
//! engine.build();
//!
//! let hits = engine.search("pythn programing", true, 10).unwrap();
//! assert_eq!(hits[0].doc_id, 1);
//!
//! assert_eq!(engine.autocomplete("pro", 5).unwrap(), vec!["programming"]);
//! ```

pub mod config;

use std::sync::Arc;

use ahash::AHashSet;
use log::{debug, info, warn};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SiftError};
use crate::lexical::index::{DocId, InvertedIndex, PostingSet, StoredDocument};
use crate::lexical::scoring::{ScoredDoc, TfIdfScorer};
use crate::spelling::fuzzy::FuzzyMatcher;
use crate::suggest::trie::{Completion, Trie};

use self::config::EngineConfig;

/// One ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// The document id.
    pub doc_id: DocId,
    /// The raw document text.
    pub text: String,
    /// TF-IDF relevance score.
    pub score: f64,
}

/// Summary of the engine state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    /// Number of indexed documents.
    pub documents: usize,
    /// Number of distinct terms.
    pub vocabulary_size: usize,
    /// Whether the fuzzy snapshot covers every indexed document.
    pub built: bool,
}

/// An in-memory full-text search engine.
///
/// Mutating operations take `&mut self` and queries take `&self`, so a plain
/// `SearchEngine` already enforces a single writer. Wrap it in a
/// [`SharedSearchEngine`] to share it between threads.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    config: EngineConfig,
    index: InvertedIndex,
    trie: Trie,
    /// Vocabulary snapshot; `None` before the first build and after any
    /// document indexed since the last one.
    fuzzy: Option<FuzzyMatcher>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchEngine {
    /// Create an empty engine with the default configuration.
    pub fn new() -> Self {
        SearchEngine {
            config: EngineConfig::default(),
            index: InvertedIndex::new(),
            trie: Trie::new(),
            fuzzy: None,
        }
    }

    /// Create an empty engine with a custom configuration.
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let tokenizer = config.tokenizer.build()?;

        Ok(SearchEngine {
            config,
            index: InvertedIndex::with_tokenizer(tokenizer),
            trie: Trie::new(),
            fuzzy: None,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read access to the underlying inverted index.
    pub fn index(&self) -> &InvertedIndex {
        &self.index
    }

    /// Read access to the autocomplete trie.
    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    /// Add a document to the index and count its distinct terms in the trie.
    ///
    /// Invalidates the fuzzy snapshot; call [`SearchEngine::build`] again
    /// before the next fuzzy search.
    pub fn index_document<S: Into<String>>(&mut self, id: DocId, text: S) -> Result<()> {
        self.index.add_document(id, text)?;

        if let Some(doc) = self.index.document(id) {
            let distinct: AHashSet<&str> = doc.tokens().iter().map(String::as_str).collect();
            for term in distinct {
                self.trie.increment(term);
            }
            debug!("Indexed document {} ({} tokens)", id, doc.len());
        }

        if self.fuzzy.take().is_some() {
            debug!("Fuzzy snapshot invalidated by document {id}");
        }
        Ok(())
    }

    /// Index a batch of documents, stopping at the first failure.
    ///
    /// Documents before the failing one stay indexed. Returns the number of
    /// documents added.
    pub fn index_documents<I, S>(&mut self, documents: I) -> Result<usize>
    where
        I: IntoIterator<Item = (DocId, S)>,
        S: Into<String>,
    {
        let mut added = 0;
        for (id, text) in documents {
            self.index_document(id, text)?;
            added += 1;
        }
        Ok(added)
    }

    /// Snapshot the vocabulary for fuzzy search.
    pub fn build(&mut self) {
        let matcher = FuzzyMatcher::from_index(&self.index, self.config.max_edit_distance);
        info!(
            "Built fuzzy snapshot: {} terms over {} documents (max distance {})",
            matcher.vocabulary_size(),
            self.index.doc_count(),
            matcher.max_distance()
        );
        self.fuzzy = Some(matcher);
    }

    /// Whether a fuzzy snapshot covering every indexed document exists.
    pub fn is_built(&self) -> bool {
        self.fuzzy.is_some()
    }

    /// Rank documents matching any query term and return the best `max_results`.
    ///
    /// With `use_fuzzy`, every query term is widened to the vocabulary terms
    /// within the configured edit distance, and those terms are what the
    /// documents are scored against.
    pub fn search(
        &self,
        query: &str,
        use_fuzzy: bool,
        max_results: usize,
    ) -> Result<Vec<SearchHit>> {
        check_max_results(max_results)?;

        let (terms, candidates) = if use_fuzzy {
            let matcher = self.fuzzy.as_ref().ok_or_else(|| {
                warn!("Fuzzy search refused: no current vocabulary snapshot");
                SiftError::IndexNotBuilt
            })?;
            let terms = matcher.expand(query, &self.index);
            let candidates = self.index.postings_union(terms.iter().map(String::as_str));
            (terms, candidates)
        } else {
            let terms = self.index.analyze(query);
            let candidates = self.index.postings_union(terms.iter().map(String::as_str));
            (terms, candidates)
        };

        debug!(
            "Search {:?}: {} terms, {} candidates, fuzzy={}",
            query,
            terms.len(),
            candidates.len(),
            use_fuzzy
        );
        Ok(self.ranked_hits(&terms, candidates, max_results))
    }

    /// Exact search with the configured default result limit.
    pub fn search_with_defaults(&self, query: &str) -> Result<Vec<SearchHit>> {
        self.search(query, false, self.config.default_max_results)
    }

    /// Rank documents containing every query term.
    pub fn search_all(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        check_max_results(max_results)?;

        let terms = self.index.analyze(query);
        let candidates = self.index.search_and(query);
        debug!(
            "Conjunctive search {:?}: {} candidates",
            query,
            candidates.len()
        );
        Ok(self.ranked_hits(&terms, candidates, max_results))
    }

    /// Up to `max_results` indexed terms starting with `prefix`, most common first.
    ///
    /// The prefix is lowercased to match the normalized vocabulary.
    pub fn autocomplete(&self, prefix: &str, max_results: usize) -> Result<Vec<String>> {
        check_max_results(max_results)?;
        Ok(self.trie.autocomplete(&prefix.to_lowercase(), max_results))
    }

    /// Like [`SearchEngine::autocomplete`] but includes document counts.
    pub fn autocomplete_with_frequency(
        &self,
        prefix: &str,
        max_results: usize,
    ) -> Result<Vec<Completion>> {
        check_max_results(max_results)?;
        Ok(self
            .trie
            .autocomplete_with_frequency(&prefix.to_lowercase(), max_results))
    }

    /// The stored document for `id`.
    pub fn document(&self, id: DocId) -> Option<&StoredDocument> {
        self.index.document(id)
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.index.doc_count()
    }

    /// Whether no document has been indexed.
    pub fn is_empty(&self) -> bool {
        self.index.doc_count() == 0
    }

    /// Current engine statistics.
    pub fn stats(&self) -> EngineStats {
        EngineStats {
            documents: self.index.doc_count(),
            vocabulary_size: self.index.vocabulary_size(),
            built: self.is_built(),
        }
    }

    fn ranked_hits(
        &self,
        terms: &[String],
        candidates: PostingSet,
        max_results: usize,
    ) -> Vec<SearchHit> {
        if candidates.is_empty() {
            return Vec::new();
        }

        let mut ranked: Vec<ScoredDoc> = TfIdfScorer::new(&self.index).rank(terms, candidates);
        ranked.truncate(max_results);

        ranked
            .into_iter()
            .filter_map(|scored| {
                self.index.document(scored.doc_id).map(|doc| SearchHit {
                    doc_id: scored.doc_id,
                    text: doc.text().to_string(),
                    score: scored.score,
                })
            })
            .collect()
    }
}

fn check_max_results(max_results: usize) -> Result<()> {
    if max_results == 0 {
        return Err(SiftError::invalid_argument("max_results must be positive"));
    }
    Ok(())
}

/// A cloneable, thread-safe handle to a [`SearchEngine`].
///
/// Indexing and `build` take the write lock, so readers never observe a
/// half-indexed document. Queries share the read lock and run concurrently.
#[derive(Debug, Clone, Default)]
pub struct SharedSearchEngine {
    inner: Arc<RwLock<SearchEngine>>,
}

impl From<SearchEngine> for SharedSearchEngine {
    fn from(engine: SearchEngine) -> Self {
        SharedSearchEngine {
            inner: Arc::new(RwLock::new(engine)),
        }
    }
}

impl SharedSearchEngine {
    /// Create a handle around an empty engine with the default configuration.
    pub fn new() -> Self {
        Self::from(SearchEngine::new())
    }

    /// See [`SearchEngine::index_document`].
    pub fn index_document<S: Into<String>>(&self, id: DocId, text: S) -> Result<()> {
        self.inner.write().index_document(id, text)
    }

    /// See [`SearchEngine::index_documents`]. The whole batch runs under one write lock.
    pub fn index_documents<I, S>(&self, documents: I) -> Result<usize>
    where
        I: IntoIterator<Item = (DocId, S)>,
        S: Into<String>,
    {
        self.inner.write().index_documents(documents)
    }

    /// See [`SearchEngine::build`].
    pub fn build(&self) {
        self.inner.write().build();
    }

    /// See [`SearchEngine::search`].
    pub fn search(
        &self,
        query: &str,
        use_fuzzy: bool,
        max_results: usize,
    ) -> Result<Vec<SearchHit>> {
        self.inner.read().search(query, use_fuzzy, max_results)
    }

    /// See [`SearchEngine::search_all`].
    pub fn search_all(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>> {
        self.inner.read().search_all(query, max_results)
    }

    /// See [`SearchEngine::autocomplete`].
    pub fn autocomplete(&self, prefix: &str, max_results: usize) -> Result<Vec<String>> {
        self.inner.read().autocomplete(prefix, max_results)
    }

    /// See [`SearchEngine::stats`].
    pub fn stats(&self) -> EngineStats {
        self.inner.read().stats()
    }

    /// Run `f` with shared access to the engine.
    pub fn read<R>(&self, f: impl FnOnce(&SearchEngine) -> R) -> R {
        f(&self.inner.read())
    }
}
