//! # Sift
//!
//! An in-memory full-text search engine.
//!
//! ## Features
//!
//! - Lowercase alphanumeric tokenization (or a custom regex tokenizer)
//! - Inverted index with conjunctive and disjunctive term retrieval
//! - TF-IDF ranking with deterministic tie-breaking
//! - Prefix autocomplete ranked by document frequency
//! - Typo-tolerant search using bounded Levenshtein distance
//!
//! ## Example
//!
//! ```
//! use sift::prelude::*;
//!
//! let mut engine = SearchEngine::new();
//! engine.index_document(1, "Python is a programming language")?;
//! engine.index_document(2, "Java is also a programming language")?;
//! engine.build();
//!
//! let hits = engine.search("jav", true, 10)?;
//! assert_eq!(hits[0].doc_id, 2);
//! # Ok::<(), SiftError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod engine;
pub mod error;
pub mod lexical;
pub mod spelling;
pub mod suggest;

pub mod prelude {
    pub use crate::engine::config::EngineConfig;
    pub use crate::engine::{EngineStats, SearchEngine, SearchHit, SharedSearchEngine};
    pub use crate::error::{Result, SiftError};
    pub use crate::lexical::index::DocId;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
