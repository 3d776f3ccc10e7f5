//! Lexical search over an in-memory inverted index.
//!
//! [`index::InvertedIndex`] owns every indexed document and the posting sets
//! derived from it; [`scoring::TfIdfScorer`] reads its statistics to rank a
//! candidate set against a query.

pub mod index;
pub mod scoring;
