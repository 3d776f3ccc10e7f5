//! Typo tolerance for queries.
//!
//! [`fuzzy::FuzzyMatcher`] holds a snapshot of the index vocabulary and maps a
//! possibly misspelled term to the vocabulary terms within a bounded
//! [`levenshtein`] edit distance.

pub mod fuzzy;
pub mod levenshtein;
