//! Prefix-based term suggestions.
//!
//! The engine feeds every distinct term of every indexed document into a
//! [`trie::Trie`], counting how many documents contain it. Autocomplete then
//! ranks the completions of a prefix by that count.

pub mod trie;
