//! Text analysis for Sift.
//!
//! Raw document text and query strings both pass through a [`Tokenizer`]
//! that turns them into normalized terms. Index and query must agree on the
//! tokenizer, so the engine owns a single instance and uses it for both.
//!
//! ```
//! use sift::analysis::tokenize;
//!
//! let terms: Vec<String> = tokenize("Hello, World! 42").collect();
//! assert_eq!(terms, vec!["hello", "world", "42"]);
//! ```
//!
//! [`Tokenizer`]: tokenizer::Tokenizer

pub mod token;
pub mod tokenizer;

use self::tokenizer::alphanumeric::{AlphanumericTokenizer, Terms};

/// Split `text` into lowercase alphanumeric terms with the default tokenizer.
pub fn tokenize(text: &str) -> Terms<'_> {
    AlphanumericTokenizer::new().terms(text)
}
