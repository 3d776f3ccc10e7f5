//! Tokenizer implementations for text analysis.
//!
//! # Available Tokenizers
//!
//! - [`alphanumeric::AlphanumericTokenizer`] - Lowercase runs of alphanumeric characters (default)
//! - [`regex::RegexTokenizer`] - Lowercase matches of a custom pattern
//!
//! # Examples
//!
//! ```
//! use sift::analysis::tokenizer::Tokenizer;
//! use sift::analysis::tokenizer::alphanumeric::AlphanumericTokenizer;
//!
//! let tokenizer = AlphanumericTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello world").collect();
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[0].text, "hello");
//! ```

use std::fmt::Debug;

use crate::analysis::token::Token;

/// A lazily evaluated stream of tokens borrowing from the input text.
pub type TokenStream<'a> = Box<dyn Iterator<Item = Token> + 'a>;

/// Trait for tokenizers that convert text into normalized tokens.
///
/// Tokenization never fails: characters a tokenizer does not recognize are
/// separators, and empty input yields an empty stream. The trait requires
/// `Send + Sync` so an engine holding a tokenizer can be shared across threads.
pub trait Tokenizer: Send + Sync + Debug {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize<'a>(&self, text: &'a str) -> TokenStream<'a>;

    /// Tokenize and keep only the term text of each token.
    fn terms<'a>(&self, text: &'a str) -> Box<dyn Iterator<Item = String> + 'a> {
        Box::new(self.tokenize(text).map(|token| token.text))
    }

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod alphanumeric;
pub mod regex;
