//! Alphanumeric tokenizer implementation.

use super::{TokenStream, Tokenizer};
use crate::analysis::token::Token;

/// A tokenizer that emits lowercase runs of alphanumeric characters.
///
/// Every character for which [`char::is_alphanumeric`] is false acts as a
/// separator. This is the tokenizer the engine uses unless configured otherwise.
#[derive(Clone, Copy, Debug, Default)]
pub struct AlphanumericTokenizer;

impl AlphanumericTokenizer {
    /// Create a new alphanumeric tokenizer.
    pub fn new() -> Self {
        AlphanumericTokenizer
    }

    /// Lazily iterate over the tokens of `text`.
    pub fn tokens<'a>(&self, text: &'a str) -> Tokens<'a> {
        Tokens {
            text,
            offset: 0,
            position: 0,
        }
    }

    /// Lazily iterate over the terms of `text`.
    ///
    /// The returned iterator is `Clone`; cloning it before consumption gives a
    /// second pass over the same terms without re-reading anything.
    pub fn terms<'a>(&self, text: &'a str) -> Terms<'a> {
        Terms {
            tokens: self.tokens(text),
        }
    }
}

impl Tokenizer for AlphanumericTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> TokenStream<'a> {
        Box::new(self.tokens(text))
    }

    fn name(&self) -> &'static str {
        "alphanumeric"
    }
}

/// Iterator over the tokens of a borrowed string.
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    text: &'a str,
    offset: usize,
    position: usize,
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let rest = &self.text[self.offset..];
        let Some(skip) = rest.find(char::is_alphanumeric) else {
            self.offset = self.text.len();
            return None;
        };

        let start = self.offset + skip;
        let end = self.text[start..]
            .find(|c: char| !c.is_alphanumeric())
            .map_or(self.text.len(), |len| start + len);
        self.offset = end;

        // Lowercasing may expand into combining marks ('İ' -> "i\u{307}").
        let text: String = self.text[start..end]
            .chars()
            .flat_map(char::to_lowercase)
            .filter(|c| c.is_alphanumeric())
            .collect();
        let token = Token::with_offsets(text, self.position, start, end);
        self.position += 1;
        Some(token)
    }
}

impl std::iter::FusedIterator for Tokens<'_> {}

/// Iterator over the term text of a borrowed string.
#[derive(Clone, Debug)]
pub struct Terms<'a> {
    tokens: Tokens<'a>,
}

impl Iterator for Terms<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.tokens.next().map(|token| token.text)
    }
}

impl std::iter::FusedIterator for Terms<'_> {}
