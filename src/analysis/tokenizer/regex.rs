//! Regex-based tokenizer implementation.

use std::sync::Arc;

use regex::Regex;

use super::{TokenStream, Tokenizer};
use crate::analysis::token::Token;
use crate::error::{Result, SiftError};

/// A tokenizer that extracts lowercase tokens using a regular expression.
///
/// Each non-empty match of the pattern becomes one token; everything between
/// matches is discarded.
#[derive(Clone, Debug)]
pub struct RegexTokenizer {
    /// The regex pattern used to extract tokens
    pattern: Arc<Regex>,
}

impl RegexTokenizer {
    /// The pattern used by [`RegexTokenizer::new`].
    pub const DEFAULT_PATTERN: &'static str = r"[\p{Alphabetic}\p{Nd}]+";

    /// Create a new regex tokenizer with the default pattern.
    pub fn new() -> Result<Self> {
        Self::with_pattern(Self::DEFAULT_PATTERN)
    }

    /// Create a new regex tokenizer with a custom pattern.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern)
            .map_err(|e| SiftError::analysis(format!("Invalid regex pattern: {e}")))?;

        Ok(RegexTokenizer {
            pattern: Arc::new(regex),
        })
    }

    /// Get the regex pattern used by this tokenizer.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> TokenStream<'a> {
        Box::new(RegexTokens {
            pattern: Arc::clone(&self.pattern),
            text,
            offset: 0,
            position: 0,
        })
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}

/// Lazy stream of the non-empty matches of a pattern.
#[derive(Clone, Debug)]
pub struct RegexTokens<'a> {
    pattern: Arc<Regex>,
    text: &'a str,
    offset: usize,
    position: usize,
}

impl Iterator for RegexTokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while self.offset <= self.text.len() {
            let Some(mat) = self.pattern.find_at(self.text, self.offset) else {
                self.offset = self.text.len() + 1;
                return None;
            };

            if mat.is_empty() {
                // Step over one char so empty matches cannot stall the stream.
                let step = self.text[mat.end()..].chars().next().map_or(1, char::len_utf8);
                self.offset = mat.end() + step;
                continue;
            }

            self.offset = mat.end();
            let token = Token::with_offsets(
                mat.as_str().to_lowercase(),
                self.position,
                mat.start(),
                mat.end(),
            );
            self.position += 1;
            return Some(token);
        }
        None
    }
}

impl std::iter::FusedIterator for RegexTokens<'_> {}
