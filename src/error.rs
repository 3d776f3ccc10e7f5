//! Error types for the Sift library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`SiftError`] enum. Empty queries, unknown terms and prefixes without
//! matches are not errors; they produce empty result collections.
//!
//! # Examples
//!
//! ```
//! use sift::error::{Result, SiftError};
//!
//! fn checked_limit(limit: usize) -> Result<usize> {
//!     if limit == 0 {
//!         return Err(SiftError::invalid_argument("max_results must be positive"));
//!     }
//!     Ok(limit)
//! }
//!
//! assert!(checked_limit(0).is_err());
//! assert_eq!(checked_limit(3).unwrap(), 3);
//! ```

use std::io;

use thiserror::Error;

use crate::lexical::index::DocId;

/// The main error type for Sift operations.
#[derive(Error, Debug)]
pub enum SiftError {
    /// A document with this id has already been indexed.
    #[error("Duplicate document: id {0} is already indexed")]
    DuplicateDocument(DocId),

    /// A fuzzy query was issued before `build()` (or after indexing made the
    /// vocabulary snapshot stale).
    #[error("Index not built: call build() before fuzzy search")]
    IndexNotBuilt,

    /// A caller supplied an out-of-range or malformed argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Analysis-related errors (tokenizer construction)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// I/O errors (document and config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error, displayed with its context chain
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SiftError.
pub type Result<T> = std::result::Result<T, SiftError>;

impl SiftError {
    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        SiftError::InvalidArgument(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        SiftError::Analysis(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SiftError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = SiftError::invalid_argument("max_results must be positive");
        assert_eq!(
            error.to_string(),
            "Invalid argument: max_results must be positive"
        );

        let error = SiftError::analysis("bad pattern");
        assert_eq!(error.to_string(), "Analysis error: bad pattern");

        let error = SiftError::DuplicateDocument(7);
        assert_eq!(
            error.to_string(),
            "Duplicate document: id 7 is already indexed"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let sift_error = SiftError::from(io_error);

        match sift_error {
            SiftError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_anyhow_error_keeps_context() {
        let error: SiftError = anyhow::anyhow!("unexpected end of input")
            .context("docs.jsonl:4")
            .into();
        assert!(matches!(error, SiftError::Anyhow(_)));
        assert_eq!(error.to_string(), "docs.jsonl:4: unexpected end of input");
    }
}
