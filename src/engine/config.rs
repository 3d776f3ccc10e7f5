//! Configuration for the search engine.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::analysis::tokenizer::Tokenizer;
use crate::analysis::tokenizer::alphanumeric::AlphanumericTokenizer;
use crate::analysis::tokenizer::regex::RegexTokenizer;
use crate::error::{Result, SiftError};
use crate::spelling::fuzzy::DEFAULT_MAX_DISTANCE;

/// Which tokenizer the engine analyzes documents and queries with.
///
/// # Example
///
/// ```
/// use sift::engine::config::TokenizerKind;
///
/// let kind: TokenizerKind =
///     serde_json::from_str(r#"{"type": "regex", "pattern": "[a-z]+"}"#).unwrap();
/// assert_eq!(kind.build().unwrap().name(), "regex");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TokenizerKind {
    /// Lowercase runs of alphanumeric characters
    #[default]
    Alphanumeric,
    /// Lowercase matches of a regular expression
    Regex {
        /// The token pattern
        pattern: String,
    },
}

impl TokenizerKind {
    /// Construct the tokenizer this variant describes.
    pub fn build(&self) -> Result<Arc<dyn Tokenizer>> {
        let tokenizer: Arc<dyn Tokenizer> = match self {
            TokenizerKind::Alphanumeric => Arc::new(AlphanumericTokenizer::new()),
            TokenizerKind::Regex { pattern } => Arc::new(RegexTokenizer::with_pattern(pattern)?),
        };
        Ok(tokenizer)
    }
}

/// Engine-wide settings.
///
/// Missing fields take their default when deserializing, so `{}` is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Largest edit distance accepted by fuzzy search.
    pub max_edit_distance: usize,

    /// Result limit used by the `*_with_defaults` operations.
    pub default_max_results: usize,

    /// Tokenizer for both documents and queries.
    pub tokenizer: TokenizerKind,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_edit_distance: DEFAULT_MAX_DISTANCE,
            default_max_results: 10,
            tokenizer: TokenizerKind::default(),
        }
    }
}

impl EngineConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Check that every setting is usable.
    pub fn validate(&self) -> Result<()> {
        if self.default_max_results == 0 {
            return Err(SiftError::invalid_argument(
                "default_max_results must be positive",
            ));
        }
        Ok(())
    }
}
