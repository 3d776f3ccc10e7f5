//! Command line interface for the Sift search engine.
//!
//! The CLI loads a JSON Lines document file into a fresh in-memory engine on
//! every invocation and runs one query against it.

pub mod args;
pub mod commands;
pub mod output;

// Re-export commonly used types
pub use args::*;
pub use commands::*;
pub use output::*;
