//! Command line argument parsing for the Sift CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Sift - in-memory full-text search with autocomplete and typo tolerance
#[derive(Parser, Debug, Clone)]
#[command(name = "sift")]
#[command(about = "In-memory full-text search with TF-IDF ranking, autocomplete and typo tolerance")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SiftArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Engine configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "SIFT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SiftArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search the documents
    Search(SearchArgs),

    /// Suggest indexed terms starting with a prefix
    Complete(CompleteArgs),

    /// Show index statistics
    Stats(StatsArgs),
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Document file (JSON Lines of {"id": ..., "text": ...})
    #[arg(short, long, value_name = "DOCUMENT_FILE")]
    pub docs: PathBuf,

    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Match terms within the configured edit distance
    #[arg(long)]
    pub fuzzy: bool,

    /// Require every query term to be present
    #[arg(long, conflicts_with = "fuzzy")]
    pub all: bool,

    /// Maximum number of results to return
    #[arg(short, long, default_value = "10")]
    pub limit: usize,
}

/// Arguments for autocompletion
#[derive(Parser, Debug, Clone)]
pub struct CompleteArgs {
    /// Document file (JSON Lines of {"id": ..., "text": ...})
    #[arg(short, long, value_name = "DOCUMENT_FILE")]
    pub docs: PathBuf,

    /// Prefix to complete
    #[arg(value_name = "PREFIX")]
    pub prefix: String,

    /// Maximum number of suggestions to return
    #[arg(short, long, default_value = "10")]
    pub limit: usize,
}

/// Arguments for statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Document file (JSON Lines of {"id": ..., "text": ...})
    #[arg(short, long, value_name = "DOCUMENT_FILE")]
    pub docs: PathBuf,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
