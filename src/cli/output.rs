//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::cli::args::{OutputFormat, SiftArgs};
use crate::engine::{EngineStats, SearchHit};
use crate::error::Result;
use crate::suggest::trie::Completion;

/// Result structure for search operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchOutput {
    pub query: String,
    pub mode: String,
    pub hits: Vec<SearchHit>,
    pub duration_ms: u64,
}

/// Result structure for autocompletion.
#[derive(Debug, Serialize, Deserialize)]
pub struct CompletionOutput {
    pub prefix: String,
    pub completions: Vec<Completion>,
}

/// Result structure for statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsOutput {
    pub document_file: String,
    #[serde(flatten)]
    pub stats: EngineStats,
}

/// Plain-text rendering of a command result.
pub trait HumanOutput {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()>;
}

impl HumanOutput for SearchOutput {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        if self.hits.is_empty() {
            return writeln!(out, "No documents match {:?}", self.query);
        }
        for (rank, hit) in self.hits.iter().enumerate() {
            writeln!(
                out,
                "{:>3}. [{}] {:.4}  {}",
                rank + 1,
                hit.doc_id,
                hit.score,
                hit.text
            )?;
        }
        writeln!(
            out,
            "{} hit(s) in {} ms ({})",
            self.hits.len(),
            self.duration_ms,
            self.mode
        )
    }
}

impl HumanOutput for CompletionOutput {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        if self.completions.is_empty() {
            return writeln!(out, "No terms start with {:?}", self.prefix);
        }
        for completion in &self.completions {
            writeln!(out, "{}\t{}", completion.term, completion.frequency)?;
        }
        Ok(())
    }
}

impl HumanOutput for StatsOutput {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Documents:       {}", self.stats.documents)?;
        writeln!(out, "Vocabulary size: {}", self.stats.vocabulary_size)?;
        writeln!(out, "Source:          {}", self.document_file)
    }
}

/// Output a result to stdout in the requested format.
pub fn output_result<T>(message: &str, result: &T, args: &SiftArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, message, result, args)
}

/// Write a result to `out` in the requested format.
pub fn write_result<T>(out: &mut dyn Write, message: &str, result: &T, args: &SiftArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                writeln!(out, "{message}")?;
            }
            result.write_human(out)?;
        }
        OutputFormat::Json => {
            if args.pretty {
                serde_json::to_writer_pretty(&mut *out, result)?;
            } else {
                serde_json::to_writer(&mut *out, result)?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}
