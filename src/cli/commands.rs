//! Command implementations for the Sift CLI.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use log::info;
use serde::{Deserialize, Serialize};

use crate::cli::args::*;
use crate::cli::output::*;
use crate::engine::SearchEngine;
use crate::engine::config::EngineConfig;
use crate::error::Result;
use crate::lexical::index::DocId;

/// One line of a document file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: DocId,
    pub text: String,
}

/// Execute a CLI command.
pub fn execute_command(args: SiftArgs) -> Result<()> {
    match &args.command {
        Command::Search(search_args) => search(search_args, &args),
        Command::Complete(complete_args) => complete(complete_args, &args),
        Command::Stats(stats_args) => show_stats(stats_args, &args),
    }
}

/// Read a JSON Lines document file. Blank lines are skipped.
pub fn load_documents<P: AsRef<Path>>(path: P) -> Result<Vec<DocumentRecord>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);

    let mut documents = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: DocumentRecord = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: malformed document", path.display(), line_no + 1))?;
        documents.push(record);
    }
    Ok(documents)
}

/// Build an engine from the configured settings and a document file.
pub fn load_engine(document_file: &Path, cli_args: &SiftArgs) -> Result<SearchEngine> {
    let config = match &cli_args.config {
        Some(path) => EngineConfig::from_file(path)?,
        None => EngineConfig::default(),
    };

    let start = Instant::now();
    let documents = load_documents(document_file)?;
    let mut engine = SearchEngine::with_config(config)?;
    engine.index_documents(documents.into_iter().map(|doc| (doc.id, doc.text)))?;
    engine.build();

    info!(
        "Loaded {} documents from {} in {} ms",
        engine.len(),
        document_file.display(),
        start.elapsed().as_millis()
    );
    Ok(engine)
}

fn search(args: &SearchArgs, cli_args: &SiftArgs) -> Result<()> {
    let engine = load_engine(&args.docs, cli_args)?;

    let start = Instant::now();
    let (mode, hits) = if args.all {
        ("all terms", engine.search_all(&args.query, args.limit)?)
    } else if args.fuzzy {
        ("fuzzy", engine.search(&args.query, true, args.limit)?)
    } else {
        ("exact", engine.search(&args.query, false, args.limit)?)
    };

    let output = SearchOutput {
        query: args.query.clone(),
        mode: mode.to_string(),
        hits,
        duration_ms: start.elapsed().as_millis() as u64,
    };
    output_result("Search results", &output, cli_args)
}

fn complete(args: &CompleteArgs, cli_args: &SiftArgs) -> Result<()> {
    let engine = load_engine(&args.docs, cli_args)?;

    let output = CompletionOutput {
        prefix: args.prefix.clone(),
        completions: engine.autocomplete_with_frequency(&args.prefix, args.limit)?,
    };
    output_result("Completions", &output, cli_args)
}

fn show_stats(args: &StatsArgs, cli_args: &SiftArgs) -> Result<()> {
    let engine = load_engine(&args.docs, cli_args)?;

    let output = StatsOutput {
        document_file: args.docs.display().to_string(),
        stats: engine.stats(),
    };
    output_result("Index statistics", &output, cli_args)
}
