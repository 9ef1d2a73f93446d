//! Command-line surface.
//!
//! ## Commands
//!
//! ### verify
//! Whole-word occurrences of a word, each shown with its position and context:
//! ```bash
//! transcript-locator verify "Q3 2025" holiday < transcripts.json
//! ```
//!
//! ### debug
//! Exact, plural and stem counts plus every stem occurrence in context:
//! ```bash
//! transcript-locator debug --window 50 < transcripts.json
//! ```
//!
//! ### excerpts
//! Sentences mentioning a keyword, with their neighbours:
//! ```bash
//! transcript-locator excerpts "Q3 2025" holiday --max 5 < transcripts.json
//! ```
//!
//! ### frequency
//! Whole-word counts per quarter with total, average, extremes and trend:
//! ```bash
//! transcript-locator frequency holiday tariff < transcripts.json
//! ```
//!
//! Quarter and word default to the configured values (`Q3 2025` and
//! `holiday` unless a `--config` file says otherwise).

use crate::config::LocatorConfig;
use crate::error::LocatorError;
use crate::report;
use crate::transcript::TranscriptCollection;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{Read, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "transcript-locator")]
#[command(about = "Locate words in quarterly call transcripts for manual review")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Read the transcript document from this file instead of stdin
    #[arg(long, global = true, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// TOML file with default quarter, word and window sizes
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable logging to stderr. Accepts a level (error, warn, info, debug, trace)
    /// or a RUST_LOG-style filter string (e.g., "transcript_locator=debug").
    #[arg(long, global = true)]
    pub log: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Count whole-word matches and show each one in context
    Verify(SearchArgs),

    /// Count the word, its plural and its stem variants
    Debug(SearchArgs),

    /// Show the sentences that mention a keyword
    Excerpts(ExcerptArgs),

    /// Count words in every quarter, with totals and trend
    Frequency(FrequencyArgs),
}

/// Which transcript to search, and for what
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Quarter label to search, matched exactly
    pub quarter: Option<String>,

    /// Word to search for, case-insensitively
    pub word: Option<String>,
}

/// Shared search arguments
#[derive(Args, Debug)]
pub struct SearchArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Characters of context either side of a match
    #[arg(long)]
    pub window: Option<usize>,
}

#[derive(Args, Debug)]
pub struct ExcerptArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Most excerpts to show
    #[arg(long)]
    pub max: Option<usize>,
}

#[derive(Args, Debug)]
pub struct FrequencyArgs {
    /// Words to count; defaults to the configured word
    pub words: Vec<String>,
}

impl Cli {
    /// Set up logging if requested.
    pub fn setup_logging(&self) {
        if let Some(filter) = &self.log {
            use tracing_subscriber::EnvFilter;
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new(filter))
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Load the document, build the requested report and write it to `out`.
///
/// `stdin` is only read when no `--input` file was given.
pub fn run(cli: &Cli, stdin: impl Read, mut out: impl Write) -> Result<()> {
    let config = LocatorConfig::load_or_default(cli.config.as_deref())?;

    let collection = match &cli.input {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            TranscriptCollection::from_reader(file)
                .with_context(|| format!("Failed to load transcripts from {}", path.display()))?
        }
        None => TranscriptCollection::from_reader(stdin)
            .context("Failed to load transcripts from stdin")?,
    };
    tracing::debug!(transcripts = collection.transcripts.len(), "loaded input");

    match &cli.command {
        Command::Verify(args) => {
            let (quarter, word) = args.target.resolve(&config);
            let window = args.window.unwrap_or(config.verify.window);
            let report = report::verify(&collection, quarter, word, window)?;
            write!(out, "{report}")?;
        }
        Command::Debug(args) => {
            let (quarter, word) = args.target.resolve(&config);
            let window = args.window.unwrap_or(config.debug.window);
            let report = report::debug(&collection, quarter, word, window)?;
            write!(out, "{report}")?;
        }
        Command::Excerpts(args) => {
            let (quarter, word) = args.target.resolve(&config);
            let max = args.max.unwrap_or(config.excerpts.max);
            let report = report::excerpts(&collection, quarter, word, max)?;
            write!(out, "{report}")?;
        }
        Command::Frequency(args) => {
            let words = if args.words.is_empty() {
                std::slice::from_ref(&config.default_word)
            } else {
                args.words.as_slice()
            };
            let report = report::frequency(&collection, words)?;
            write!(out, "{report}")?;
        }
    }

    out.flush()?;
    Ok(())
}

impl TargetArgs {
    fn resolve<'a>(&'a self, config: &'a LocatorConfig) -> (&'a str, &'a str) {
        (
            self.quarter.as_deref().unwrap_or(&config.default_quarter),
            self.word.as_deref().unwrap_or(&config.default_word),
        )
    }
}

/// Process exit status for an error returned by [`run`].
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<LocatorError>()
        .map_or(2, LocatorError::exit_code)
}
