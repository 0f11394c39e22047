//! Command-line interface for plagscan.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **check**: Check a pattern against a text with one algorithm
//! - **compare**: Run all three algorithms on the same input and compare them
//! - **interactive**: Step through algorithm choice, input and results at a prompt
//! - **serve**: Start the interactive web interface
//!
//! ## Usage
//!
//! ```text
//! # Check typed text with Knuth-Morris-Pratt
//! plagscan check -a kmp --text "The cat sat on the mat" --pattern "the"
//!
//! # Check files, listing match positions
//! plagscan check -a bm --text-file essay.txt --pattern-file quote.txt --positions
//!
//! # Pipe the text in
//! cat essay.txt | plagscan check -a rk --text-file - --pattern "lorem ipsum"
//!
//! # JSON output for scripting
//! plagscan --format json compare --text-file essay.txt --pattern-file quote.txt
//!
//! # Start web UI
//! plagscan serve --port 8080 --open
//! ```

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::matching::config::EngineConfig;
use crate::matching::engine::MatchEngine;
use crate::source::TextSource;

pub mod check;
pub mod compare;
pub mod interactive;
pub mod session;

#[derive(Parser)]
#[command(name = "plagscan")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Estimate textual overlap with exact substring search")]
#[command(
    long_about = "plagscan finds every occurrence of a pattern in a text and reports how much of the text the occurrences cover.\n\nThree exact-matching algorithms are available:\n- kmp: Knuth-Morris-Pratt\n- rk: Rabin-Karp\n- bm: Boyer-Moore (bad-character rule)\n\nMatching is case-insensitive. Execution time covers the matching itself, so algorithms can be compared."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Path to a JSON engine configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a pattern against a text with one algorithm
    Check(check::CheckArgs),

    /// Run all algorithms on the same input and compare results and timings
    Compare(compare::CompareArgs),

    /// Start an interactive session at the terminal
    Interactive,

    /// Start the web server
    Serve(ServeArgs),
}

/// Text and pattern inputs shared by `check` and `compare`
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Text to search, typed inline (trimmed)
    #[arg(long, required_unless_present = "text_file", conflicts_with = "text_file")]
    pub text: Option<String>,

    /// File containing the text to search (`-` for stdin, `.gz` supported)
    #[arg(long)]
    pub text_file: Option<PathBuf>,

    /// Pattern to look for, typed inline (trimmed)
    #[arg(
        long,
        required_unless_present = "pattern_file",
        conflicts_with = "pattern_file"
    )]
    pub pattern: Option<String>,

    /// File containing the pattern (`-` for stdin, `.gz` supported)
    #[arg(long)]
    pub pattern_file: Option<PathBuf>,
}

impl InputArgs {
    #[must_use]
    pub fn text_source(&self) -> TextSource {
        source_from(self.text.as_ref(), self.text_file.as_deref())
    }

    #[must_use]
    pub fn pattern_source(&self) -> TextSource {
        source_from(self.pattern.as_ref(), self.pattern_file.as_deref())
    }
}

fn source_from(inline: Option<&String>, file: Option<&Path>) -> TextSource {
    match (inline, file) {
        (Some(text), _) => TextSource::Inline(text.clone()),
        (None, Some(path)) => TextSource::from_path_arg(path),
        // clap enforces one of the two; an absent input is an empty one
        (None, None) => TextSource::Inline(String::new()),
    }
}

#[derive(clap::Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    pub address: String,

    /// Open browser automatically
    #[arg(long)]
    pub open: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Build the engine from an optional configuration file
///
/// # Errors
///
/// Returns an error if the configuration file cannot be read or is invalid.
pub fn load_engine(config: Option<&Path>) -> anyhow::Result<MatchEngine> {
    let config = match config {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Loading engine configuration");
            EngineConfig::load_from_file(path)?
        }
        None => EngineConfig::default(),
    };
    Ok(MatchEngine::with_config(config)?)
}
