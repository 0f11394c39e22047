//! # plagscan
//!
//! A library for estimating how much of a text is covered by exact, case-insensitive
//! occurrences of a pattern.
//!
//! The same question can be answered by three classic exact-matching algorithms, and
//! `plagscan` runs whichever one you ask for and reports both the coverage and how long
//! the matching took. That makes it a small plagiarism screen as well as a test bench for
//! comparing the algorithms on real input.
//!
//! ## Features
//!
//! - **Knuth-Morris-Pratt** (`kmp`): prefix-function scan, never re-reads the text
//! - **Rabin-Karp** (`rk`): rolling polynomial hash with explicit verification
//! - **Boyer-Moore** (`bm`): bad-character rule scanning each window right to left
//! - **Case-insensitive**: text and pattern are folded with Unicode lowercase mapping
//! - **Overlapping matches**: every start position counts, so `aa` in `aaaa` occurs 3 times
//!
//! ## Example
//!
//! ```rust
//! use plagscan::MatchEngine;
//!
//! let engine = MatchEngine::new();
//! let report = engine.run("The cat and the hat", "THE", "kmp").unwrap();
//!
//! // Two 3-character matches in a 19-character text
//! assert_eq!(report.percentage, 31.58);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Algorithm identifiers and case normalization
//! - [`matching`]: The matchers, scoring and the engine facade
//! - [`source`]: Loading texts from arguments, files and stdin
//! - [`cli`]: Command-line interface implementation
//! - [`web`]: Web server for browser-based checks

pub mod cli;
pub mod core;
pub mod matching;
pub mod source;
pub mod utils;
pub mod web;

// Re-export commonly used types for convenience
pub use core::types::*;
pub use matching::config::EngineConfig;
pub use matching::engine::{MatchEngine, MatchError, MatchOutcome, MatchResult};
pub use matching::scoring::ScoreReport;
