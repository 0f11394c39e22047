//! Text sources for the document and the pattern.
//!
//! The matching core takes already-decoded strings. This module resolves where
//! they come from:
//!
//! - **Inline text**: typed on the command line or into a form field (trimmed)
//! - **Files**: read verbatim; `.gz` files are decompressed transparently
//! - **Stdin**: `-` as a file argument
//!
//! ## Example
//!
//! ```rust,no_run
//! use plagscan::source::{load_pair, TextSource};
//! use std::path::PathBuf;
//!
//! let text = TextSource::File(PathBuf::from("essay.txt"));
//! let pattern = TextSource::Inline("to be or not to be".to_string());
//! let (text, pattern) = load_pair(&text, &pattern).unwrap();
//! ```

pub mod text;

pub use text::{load_pair, SourceError, TextSource, MAX_INPUT_BYTES};
