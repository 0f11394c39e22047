use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use thiserror::Error;

/// Largest text or pattern accepted from any source (64 MiB)
pub const MAX_INPUT_BYTES: u64 = 64 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} is not valid UTF-8 text")]
    Encoding(String),

    #[error("{what} exceeds maximum size of {max} bytes")]
    TooLarge { what: String, max: u64 },

    #[error("{0} cannot be empty")]
    EmptyInput(&'static str),

    #[error("Only one input can be read from stdin")]
    MultipleStdin,
}

/// Where a text or pattern comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    /// Typed directly (command-line argument or form field)
    Inline(String),
    /// Read from a file; `.gz` files are decompressed
    File(PathBuf),
    /// Read from standard input
    Stdin,
}

impl TextSource {
    /// Interpret a path argument, treating `-` as stdin
    #[must_use]
    pub fn from_path_arg(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            Self::Stdin
        } else {
            Self::File(path.to_path_buf())
        }
    }

    /// Human-readable description for messages
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Inline(_) => "inline text".to_string(),
            Self::File(path) => path.display().to_string(),
            Self::Stdin => "stdin".to_string(),
        }
    }

    /// Resolve the source into a decoded string.
    ///
    /// Inline text is trimmed, matching manual entry; file and stdin contents are
    /// returned verbatim. Empty results are rejected with `SourceError::EmptyInput`
    /// naming `role`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Io` on read failure, `SourceError::Encoding` for
    /// non-UTF-8 content, `SourceError::TooLarge` past [`MAX_INPUT_BYTES`], or
    /// `SourceError::EmptyInput` when nothing is left to match.
    pub fn load(&self, role: &'static str) -> Result<String, SourceError> {
        let content = match self {
            Self::Inline(text) => {
                if u64::try_from(text.len()).map_or(true, |len| len > MAX_INPUT_BYTES) {
                    return Err(SourceError::TooLarge {
                        what: role.to_string(),
                        max: MAX_INPUT_BYTES,
                    });
                }
                text.trim().to_string()
            }
            Self::File(path) => read_file(path)?,
            Self::Stdin => read_limited(std::io::stdin().lock(), "stdin")?,
        };

        if content.is_empty() {
            return Err(SourceError::EmptyInput(role));
        }

        tracing::debug!(
            source = %self.describe(),
            role,
            bytes = content.len(),
            "Loaded input"
        );
        Ok(content)
    }
}

/// Check if the path is a gzipped file
#[allow(clippy::case_sensitive_file_extension_comparisons)] // Already lowercased
fn is_gzipped(path: &Path) -> bool {
    path.to_string_lossy().to_lowercase().ends_with(".gz")
}

fn read_file(path: &Path) -> Result<String, SourceError> {
    let display = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|source| SourceError::Io {
        path: display.clone(),
        source,
    })?;

    if is_gzipped(path) {
        read_limited(GzDecoder::new(file), &display)
    } else {
        read_limited(file, &display)
    }
}

/// Read at most [`MAX_INPUT_BYTES`] and decode as UTF-8
fn read_limited<R: Read>(reader: R, what: &str) -> Result<String, SourceError> {
    let mut bytes = Vec::new();
    reader
        .take(MAX_INPUT_BYTES + 1)
        .read_to_end(&mut bytes)
        .map_err(|source| SourceError::Io {
            path: what.to_string(),
            source,
        })?;

    if u64::try_from(bytes.len()).map_or(true, |len| len > MAX_INPUT_BYTES) {
        return Err(SourceError::TooLarge {
            what: what.to_string(),
            max: MAX_INPUT_BYTES,
        });
    }

    String::from_utf8(bytes).map_err(|_| SourceError::Encoding(what.to_string()))
}

/// Load a text/pattern pair, refusing to read stdin twice
///
/// # Errors
///
/// Returns `SourceError::MultipleStdin` if both sources are stdin, or any error
/// from [`TextSource::load`].
pub fn load_pair(text: &TextSource, pattern: &TextSource) -> Result<(String, String), SourceError> {
    if *text == TextSource::Stdin && *pattern == TextSource::Stdin {
        return Err(SourceError::MultipleStdin);
    }
    Ok((text.load("text")?, pattern.load("pattern")?))
}
