use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::matching::engine::MatchError;

/// Exact-matching strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmId {
    /// Knuth-Morris-Pratt: failure-function automaton
    #[serde(rename = "kmp")]
    PrefixFunction,
    /// Rabin-Karp: polynomial rolling hash with confirmation
    #[serde(rename = "rk")]
    RollingHash,
    /// Boyer-Moore bad-character heuristic
    #[serde(rename = "bm")]
    BadCharacter,
}

impl AlgorithmId {
    /// All algorithms, in the order they are reported by `compare`
    pub const ALL: [AlgorithmId; 3] = [
        AlgorithmId::PrefixFunction,
        AlgorithmId::RollingHash,
        AlgorithmId::BadCharacter,
    ];

    /// Short selector accepted by [`AlgorithmId::from_str`]
    #[must_use]
    pub fn selector(self) -> &'static str {
        match self {
            Self::PrefixFunction => "kmp",
            Self::RollingHash => "rk",
            Self::BadCharacter => "bm",
        }
    }

    /// Human-readable algorithm name
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::PrefixFunction => "Knuth-Morris-Pratt",
            Self::RollingHash => "Rabin-Karp",
            Self::BadCharacter => "Boyer-Moore",
        }
    }
}

impl FromStr for AlgorithmId {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kmp" => Ok(Self::PrefixFunction),
            "rk" => Ok(Self::RollingHash),
            "bm" => Ok(Self::BadCharacter),
            other => Err(MatchError::UnknownAlgorithm(other.to_string())),
        }
    }
}

impl std::fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.selector())
    }
}

/// A normalized text/pattern pair, indexed by character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchInput {
    pub text: Vec<char>,
    pub pattern: Vec<char>,
}

impl SearchInput {
    #[must_use]
    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn pattern_len(&self) -> usize {
        self.pattern.len()
    }
}
