use std::time::{Duration, Instant};

use serde::Serialize;
use thiserror::Error;

use crate::core::normalize::normalize;
use crate::core::types::{AlgorithmId, SearchInput};
use crate::matching::config::{ConfigError, EngineConfig};
use crate::matching::rolling_hash::RollingHashParams;
use crate::matching::scoring::ScoreReport;
use crate::matching::{bad_character, prefix_function, rolling_hash};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("Unknown algorithm: '{0}' (expected one of: kmp, rk, bm)")]
    UnknownAlgorithm(String),

    #[error("Input too large: {len} characters exceeds maximum of {max}")]
    InputTooLarge { len: usize, max: usize },
}

/// Raw output of one matcher run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Zero-based character offsets, ascending, no duplicates
    pub positions: Vec<usize>,

    /// Time spent preprocessing the pattern and scanning the text
    pub elapsed: Duration,
}

/// Run one strategy over a normalized input, timing only the matching itself
#[must_use]
pub fn find_all_occurrences(
    algorithm: AlgorithmId,
    input: &SearchInput,
    hash_params: RollingHashParams,
) -> MatchResult {
    let start = Instant::now();
    let positions = match algorithm {
        AlgorithmId::PrefixFunction => prefix_function::find_all(&input.text, &input.pattern),
        AlgorithmId::RollingHash => {
            rolling_hash::find_all(&input.text, &input.pattern, hash_params)
        }
        AlgorithmId::BadCharacter => bad_character::find_all(&input.text, &input.pattern),
    };
    let elapsed = start.elapsed();

    MatchResult { positions, elapsed }
}

fn aggregate(algorithm: AlgorithmId, input: &SearchInput, result: MatchResult) -> MatchOutcome {
    let report = ScoreReport::aggregate(&result, input.pattern_len(), input.text_len());

    MatchOutcome {
        algorithm,
        positions: result.positions,
        report,
        text_len: input.text_len(),
        pattern_len: input.pattern_len(),
    }
}

fn advance(state: EngineState) -> EngineState {
    let next = state.next();
    tracing::trace!(from = ?state, to = ?next, "Engine state");
    next
}

/// Phases of a single engine run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Normalizing,
    Matching,
    Aggregating,
    Done,
}

impl EngineState {
    /// The phase that follows this one. `Done` is terminal.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Idle => Self::Normalizing,
            Self::Normalizing => Self::Matching,
            Self::Matching => Self::Aggregating,
            Self::Aggregating | Self::Done => Self::Done,
        }
    }
}

/// Positions and score for one algorithm over one input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchOutcome {
    pub algorithm: AlgorithmId,
    pub positions: Vec<usize>,
    #[serde(flatten)]
    pub report: ScoreReport,
    /// Normalized text length in characters
    pub text_len: usize,
    /// Normalized pattern length in characters
    pub pattern_len: usize,
}

impl MatchOutcome {
    #[must_use]
    pub fn occurrences(&self) -> usize {
        self.positions.len()
    }
}

/// All three algorithms run over the same input
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub outcomes: Vec<MatchOutcome>,
    /// Every algorithm reported the same positions
    pub agree: bool,
}

/// Facade over normalization, matching and scoring.
///
/// Holds only immutable configuration, so one engine can serve concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct MatchEngine {
    config: EngineConfig,
}

impl MatchEngine {
    /// Create a new engine with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new engine with custom configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the configuration is out of range.
    pub fn with_config(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Check `pattern` against `text` with the algorithm named by `selector`
    ///
    /// # Errors
    ///
    /// Returns `MatchError::UnknownAlgorithm` for a selector other than `kmp`, `rk`
    /// or `bm`, or `MatchError::InputTooLarge` if either input exceeds the limit.
    pub fn run(&self, text: &str, pattern: &str, selector: &str) -> Result<ScoreReport, MatchError> {
        self.run_detailed(text, pattern, selector)
            .map(|outcome| outcome.report)
    }

    /// Like [`run`](Self::run), also returning the match positions
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub fn run_detailed(
        &self,
        text: &str,
        pattern: &str,
        selector: &str,
    ) -> Result<MatchOutcome, MatchError> {
        let algorithm: AlgorithmId = selector.parse()?;
        self.run_with(text, pattern, algorithm)
    }

    /// Run a typed algorithm selection
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InputTooLarge` if either input exceeds the limit.
    pub fn run_with(
        &self,
        text: &str,
        pattern: &str,
        algorithm: AlgorithmId,
    ) -> Result<MatchOutcome, MatchError> {
        let mut state = EngineState::Idle;
        self.check_size(text)?;
        self.check_size(pattern)?;

        state = advance(state);
        let input = normalize(text, pattern);

        state = advance(state);
        let result = find_all_occurrences(algorithm, &input, self.config.rolling_hash);

        state = advance(state);
        let outcome = aggregate(algorithm, &input, result);

        advance(state);
        tracing::debug!(
            algorithm = %algorithm,
            occurrences = outcome.occurrences(),
            percentage = outcome.report.percentage,
            elapsed_us = u64::try_from(outcome.report.elapsed.as_micros()).unwrap_or(u64::MAX),
            "Match complete"
        );
        Ok(outcome)
    }

    /// Run all three algorithms over one normalized input
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InputTooLarge` if either input exceeds the limit.
    pub fn compare(&self, text: &str, pattern: &str) -> Result<Comparison, MatchError> {
        self.check_size(text)?;
        self.check_size(pattern)?;
        let input = normalize(text, pattern);

        let outcomes: Vec<MatchOutcome> = AlgorithmId::ALL
            .iter()
            .map(|&algorithm| self.match_normalized(&input, algorithm))
            .collect();
        let agree = outcomes
            .windows(2)
            .all(|w| w[0].positions == w[1].positions);

        if !agree {
            tracing::warn!("Algorithms disagree on match positions");
        }

        Ok(Comparison { outcomes, agree })
    }

    fn match_normalized(&self, input: &SearchInput, algorithm: AlgorithmId) -> MatchOutcome {
        let result = find_all_occurrences(algorithm, input, self.config.rolling_hash);
        aggregate(algorithm, input, result)
    }

    fn check_size(&self, s: &str) -> Result<(), MatchError> {
        let max = self.config.max_input_chars;
        // Byte length bounds the char count; only count chars when it matters
        if s.len() > max {
            let len = s.chars().count();
            if len > max {
                return Err(MatchError::InputTooLarge { len, max });
            }
        }
        Ok(())
    }
}
