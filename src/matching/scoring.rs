use std::time::Duration;

use serde::Serialize;

use crate::matching::engine::MatchResult;

/// Safely convert usize to f64 for percentage calculations
///
/// Counts above 2^53 lose precision, far beyond any text the engine accepts.
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Round to two decimal digits
#[inline]
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Overlap percentage plus the matching latency it was derived from
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreReport {
    /// `occurrences * pattern_len / text_len * 100`, rounded to 2 decimals.
    /// Exceeds 100 when occurrences overlap or repeat; never clamped.
    pub percentage: f64,

    /// Time spent matching, excluding normalization
    #[serde(serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

impl ScoreReport {
    /// Aggregate a match result into a coverage percentage
    #[must_use]
    pub fn aggregate(result: &MatchResult, pattern_len: usize, text_len: usize) -> Self {
        Self {
            percentage: coverage_percentage(result.positions.len(), pattern_len, text_len),
            elapsed: result.elapsed,
        }
    }
}

/// Coverage percentage: share of the text accounted for by matched characters.
///
/// Returns exactly 0.0 when there are no occurrences or the text is empty.
#[must_use]
pub fn coverage_percentage(occurrences: usize, pattern_len: usize, text_len: usize) -> f64 {
    if occurrences == 0 || text_len == 0 {
        return 0.0;
    }

    let matched_chars = count_to_f64(occurrences) * count_to_f64(pattern_len);
    round2(matched_chars / count_to_f64(text_len) * 100.0)
}
