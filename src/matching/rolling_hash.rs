//! Rabin-Karp matching with a polynomial rolling hash.
//!
//! Windows whose fingerprint equals the pattern's are confirmed character by
//! character, so collisions cost time but never produce false positives.

use serde::{Deserialize, Serialize};

/// Default radix: one slot per byte value
pub const DEFAULT_BASE: i64 = 256;

/// Default prime modulus
pub const DEFAULT_MODULUS: i64 = 101;

/// Largest accepted base or modulus. Keeps `base * (hash - x)` inside `i64`.
pub const MAX_HASH_PARAM: i64 = (1 << 31) - 1;

/// Parameters of the polynomial rolling hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RollingHashParams {
    /// Alphabet radix
    pub base: i64,
    /// Modulus (should be prime)
    pub modulus: i64,
}

impl Default for RollingHashParams {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE,
            modulus: DEFAULT_MODULUS,
        }
    }
}

impl RollingHashParams {
    /// Check that the parameters keep all arithmetic in range
    ///
    /// # Errors
    ///
    /// Returns a description of the first out-of-range parameter.
    pub fn validate(&self) -> Result<(), String> {
        if !(2..=MAX_HASH_PARAM).contains(&self.base) {
            return Err(format!(
                "rolling hash base must be in 2..={MAX_HASH_PARAM}, got {}",
                self.base
            ));
        }
        if !(2..=MAX_HASH_PARAM).contains(&self.modulus) {
            return Err(format!(
                "rolling hash modulus must be in 2..={MAX_HASH_PARAM}, got {}",
                self.modulus
            ));
        }
        Ok(())
    }
}

/// Rolling-hash matcher bound to a pattern
#[derive(Debug, Clone)]
pub struct RollingHashMatcher<'p> {
    pattern: &'p [char],
    params: RollingHashParams,
    pattern_hash: i64,
    /// `base^(m-1) mod modulus`: weight of the outgoing character
    high_order: i64,
}

impl<'p> RollingHashMatcher<'p> {
    #[must_use]
    pub fn new(pattern: &'p [char], params: RollingHashParams) -> Self {
        let q = params.modulus;
        let high_order = (1..pattern.len()).fold(1 % q, |h, _| (h * params.base) % q);

        Self {
            pattern,
            params,
            pattern_hash: hash(pattern, params),
            high_order,
        }
    }

    /// All starting offsets of the pattern in `text`, overlapping ones included
    #[must_use]
    pub fn find_all(&self, text: &[char]) -> Vec<usize> {
        let m = self.pattern.len();
        let n = text.len();
        let mut positions = Vec::new();
        if m == 0 || m > n {
            return positions;
        }

        let RollingHashParams { base, modulus: q } = self.params;
        let mut text_hash = hash(&text[..m], self.params);

        for i in 0..=n - m {
            if text_hash == self.pattern_hash && text[i..i + m] == *self.pattern {
                positions.push(i);
            }
            if i < n - m {
                let outgoing = (code(text[i], q) * self.high_order) % q;
                text_hash = (base * (text_hash - outgoing) + code(text[i + m], q)) % q;
                if text_hash < 0 {
                    text_hash += q;
                }
            }
        }

        positions
    }
}

/// Character code reduced into the hash field
#[inline]
fn code(c: char, modulus: i64) -> i64 {
    i64::from(u32::from(c)) % modulus
}

/// Horner's-rule hash of a whole slice
fn hash(chars: &[char], params: RollingHashParams) -> i64 {
    chars.iter().fold(0, |acc, &c| {
        (params.base * acc + code(c, params.modulus)) % params.modulus
    })
}

/// Find all occurrences of `pattern` in `text`
#[must_use]
pub fn find_all(text: &[char], pattern: &[char], params: RollingHashParams) -> Vec<usize> {
    RollingHashMatcher::new(pattern, params).find_all(text)
}
