//! Knuth-Morris-Pratt matching driven by the prefix (failure) function.

/// Pattern preprocessed into its failure function
#[derive(Debug, Clone)]
pub struct PrefixFunctionMatcher<'p> {
    pattern: &'p [char],
    /// `lps[i]`: length of the longest proper prefix of `pattern[..=i]` that is also its suffix
    lps: Vec<usize>,
}

impl<'p> PrefixFunctionMatcher<'p> {
    #[must_use]
    pub fn new(pattern: &'p [char]) -> Self {
        Self {
            pattern,
            lps: failure_function(pattern),
        }
    }

    /// Failure function of the pattern
    #[must_use]
    pub fn lps(&self) -> &[usize] {
        &self.lps
    }

    /// All starting offsets of the pattern in `text`, overlapping ones included
    #[must_use]
    pub fn find_all(&self, text: &[char]) -> Vec<usize> {
        let pattern = self.pattern;
        let m = pattern.len();
        let mut positions = Vec::new();
        if m == 0 {
            return positions;
        }

        let mut j = 0usize;
        for (i, &c) in text.iter().enumerate() {
            while j > 0 && c != pattern[j] {
                j = self.lps[j - 1];
            }
            if c == pattern[j] {
                if j == m - 1 {
                    positions.push(i + 1 - m);
                    j = self.lps[j];
                } else {
                    j += 1;
                }
            }
        }

        positions
    }
}

/// Compute the failure function in one left-to-right pass
#[must_use]
pub fn failure_function(pattern: &[char]) -> Vec<usize> {
    let mut lps = vec![0usize; pattern.len()];
    let mut j = 0usize;

    for i in 1..pattern.len() {
        while j > 0 && pattern[i] != pattern[j] {
            j = lps[j - 1];
        }
        if pattern[i] == pattern[j] {
            j += 1;
        }
        lps[i] = j;
    }

    lps
}

/// Find all occurrences of `pattern` in `text`
#[must_use]
pub fn find_all(text: &[char], pattern: &[char]) -> Vec<usize> {
    PrefixFunctionMatcher::new(pattern).find_all(text)
}
