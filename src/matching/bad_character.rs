//! Boyer-Moore matching with the bad-character rule.
//!
//! After a full match the window jumps by the last occurrence of the character
//! just past it (the quick-search shift). Any start skipped by that jump would
//! need this character at a pattern index beyond its last occurrence, so no
//! overlapping occurrence is lost.

use std::collections::HashMap;

/// Pattern preprocessed into its last-occurrence table
#[derive(Debug, Clone)]
pub struct BadCharacterMatcher<'p> {
    pattern: &'p [char],
    last: HashMap<char, usize>,
}

impl<'p> BadCharacterMatcher<'p> {
    #[must_use]
    pub fn new(pattern: &'p [char]) -> Self {
        let last = pattern.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { pattern, last }
    }

    /// Right-most index of `c` in the pattern, or -1 when absent
    #[must_use]
    pub fn last_occurrence(&self, c: char) -> isize {
        self.last.get(&c).map_or(-1, |&i| to_isize(i))
    }

    /// All starting offsets of the pattern in `text`, overlapping ones included
    #[must_use]
    pub fn find_all(&self, text: &[char]) -> Vec<usize> {
        self.scan(text, |_| {})
    }

    /// Like [`find_all`](Self::find_all), calling `on_window` with each window start examined.
    ///
    /// Window starts are strictly increasing.
    pub fn scan<F: FnMut(usize)>(&self, text: &[char], mut on_window: F) -> Vec<usize> {
        let pattern = self.pattern;
        let m = pattern.len();
        let n = text.len();
        let mut positions = Vec::new();
        if m == 0 || m > n {
            return positions;
        }

        let mut i = 0usize;
        while i <= n - m {
            on_window(i);

            let mismatch = (0..m).rev().find(|&j| pattern[j] != text[i + j]);
            let shift = match mismatch {
                None => {
                    positions.push(i);
                    if i + m < n {
                        to_isize(m) - self.last_occurrence(text[i + m])
                    } else {
                        1
                    }
                }
                Some(j) => to_isize(j) - self.last_occurrence(text[i + j]),
            };

            // Both shifts are at least 1, but clamp so progress never depends on it
            i += usize::try_from(shift.max(1)).unwrap_or(1);
        }

        positions
    }
}

#[inline]
fn to_isize(i: usize) -> isize {
    // Slice indices never exceed isize::MAX
    isize::try_from(i).unwrap_or(isize::MAX)
}

/// Find all occurrences of `pattern` in `text`
#[must_use]
pub fn find_all(text: &[char], pattern: &[char]) -> Vec<usize> {
    BadCharacterMatcher::new(pattern).find_all(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_last_occurrence_table() {
        let pattern = chars("abcab");
        let matcher = BadCharacterMatcher::new(&pattern);
        assert_eq!(matcher.last_occurrence('a'), 3);
        assert_eq!(matcher.last_occurrence('b'), 4);
        assert_eq!(matcher.last_occurrence('c'), 2);
        assert_eq!(matcher.last_occurrence('z'), -1);
    }

    #[test]
    fn test_overlapping_matches() {
        assert_eq!(find_all(&chars("aaaa"), &chars("aa")), vec![0, 1, 2]);
        assert_eq!(find_all(&chars("abababa"), &chars("aba")), vec![0, 2, 4]);
        assert_eq!(find_all(&chars("aaaaa"), &chars("aaa")), vec![0, 1, 2]);
    }

    #[test]
    fn test_match_at_text_end() {
        assert_eq!(find_all(&chars("xxabc"), &chars("abc")), vec![2]);
        assert_eq!(find_all(&chars("abc"), &chars("abc")), vec![0]);
    }

    #[test]
    fn test_jump_past_absent_character() {
        let text = chars("abczabc");
        let pattern = chars("abc");
        let matcher = BadCharacterMatcher::new(&pattern);
        let mut windows = Vec::new();
        let positions = matcher.scan(&text, |i| windows.push(i));

        assert_eq!(positions, vec![0, 4]);
        // 'z' follows the first match and is absent from the pattern: skip m + 1
        assert_eq!(windows, vec![0, 4]);
    }

    #[test]
    fn test_windows_strictly_increase() {
        let text = chars("aaaaaaaaaaaaaaaaaaaab");
        let pattern = chars("aaab");
        let matcher = BadCharacterMatcher::new(&pattern);
        let mut windows = Vec::new();
        let positions = matcher.scan(&text, |i| windows.push(i));

        assert_eq!(positions, vec![17]);
        assert!(windows.windows(2).all(|w| w[0] < w[1]));
        assert!(windows.iter().all(|&i| i + pattern.len() <= text.len()));
    }

    #[test]
    fn test_edge_cases() {
        assert!(find_all(&chars("abc"), &[]).is_empty());
        assert!(find_all(&[], &chars("a")).is_empty());
        assert!(find_all(&chars("ab"), &chars("abc")).is_empty());
        assert!(find_all(&chars("hello world"), &chars("xyz")).is_empty());
    }
}
