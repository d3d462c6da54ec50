//! Shared utility functions

/// Truncate a string to at most `max_chars` characters.
/// Cuts on a char boundary so multi-byte text (accented capitals) stays valid.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Return the trailing `n` characters of a string.
pub fn tail_chars(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    match s.char_indices().rev().nth(n - 1) {
        Some((start, _)) => &s[start..],
        None => s,
    }
}

/// Character length, the unit all size thresholds are expressed in.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}
