//! Text truncation utilities.
//!
//! All helpers are char-boundary-safe for multi-byte scripts. The
//! word-capped variant splits on whitespace and is a best-effort heuristic
//! for scripts without space-delimited words.

/// Truncate a string to at most `max_len` bytes, snapping down to a char
/// boundary so multi-byte characters are never split.
#[must_use]
pub fn truncate_str(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Truncate a string to at most `max_len` bytes, appending `suffix` when
/// truncation happened. The result (including suffix) fits in `max_len`.
#[must_use]
pub fn truncate_with_suffix(s: &str, max_len: usize, suffix: &str) -> String {
    if s.len() <= max_len {
        return s.to_owned();
    }
    let budget = max_len.saturating_sub(suffix.len());
    format!("{}{suffix}", truncate_str(s, budget))
}

/// Cap a string to its first `max_words` whitespace-delimited words.
///
/// Returns the capped string and whether truncation happened. For scripts
/// without whitespace word boundaries the whole text counts as one word.
#[must_use]
pub fn truncate_words(s: &str, max_words: usize) -> (String, bool) {
    let words: Vec<&str> = s.split_whitespace().collect();
    if words.len() <= max_words {
        return (words.join(" "), false);
    }
    (words[..max_words].join(" "), true)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
