//! Shared text helpers for expectation checks and reports

use regex::Regex;

/// Whether `number` appears in `text` as a standalone run of digits
///
/// `"Bytes copied: 142"` contains 142 but not 14 or 42.
pub fn contains_number_token(text: &str, number: u64) -> bool {
    let pattern = format!(r"(?:^|[^0-9]){number}(?:[^0-9]|$)");
    // A pattern made of digits and fixed syntax always compiles.
    Regex::new(&pattern).is_ok_and(|re| re.is_match(text))
}

/// Truncate a string to a maximum length, adding ellipsis if needed.
///
/// Cuts on a char boundary at or below `max_len` bytes.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
