//! HTTP Status Code Matching Utilities
//!
//! Matches status codes against patterns such as "503" or "5xx". Used to
//! decide which responses are worth retrying.

/// Check if a status code matches any of the given patterns
pub fn status_matches_any(status_code: u16, patterns: &[String]) -> bool {
    patterns
        .iter()
        .any(|pattern| matches_pattern(status_code, pattern))
}

/// Whether `pattern` is an exact code ("404") or a class wildcard ("4xx")
pub fn is_valid_pattern(pattern: &str) -> bool {
    match pattern.strip_suffix("xx") {
        Some(prefix) => prefix.len() == 1 && matches!(prefix.as_bytes()[0], b'1'..=b'5'),
        None => pattern.len() == 3 && pattern.parse::<u16>().is_ok_and(|code| code >= 100),
    }
}

fn matches_pattern(status_code: u16, pattern: &str) -> bool {
    if let Some(prefix) = pattern.strip_suffix("xx") {
        // Wildcard patterns like "2xx", "5xx"
        if prefix.len() == 1 {
            if let Ok(prefix_digit) = prefix.parse::<u16>() {
                return status_code / 100 == prefix_digit;
            }
        }
        false
    } else {
        pattern
            .parse::<u16>()
            .is_ok_and(|exact_code| status_code == exact_code)
    }
}
