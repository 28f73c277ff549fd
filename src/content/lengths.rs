//! Comma separated length lists of catalog variants.
//!
//! Parsing is lenient: tokens are trimmed but never deduplicated, filtered
//! or checked for a numeric value, so `"a,,b"` keeps its empty middle entry.

pub fn parse_lengths(input: &str) -> Vec<String> {
    input.split(',').map(|token| token.trim().to_string()).collect()
}

/// Inverse used to prefill an edit field.
pub fn format_lengths(lengths: &[String]) -> String {
    lengths.join(", ")
}
