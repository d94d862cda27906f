//! Reply normalization and segmentation.

use regex::Regex;
use std::sync::LazyLock;

static BLANK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("blank-run pattern is valid"));

/// Collapse runs of blank lines to a single newline and trim the ends.
pub fn normalize_reply(text: &str) -> String {
    BLANK_RUNS.replace_all(text, "\n").trim().to_string()
}

/// Greedily partition `text` into chunks of at most `limit` characters.
///
/// Character order and content are preserved; concatenating the segments
/// reconstitutes `text` exactly. Empty input yields no segments.
pub fn split_message(text: &str, limit: usize) -> Vec<String> {
    assert!(limit > 0, "segment limit must be positive");

    let mut segments = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for character in text.chars() {
        current.push(character);
        count += 1;
        if count == limit {
            segments.push(std::mem::take(&mut current));
            count = 0;
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}
