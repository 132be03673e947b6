//! What counts as a puzzle URL, and how its sort key is taken.
//!
//! Both regexes live here and the key is always read from the fragment the
//! puzzle pattern matched, never from a rescan of the full URL.

use regex::Regex;
use std::sync::OnceLock;

/// A fixed-domain path segment ending in `.jpg`, greedy over non-whitespace.
const PUZZLE_PATTERN: &str = r"edu\S+\.jpg";

/// Four word characters immediately preceding `.jpg`.
const SORT_KEY_PATTERN: &str = r"edu\S+(\w{4})\.jpg";

fn puzzle_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PUZZLE_PATTERN).expect("valid regex"))
}

fn sort_key_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SORT_KEY_PATTERN).expect("valid regex"))
}

/// Returns the first puzzle fragment in `line`, if any.
pub fn find_fragment(line: &str) -> Option<&str> {
    puzzle_re().find(line).map(|m| m.as_str())
}

/// Sort key of a matched fragment, or None when the fragment is too short to carry one.
pub fn sort_key(fragment: &str) -> Option<&str> {
    sort_key_re()
        .captures(fragment)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
