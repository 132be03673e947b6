//! URL Extractor: scans an Apache access log for puzzle image URLs.
//!
//! Every line is searched for the puzzle pattern (see [`pattern`]); the first
//! match is prefixed with the host to form the URL. The result is deduplicated
//! and sorted ascending by the 4-character key before `.jpg`. Equal keys are
//! ordered by the full URL so repeated runs print the same list.

mod error;
pub mod pattern;

pub use error::ExtractError;

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Host prefix used to turn a log fragment into a fetchable URL.
pub const DEFAULT_URL_PREFIX: &str = "http://code.google.com/";

/// A puzzle image URL and the key it sorts by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleUrl {
    url: String,
    sort_key: String,
}

impl PuzzleUrl {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn sort_key(&self) -> &str {
        &self.sort_key
    }
}

/// Ordered, deduplicated puzzle URLs. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlList {
    entries: Vec<PuzzleUrl>,
}

impl UrlList {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PuzzleUrl> {
        self.entries.iter()
    }

    /// The URL strings in order.
    pub fn urls(&self) -> Vec<&str> {
        self.entries.iter().map(PuzzleUrl::url).collect()
    }
}

impl<'a> IntoIterator for &'a UrlList {
    type Item = &'a PuzzleUrl;
    type IntoIter = std::slice::Iter<'a, PuzzleUrl>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Reads `path` and returns its puzzle URLs using [`DEFAULT_URL_PREFIX`].
pub fn read_urls(path: &Path) -> Result<UrlList, ExtractError> {
    read_urls_with_prefix(path, DEFAULT_URL_PREFIX)
}

/// Reads `path` fully (the handle is closed before scanning) and extracts URLs.
/// Invalid UTF-8 in the log is replaced, not rejected.
pub fn read_urls_with_prefix(path: &Path, prefix: &str) -> Result<UrlList, ExtractError> {
    let bytes = fs::read(path).map_err(|source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    let list = extract_from_str(&text, prefix)?;
    tracing::debug!(
        "extracted {} unique puzzle urls from {}",
        list.len(),
        path.display()
    );
    Ok(list)
}

/// Extracts, deduplicates and sorts puzzle URLs from log text.
pub fn extract_from_str(text: &str, prefix: &str) -> Result<UrlList, ExtractError> {
    // url -> sort key; the map doubles as the dedup set and the tie-break order.
    let mut unique: BTreeMap<String, String> = BTreeMap::new();

    for (idx, line) in text.lines().enumerate() {
        let Some(fragment) = pattern::find_fragment(line) else {
            continue;
        };
        let url = format!("{}{}", prefix, fragment);
        let key = pattern::sort_key(fragment).ok_or_else(|| ExtractError::MissingSortKey {
            url: url.clone(),
            line: idx + 1,
        })?;
        unique.entry(url).or_insert_with(|| key.to_string());
    }

    let mut entries: Vec<PuzzleUrl> = unique
        .into_iter()
        .map(|(url, sort_key)| PuzzleUrl { url, sort_key })
        .collect();
    // Stable: equal keys keep the map's URL order.
    entries.sort_by(|a, b| a.sort_key.cmp(&b.sort_key));

    Ok(UrlList { entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn log_line(path: &str) -> String {
        format!(
            "10.254.254.28 - - [06/Aug/2007:00:13:48 -0700] \"GET /{} HTTP/1.0\" 302 528 \"-\" \"Mozilla/5.0\"",
            path
        )
    }

    #[test]
    fn builds_url_from_prefix_and_fragment() {
        let list = extract_from_str(&log_line("edu/whatever/xyzaaab.jpg"), DEFAULT_URL_PREFIX)
            .unwrap();
        assert_eq!(list.urls(), vec!["http://code.google.com/edu/whatever/xyzaaab.jpg"]);
        assert_eq!(list.iter().next().unwrap().sort_key(), "aaab");
    }

    #[test]
    fn deduplicates_and_sorts_by_key() {
        let text = [
            log_line("edu/p/a-zzzz.jpg"),
            log_line("edu/p/b-aaaa.jpg"),
            "10.1.1.1 - - [x] \"GET /favicon.ico HTTP/1.0\" 200 1".to_string(),
            log_line("edu/p/a-zzzz.jpg"),
            log_line("edu/p/c-mmmm.jpg"),
        ]
        .join("\n");
        let list = extract_from_str(&text, DEFAULT_URL_PREFIX).unwrap();
        assert_eq!(
            list.urls(),
            vec![
                "http://code.google.com/edu/p/b-aaaa.jpg",
                "http://code.google.com/edu/p/c-mmmm.jpg",
                "http://code.google.com/edu/p/a-zzzz.jpg",
            ]
        );
    }

    #[test]
    fn sorts_by_key_not_full_url() {
        let text = [log_line("edu/a/x-bbbb.jpg"), log_line("edu/z/x-aaaa.jpg")].join("\n");
        let list = extract_from_str(&text, DEFAULT_URL_PREFIX).unwrap();
        let keys: Vec<&str> = list.iter().map(PuzzleUrl::sort_key).collect();
        assert_eq!(keys, vec!["aaaa", "bbbb"]);
    }

    #[test]
    fn equal_keys_are_ordered_by_url() {
        let text = [log_line("edu/b/x-aaaa.jpg"), log_line("edu/a/y-aaaa.jpg")].join("\n");
        let first = extract_from_str(&text, DEFAULT_URL_PREFIX).unwrap();
        let second = extract_from_str(&text, DEFAULT_URL_PREFIX).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first.urls(),
            vec![
                "http://code.google.com/edu/a/y-aaaa.jpg",
                "http://code.google.com/edu/b/x-aaaa.jpg",
            ]
        );
    }

    #[test]
    fn docstring_example_yields_nothing() {
        let list =
            extract_from_str(&log_line("~foo/puzzle-bar-aaab.jpg"), DEFAULT_URL_PREFIX).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn custom_prefix() {
        let list =
            extract_from_str(&log_line("edu/q/img-abcd.jpg"), "http://127.0.0.1:9/").unwrap();
        assert_eq!(list.urls(), vec!["http://127.0.0.1:9/edu/q/img-abcd.jpg"]);
    }

    #[test]
    fn missing_sort_key_is_an_error() {
        let text = [log_line("edu/p/a-aaaa.jpg"), log_line("edu/p/a-b.jpg")].join("\n");
        let err = extract_from_str(&text, DEFAULT_URL_PREFIX).unwrap_err();
        match err {
            ExtractError::MissingSortKey { url, line } => {
                assert_eq!(url, "http://code.google.com/edu/p/a-b.jpg");
                assert_eq!(line, 2);
            }
            other => panic!("expected MissingSortKey, got {:?}", other),
        }
    }

    #[test]
    fn read_urls_empty_file() {
        let f = tempfile::NamedTempFile::new().unwrap();
        let list = read_urls(f.path()).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn read_urls_from_file_with_invalid_utf8() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"\xff\xfe garbage\n").unwrap();
        f.write_all(log_line("edu/p/a-abcd.jpg").as_bytes()).unwrap();
        f.write_all(b"\n").unwrap();
        f.flush().unwrap();
        let list = read_urls(f.path()).unwrap();
        assert_eq!(list.urls(), vec!["http://code.google.com/edu/p/a-abcd.jpg"]);
    }

    #[test]
    fn read_urls_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.log");
        match read_urls(&path) {
            Err(ExtractError::Read { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected Read error, got {:?}", other),
        }
    }
}
