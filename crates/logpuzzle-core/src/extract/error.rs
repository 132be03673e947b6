//! Errors raised while turning a log file into a URL list.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The log file could not be opened or read.
    #[error("cannot read log file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A fragment matched the puzzle pattern but has no sort key.
    #[error("line {line}: puzzle URL {url} has no 4-character sort key before .jpg")]
    MissingSortKey { url: String, line: usize },
}
