//! Blocking HTTP GET of a single image into a local file.
//!
//! Uses the curl crate (libcurl). The body is streamed into `<dest>.part` and
//! renamed to `dest` only after a 2xx response, so a failed fetch never leaves
//! a truncated file under the final name.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Temporary file suffix used before the rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Per-request settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// None = libcurl default (no explicit limit).
    pub connect_timeout: Option<Duration>,
    /// None = no limit on the whole transfer.
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

/// Error returned by a single fetch. No variant is retried.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error (connection refused, timeout, bad URL, ...).
    #[error("GET {url}: {source}")]
    Curl {
        url: String,
        #[source]
        source: curl::Error,
    },
    /// Response had a non-2xx status.
    #[error("GET {url} returned HTTP {status}")]
    Http { url: String, status: u32 },
    /// Writing or renaming the local file failed.
    #[error("write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Path for the temp file: appends `.part` to the final path (e.g. `img0.jpg` → `img0.jpg.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Fetches `url` and stores the body at `dest`. Returns the number of bytes written.
///
/// Follows redirects. Runs in the current thread.
pub fn fetch_to_file(url: &str, dest: &Path, opts: &FetchOptions) -> Result<u64, FetchError> {
    let part = temp_path(dest);
    let result = transfer(url, &part, opts);
    match result {
        Ok(bytes) => {
            std::fs::rename(&part, dest).map_err(|source| FetchError::Io {
                path: dest.to_path_buf(),
                source,
            })?;
            tracing::debug!("fetched {} ({} bytes) -> {}", url, bytes, dest.display());
            Ok(bytes)
        }
        Err(e) => {
            let _ = std::fs::remove_file(&part);
            Err(e)
        }
    }
}

fn transfer(url: &str, part: &Path, opts: &FetchOptions) -> Result<u64, FetchError> {
    let curl_err = |source: curl::Error| FetchError::Curl {
        url: url.to_string(),
        source,
    };
    let io_err = |source: std::io::Error| FetchError::Io {
        path: part.to_path_buf(),
        source,
    };

    let mut file = File::create(part).map_err(io_err)?;
    let mut written = 0u64;
    let mut write_failure: Option<std::io::Error> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(curl_err)?;
    easy.get(true).map_err(curl_err)?;
    easy.follow_location(true).map_err(curl_err)?;
    if let Some(d) = opts.connect_timeout {
        easy.connect_timeout(d).map_err(curl_err)?;
    }
    if let Some(d) = opts.timeout {
        easy.timeout(d).map_err(curl_err)?;
    }
    if let Some(ua) = &opts.user_agent {
        easy.useragent(ua).map_err(curl_err)?;
    }

    let performed = {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| match file.write_all(data) {
                Ok(()) => {
                    written += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    write_failure = Some(e);
                    // Short count makes curl abort the transfer.
                    Ok(0)
                }
            })
            .map_err(curl_err)?;
        transfer.perform()
    };

    if let Some(e) = write_failure {
        return Err(io_err(e));
    }
    performed.map_err(curl_err)?;

    let status = easy.response_code().map_err(curl_err)?;
    if !(200..300).contains(&status) {
        return Err(FetchError::Http {
            url: url.to_string(),
            status,
        });
    }

    file.flush().map_err(io_err)?;
    Ok(written)
}
