//! `--todir DIR`: download every image into DIR and write index.html. Prints nothing.

use anyhow::Result;
use logpuzzle_core::download::{self, DownloadOptions};
use logpuzzle_core::extract;
use std::path::Path;

pub fn run_download(
    logfile: &Path,
    url_prefix: &str,
    dest_dir: &Path,
    opts: &DownloadOptions,
) -> Result<()> {
    let urls = extract::read_urls_with_prefix(logfile, url_prefix)?;
    let report = download::download_images(&urls, dest_dir, opts)?;
    tracing::info!(
        "{} images from {} saved under {}",
        report.images.len(),
        logfile.display(),
        report.dest_dir.display()
    );
    Ok(())
}
