//! Image Downloader: fetches every puzzle URL into a directory and writes the index.
//!
//! Files are named `img0.jpg`, `img1.jpg`, ... in URL-list order. All paths are
//! joined onto the (canonicalized) destination; the process working directory
//! is never touched. The first failed fetch aborts the run: files already
//! fetched stay on disk and no index is written.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;

use crate::extract::UrlList;
use crate::fetch::{fetch_to_file, FetchOptions};
use crate::index::write_index;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOptions {
    /// Maximum fetches in flight. 1 = strictly sequential.
    pub jobs: usize,
    pub fetch: FetchOptions,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            jobs: 1,
            fetch: FetchOptions::default(),
        }
    }
}

/// What a successful run left on disk.
#[derive(Debug, Clone)]
pub struct DownloadReport {
    /// Absolute destination directory.
    pub dest_dir: PathBuf,
    pub index_path: PathBuf,
    /// Absolute image paths, in URL-list order.
    pub images: Vec<PathBuf>,
    pub total_bytes: u64,
}

/// Local name of the `position`-th image.
pub fn image_filename(position: usize) -> String {
    format!("img{}.jpg", position)
}

/// Downloads all `urls` into `dest_dir` (created with parents if missing) and writes `index.html`.
pub fn download_images(
    urls: &UrlList,
    dest_dir: &Path,
    opts: &DownloadOptions,
) -> Result<DownloadReport> {
    fs::create_dir_all(dest_dir)
        .with_context(|| format!("create destination directory {}", dest_dir.display()))?;
    let dest_dir = dest_dir
        .canonicalize()
        .with_context(|| format!("resolve {}", dest_dir.display()))?;

    let targets: Vec<(&str, PathBuf)> = urls
        .iter()
        .enumerate()
        .map(|(i, u)| (u.url(), dest_dir.join(image_filename(i))))
        .collect();

    tracing::info!(
        "downloading {} images into {} (jobs={})",
        targets.len(),
        dest_dir.display(),
        opts.jobs
    );

    let total_bytes = if opts.jobs <= 1 {
        fetch_sequential(&targets, &opts.fetch)?
    } else {
        fetch_batched(&targets, opts.jobs, &opts.fetch)?
    };

    let images: Vec<PathBuf> = targets.into_iter().map(|(_, p)| p).collect();
    let index_path = write_index(&dest_dir, &images)?;
    tracing::info!(
        "wrote {} ({} images, {} bytes)",
        index_path.display(),
        images.len(),
        total_bytes
    );

    Ok(DownloadReport {
        dest_dir,
        index_path,
        images,
        total_bytes,
    })
}

fn fetch_sequential(targets: &[(&str, PathBuf)], fetch: &FetchOptions) -> Result<u64> {
    let mut total = 0u64;
    for (i, (url, path)) in targets.iter().enumerate() {
        total += fetch_to_file(url, path, fetch).with_context(|| format!("image {}", i))?;
    }
    Ok(total)
}

/// Runs at most `jobs` fetches at a time. Results are checked in list order
/// once a batch has joined, so the reported error is the earliest failed image.
fn fetch_batched(targets: &[(&str, PathBuf)], jobs: usize, fetch: &FetchOptions) -> Result<u64> {
    let mut total = 0u64;
    for (batch_no, batch) in targets.chunks(jobs).enumerate() {
        let base = batch_no * jobs;
        let results: Vec<Result<u64>> = thread::scope(|s| {
            let handles: Vec<_> = batch
                .iter()
                .map(|(url, path)| s.spawn(move || fetch_to_file(url, path, fetch)))
                .collect();
            handles
                .into_iter()
                .map(|h| match h.join() {
                    Ok(res) => res.map_err(anyhow::Error::from),
                    Err(e) => Err(anyhow::anyhow!("fetch thread panicked: {:?}", e)),
                })
                .collect()
        });
        for (offset, res) in results.into_iter().enumerate() {
            total += res.with_context(|| format!("image {}", base + offset))?;
        }
    }
    Ok(total)
}
