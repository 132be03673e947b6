//! `index.html` generation for a download directory.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::fetch::temp_path;

pub const INDEX_FILENAME: &str = "index.html";

const PAGE_START: &str = "<html><body>";
const PAGE_END: &str = "</body></html>";

/// One `<img>` per path, in order, with no whitespace between tags.
pub fn render_index<P: AsRef<Path>>(images: &[P]) -> String {
    let mut page = String::from(PAGE_START);
    for img in images {
        page.push_str(&format!("<img src=\"{}\">", img.as_ref().display()));
    }
    page.push_str(PAGE_END);
    page
}

/// Writes `index.html` into `dir` (temp file + rename) and returns its path.
pub fn write_index<P: AsRef<Path>>(dir: &Path, images: &[P]) -> Result<PathBuf> {
    let path = dir.join(INDEX_FILENAME);
    let tmp = temp_path(&path);
    fs::write(&tmp, render_index(images)).with_context(|| format!("write {}", tmp.display()))?;
    fs::rename(&tmp, &path).with_context(|| format!("rename to {}", path.display()))?;
    Ok(path)
}
