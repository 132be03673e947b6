//! No `--todir`: print one URL per line, in extractor order.

use anyhow::{Context, Result};
use logpuzzle_core::extract::{self, UrlList};
use std::io::{self, Write};
use std::path::Path;

pub fn run_print(logfile: &Path, url_prefix: &str) -> Result<()> {
    let urls = extract::read_urls_with_prefix(logfile, url_prefix)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_urls(&mut out, &urls).context("write URLs to stdout")?;
    Ok(())
}

pub fn write_urls<W: Write>(out: &mut W, urls: &UrlList) -> io::Result<()> {
    for u in urls {
        writeln!(out, "{}", u.url())?;
    }
    out.flush()
}
