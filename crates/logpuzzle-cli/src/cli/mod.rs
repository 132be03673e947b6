//! CLI for logpuzzle.

mod commands;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use logpuzzle_core::config;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use commands::{run_download, run_print};

/// Find puzzle image URLs in an Apache access log and optionally download them.
#[derive(Debug, Parser)]
#[command(name = "logpuzzle")]
#[command(about = "Extract puzzle image URLs from an Apache log and fetch the images", long_about = None)]
pub struct Cli {
    /// Destination directory for downloaded images; if absent or empty, URLs are printed.
    #[arg(short = 'd', long = "todir", value_name = "DIR")]
    pub todir: Option<OsString>,

    /// Fetch up to N images at once (overrides `jobs` in config.toml).
    #[arg(short = 'j', long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Apache logfile to extract URLs from.
    pub logfile: PathBuf,
}

impl Cli {
    /// Short usage line, as printed when no arguments are given.
    pub fn usage() -> String {
        format!("{}\n", Self::command().render_usage())
    }

    /// Download destination; an empty `--todir ""` means print mode.
    pub fn dest_dir(&self) -> Option<&Path> {
        self.todir
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(Path::new)
    }

    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.dest_dir() {
            Some(dir) => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let opts = cfg.download_options(cli.jobs);
                run_download(&cli.logfile, &cfg.url_prefix, dir, &opts)?;
            }
            None => {
                // Listing URLs must not depend on a writable config dir.
                let cfg = config::load_or_default()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_print(&cli.logfile, &cfg.url_prefix)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
