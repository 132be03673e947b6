use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::download::DownloadOptions;
use crate::extract::DEFAULT_URL_PREFIX;
use crate::fetch::FetchOptions;

/// Global configuration loaded from `~/.config/logpuzzle/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleConfig {
    /// Host prefix prepended to every matched log fragment.
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,
    /// Number of images fetched at once. 1 means strictly sequential.
    #[serde(default = "default_jobs")]
    pub jobs: usize,
    /// Connect timeout in seconds (0 = no limit).
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Whole-transfer timeout in seconds (0 = no limit).
    #[serde(default)]
    pub transfer_timeout_secs: u64,
    /// Optional `User-Agent` sent with each GET.
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_url_prefix() -> String {
    DEFAULT_URL_PREFIX.to_string()
}

fn default_jobs() -> usize {
    1
}

fn default_connect_timeout_secs() -> u64 {
    30
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            url_prefix: default_url_prefix(),
            jobs: default_jobs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            transfer_timeout_secs: 0,
            user_agent: None,
        }
    }
}

fn secs(value: u64) -> Option<Duration> {
    (value > 0).then(|| Duration::from_secs(value))
}

impl PuzzleConfig {
    /// Per-request options for the fetcher.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            connect_timeout: secs(self.connect_timeout_secs),
            timeout: secs(self.transfer_timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }

    /// Downloader options; `jobs_override` (from the CLI) wins over the config value.
    pub fn download_options(&self, jobs_override: Option<usize>) -> DownloadOptions {
        DownloadOptions {
            jobs: jobs_override.unwrap_or(self.jobs).max(1),
            fetch: self.fetch_options(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("logpuzzle")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<PuzzleConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Same as [`load_or_init`] but at an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<PuzzleConfig> {
    if !path.exists() {
        return write_default(path);
    }
    read_config(path)
}

/// Like [`load_or_init`], but a config dir that cannot be created or written
/// only costs a warning and the built-in defaults. An existing file that
/// fails to read or parse is still an error.
pub fn load_or_default() -> Result<PuzzleConfig> {
    match config_path() {
        Ok(path) => load_or_default_at(&path),
        Err(e) => {
            tracing::warn!("no config dir, using defaults: {:#}", e);
            Ok(PuzzleConfig::default())
        }
    }
}

/// Same as [`load_or_default`] but at an explicit path.
pub fn load_or_default_at(path: &Path) -> Result<PuzzleConfig> {
    if path.exists() {
        return read_config(path);
    }
    Ok(write_default(path).unwrap_or_else(|e| {
        tracing::warn!("could not create default config, using defaults: {:#}", e);
        PuzzleConfig::default()
    }))
}

fn write_default(path: &Path) -> Result<PuzzleConfig> {
    let default_cfg = PuzzleConfig::default();
    let toml = toml::to_string_pretty(&default_cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory {}", parent.display()))?;
    }
    fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
    tracing::info!("created default config at {}", path.display());
    Ok(default_cfg)
}

fn read_config(path: &Path) -> Result<PuzzleConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: PuzzleConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
