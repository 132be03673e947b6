//! CLI command handlers: print mode and download mode.

mod download;
mod print;

pub use download::run_download;
pub use print::run_print;
#[cfg(test)]
pub use print::write_urls;
