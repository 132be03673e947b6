use logpuzzle_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; fall back to stderr if the state dir is unusable.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", err);
    }

    if std::env::args_os().len() <= 1 {
        print!("{}", Cli::usage());
        std::process::exit(1);
    }

    if let Err(err) = Cli::run_from_args() {
        eprintln!("logpuzzle error: {:#}", err);
        std::process::exit(1);
    }
}
