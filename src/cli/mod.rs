//! CLI interface for rollsketch
//!
//! Provides argument parsing, persistent settings, dictionary-file loading
//! and the non-interactive subcommands.

pub mod args;
pub mod commands;
pub mod config;
pub mod dict;

pub use args::{Cli, Commands, IndexArgs};
pub use config::{config_dir, PersistentConfig};
pub use dict::{load_index, load_words, parse_words};

use tracing_subscriber::EnvFilter;

/// Install a stderr `tracing` subscriber.
///
/// `RUST_LOG` wins when set. Otherwise only warnings are shown, or this
/// crate's debug events when `verbose` is set. Calling this twice is a no-op.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "warn,rollsketch=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
