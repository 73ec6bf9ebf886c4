//! CLI argument definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::index::LookupMode;

/// Top-level command line: global options plus one subcommand
#[derive(Parser)]
#[command(name = "rollsketch")]
#[command(about = "Fuzzy string lookup over forward/reverse rolling-hash sketches")]
#[command(version)]
pub struct Cli {
    /// Custom configuration file path
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Log lookups and index builds to stderr (overridden by RUST_LOG)
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Index parameters shared by every subcommand that builds an index
#[derive(clap::Args, Debug, Clone, Default)]
pub struct IndexArgs {
    /// Maximum edit distance (0 to 3)
    #[arg(short = 'k', long)]
    pub radius: Option<usize>,

    /// Longest bit-run flipped by bit-run lookups (1 to 64)
    #[arg(long)]
    pub max_run: Option<u32>,

    /// Alphabet symbols, in value order
    #[arg(short, long)]
    pub alphabet: Option<String>,
}

/// Subcommands of the `rollsketch` binary
#[derive(Subcommand)]
pub enum Commands {
    /// Launch interactive REPL
    Repl {
        /// Dictionary file to load (one word per line)
        #[arg(short, long)]
        dict: Option<PathBuf>,

        /// Index parameters overriding saved settings
        #[command(flatten)]
        index: IndexArgs,

        /// Lookup used for bare queries
        #[arg(short, long)]
        mode: Option<LookupMode>,
    },

    /// Look up fuzzy matches for a term
    Query {
        /// Query term
        term: String,

        /// Dictionary file (one word per line)
        #[arg(short, long)]
        dict: Option<PathBuf>,

        /// Index parameters overriding saved settings
        #[command(flatten)]
        index: IndexArgs,

        /// Lookup strategy
        #[arg(short, long)]
        mode: Option<LookupMode>,

        /// Drop matches whose edit distance exceeds the radius
        #[arg(long)]
        verify: bool,
    },

    /// Run both lookups and show where they disagree
    Compare {
        /// Query term
        term: String,

        /// Dictionary file (one word per line)
        #[arg(short, long)]
        dict: Option<PathBuf>,

        /// Index parameters overriding saved settings
        #[command(flatten)]
        index: IndexArgs,
    },

    /// Print the forward and reverse sketch of each word
    Sketch {
        /// Words to sketch
        #[arg(required = true)]
        words: Vec<String>,

        /// Alphabet symbols, in value order
        #[arg(short, long)]
        alphabet: Option<String>,
    },

    /// Display index statistics for a dictionary
    Stats {
        /// Dictionary file (one word per line)
        #[arg(short, long)]
        dict: Option<PathBuf>,

        /// Alphabet symbols, in value order
        #[arg(short, long)]
        alphabet: Option<String>,
    },

    /// Show or update user settings
    Settings {
        /// Set default dictionary path
        #[arg(long)]
        set_dict: Option<PathBuf>,

        /// Set default edit radius
        #[arg(long)]
        set_radius: Option<usize>,

        /// Set default maximum bit-run length
        #[arg(long)]
        set_max_run: Option<u32>,

        /// Set default lookup mode
        #[arg(long)]
        set_mode: Option<LookupMode>,

        /// Set default alphabet
        #[arg(long)]
        set_alphabet: Option<String>,

        /// Reset configuration to defaults
        #[arg(long)]
        reset: bool,
    },
}
