//! # rollsketch
//!
//! Fuzzy string lookup over forward/reverse rolling-hash sketches.
//!
//! Every dictionary word is reduced to a pair of 64-bit polynomial
//! fingerprints, one weighting characters left to right and one right to
//! left. Words are bucketed by that pair. A fuzzy lookup never compares
//! strings: it produces the sketches of everything within the edit radius
//! of the query and probes the buckets.
//!
//! Two neighborhood strategies are provided:
//!
//! - [`SketchIndex::lookup`](index::SketchIndex::lookup) enumerates every
//!   string within Levenshtein distance `k` (insert, delete, substitute) and
//!   sketches each one. Recall is complete up to sketch collisions.
//! - [`SketchIndex::lookup_bit_run`](index::SketchIndex::lookup_bit_run)
//!   flips up to `k` contiguous bit-runs of the query's sketch directly.
//!   Cheaper per candidate, but only a heuristic.
//!
//! ## Example
//!
//! ```rust
//! use rollsketch::prelude::*;
//!
//! let index = SketchIndex::with_radius(1)?.build(["hello", "world", "help", "held"]);
//!
//! for word in index.lookup("helo") {
//!     println!("Match: {}", word);
//! }
//!
//! assert!(index.contains("world"));
//! assert_eq!(sketch(""), Sketch::new(0, 0));
//! # Ok::<(), rollsketch::error::ConfigError>(())
//! ```
//!
//! ## Logging
//!
//! The library emits [`tracing`] events (`debug` for builds and lookups,
//! `trace` for table growth) and installs no subscriber.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod alphabet;
pub mod distance;
pub mod edits;
pub mod error;
pub mod index;
pub mod sketch;
pub mod variants;

/// Interactive REPL for exploring sketch indexes
#[cfg(feature = "cli")]
pub mod repl;

/// CLI interface and utilities
#[cfg(feature = "cli")]
pub mod cli;

/// Common imports for convenient usage
pub mod prelude {
    pub use crate::alphabet::Alphabet;
    pub use crate::distance::{standard_distance, transposition_distance};
    pub use crate::edits::{edits_within, single_edits};
    pub use crate::error::ConfigError;
    pub use crate::index::{
        IndexBuilder, IndexConfig, IndexStats, LookupComparison, LookupMode, SketchIndex,
    };
    pub use crate::sketch::{append_char, sketch, RollingSketch, Sketch, Sketcher};
    pub use crate::variants::{bit_run_variants, run_masks};
}
