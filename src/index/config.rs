//! Index configuration and builder.

use crate::alphabet::Alphabet;
use crate::error::{ConfigError, Result};
use crate::index::SketchIndex;
use crate::variants::{variant_count, DEFAULT_MAX_RUN};

/// Largest accepted edit radius.
///
/// The exact enumerator produces `O((n·Σ)^k)` strings and the bit-run
/// enumerator `O(|masks|^k)` sketches; beyond 3 neither finishes in
/// reasonable time.
pub const MAX_EDIT_RADIUS: usize = 3;

/// Most sketch variants a single bit-run lookup may visit.
///
/// Admits radius 3 at the default run length (about 6.7e7 variants) and
/// radius 2 at any run length.
pub const MAX_BIT_RUN_VARIANTS: u64 = 100_000_000;

/// Default edit radius.
pub const DEFAULT_EDIT_RADIUS: usize = 1;

/// Parameters fixed at index construction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(feature = "serialization", serde(default))]
pub struct IndexConfig {
    /// Maximum Levenshtein distance for fuzzy lookups (`k`).
    pub edit_radius: usize,
    /// Symbol table used for hashing and for generating edits.
    pub alphabet: Alphabet,
    /// Longest contiguous bit-run flipped by the bit-run lookup.
    pub max_run: u32,
}

impl IndexConfig {
    /// Default configuration with a different radius.
    pub fn with_radius(edit_radius: usize) -> Self {
        Self {
            edit_radius,
            ..Self::default()
        }
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::RadiusTooLarge`] if `edit_radius > MAX_EDIT_RADIUS`
    /// - [`ConfigError::InvalidMaxRun`] if `max_run` is not in `1..=64`
    /// - [`ConfigError::TooManyVariants`] if the bit-run neighborhood holds
    ///   more than [`MAX_BIT_RUN_VARIANTS`] sketches
    pub fn validate(&self) -> Result<()> {
        if self.edit_radius > MAX_EDIT_RADIUS {
            return Err(ConfigError::RadiusTooLarge {
                radius: self.edit_radius,
                max: MAX_EDIT_RADIUS,
            });
        }
        if !(1..=64).contains(&self.max_run) {
            return Err(ConfigError::InvalidMaxRun(self.max_run));
        }
        let variants = variant_count(self.edit_radius, self.max_run);
        if variants > MAX_BIT_RUN_VARIANTS {
            return Err(ConfigError::TooManyVariants {
                radius: self.edit_radius,
                max_run: self.max_run,
                variants,
                budget: MAX_BIT_RUN_VARIANTS,
            });
        }
        Ok(())
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            edit_radius: DEFAULT_EDIT_RADIUS,
            alphabet: Alphabet::default(),
            max_run: DEFAULT_MAX_RUN,
        }
    }
}

/// Fluent construction of a [`SketchIndex`].
///
/// # Example
///
/// ```rust
/// use rollsketch::prelude::*;
///
/// let index = IndexBuilder::new()
///     .edit_radius(1)
///     .symbols("abcdefghijklmnopqrstuvwxyz")
///     .max_run(4)
///     .build()?
///     .build(["hello", "help"]);
///
/// assert!(index.lookup("helo").contains("hello"));
/// # Ok::<(), rollsketch::error::ConfigError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct IndexBuilder {
    edit_radius: Option<usize>,
    alphabet: Option<Alphabet>,
    symbols: Option<String>,
    max_run: Option<u32>,
}

impl IndexBuilder {
    /// Create a builder with every setting at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the edit radius.
    pub fn edit_radius(mut self, edit_radius: usize) -> Self {
        self.edit_radius = Some(edit_radius);
        self
    }

    /// Use an already validated alphabet.
    pub fn alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = Some(alphabet);
        self.symbols = None;
        self
    }

    /// Use the characters of `symbols` as the alphabet. Validated by
    /// [`build`](Self::build).
    pub fn symbols(mut self, symbols: impl Into<String>) -> Self {
        self.symbols = Some(symbols.into());
        self.alphabet = None;
        self
    }

    /// Set the maximum bit-run length.
    pub fn max_run(mut self, max_run: u32) -> Self {
        self.max_run = Some(max_run);
        self
    }

    /// Resolve the configuration without building an index.
    pub fn config(self) -> Result<IndexConfig> {
        let defaults = IndexConfig::default();
        let alphabet = match (self.alphabet, self.symbols) {
            (Some(alphabet), _) => alphabet,
            (None, Some(symbols)) => Alphabet::from_symbols(&symbols)?,
            (None, None) => defaults.alphabet,
        };
        let config = IndexConfig {
            edit_radius: self.edit_radius.unwrap_or(defaults.edit_radius),
            alphabet,
            max_run: self.max_run.unwrap_or(defaults.max_run),
        };
        config.validate()?;
        Ok(config)
    }

    /// Build an empty index.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] from alphabet parsing or validation.
    pub fn build(self) -> Result<SketchIndex> {
        SketchIndex::new(self.config()?)
    }
}
