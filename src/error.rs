//! Error types for index construction.
//!
//! Data operations (sketching, enumeration, insertion, lookup) are total and
//! never fail. Only configuration mistakes detected while constructing an
//! index are reported, and they are reported eagerly.

use thiserror::Error;

/// Errors raised while validating an index configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The alphabet has no symbols.
    ///
    /// Out-of-alphabet characters map to the last slot of the table, so an
    /// empty table leaves nothing to map to.
    #[error("Alphabet is empty")]
    EmptyAlphabet,

    /// The same symbol appears twice in the alphabet (after lower-casing).
    #[error("Alphabet symbol '{0}' appears more than once")]
    DuplicateSymbol(char),

    /// An alphabet symbol lower-cases to more than one character.
    ///
    /// Lookups could never map to such a symbol.
    #[error("Alphabet symbol '{0}' has no single-character lower-case form")]
    UnfoldableSymbol(char),

    /// The edit radius exceeds the practical enumeration ceiling.
    ///
    /// Both enumerators are exponential in the radius.
    #[error("Edit radius {radius} exceeds the maximum of {max}")]
    RadiusTooLarge {
        /// Requested radius
        radius: usize,
        /// Largest accepted radius
        max: usize,
    },

    /// The maximum bit-run length is outside `1..=64`.
    #[error("Maximum bit-run length must be between 1 and 64, got {0}")]
    InvalidMaxRun(u32),

    /// The bit-run neighborhood is larger than one lookup may enumerate.
    #[error(
        "Edit radius {radius} with bit-runs up to {max_run} gives {variants} sketch variants, over the budget of {budget}"
    )]
    TooManyVariants {
        /// Requested radius
        radius: usize,
        /// Requested maximum run length
        max_run: u32,
        /// Variants one bit-run lookup would visit
        variants: u64,
        /// Largest accepted variant count
        budget: u64,
    },
}

/// A specialized `Result` type for index configuration.
pub type Result<T> = std::result::Result<T, ConfigError>;
