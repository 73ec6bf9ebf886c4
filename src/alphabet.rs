//! Symbol mapping from characters to bounded integer values.
//!
//! An [`Alphabet`] is an ordered set of lower-case symbols. Each input
//! character is lower-cased and mapped to its position in the set. Characters
//! outside the set all map to the last slot (`Σ − 1`).
//!
//! That fallback is lossy: every out-of-alphabet character is
//! indistinguishable from the last alphabet symbol (and from each other) as
//! far as the sketch is concerned. With the default alphabet, `"hello123"`
//! and `"hellozzz"` hash identically. This is a known approximation of the
//! index, not an error condition.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::error::{ConfigError, Result};

/// Symbols of the default alphabet.
pub const DEFAULT_SYMBOLS: &str = "abcdefghijklmnopqrstuvwxyz";

/// Ordered, duplicate-free symbol table.
///
/// Cheap to clone; the table is shared behind an `Arc`.
#[derive(Clone)]
pub struct Alphabet {
    symbols: Arc<[char]>,
    ascii: [u32; 128],
    other: Arc<FxHashMap<char, u32>>,
}

const UNMAPPED: u32 = u32::MAX;

impl Alphabet {
    /// Build an alphabet from an ordered sequence of symbols.
    ///
    /// Symbols are lower-cased. Returns an error if the result is empty,
    /// contains duplicates, or holds a symbol whose lower-case form is more
    /// than one character.
    pub fn new<I>(symbols: I) -> Result<Self>
    where
        I: IntoIterator<Item = char>,
    {
        let mut ordered = Vec::new();
        let mut ascii = [UNMAPPED; 128];
        let mut other = FxHashMap::default();

        for symbol in symbols {
            let symbol = fold_case(symbol).ok_or(ConfigError::UnfoldableSymbol(symbol))?;
            let value = ordered.len() as u32;
            let fresh = if symbol.is_ascii() {
                let slot = &mut ascii[symbol as usize];
                let fresh = *slot == UNMAPPED;
                if fresh {
                    *slot = value;
                }
                fresh
            } else {
                other.insert(symbol, value).is_none()
            };
            if !fresh {
                return Err(ConfigError::DuplicateSymbol(symbol));
            }
            ordered.push(symbol);
        }

        if ordered.is_empty() {
            return Err(ConfigError::EmptyAlphabet);
        }

        Ok(Self {
            symbols: ordered.into(),
            ascii,
            other: Arc::new(other),
        })
    }

    /// Build an alphabet from the characters of a string.
    pub fn from_symbols(symbols: &str) -> Result<Self> {
        Self::new(symbols.chars())
    }

    /// Number of symbols (Σ).
    #[inline]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Always `false`; construction rejects empty alphabets.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in table order.
    #[inline]
    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    /// Map a character to its symbol value in `[0, Σ)`.
    ///
    /// The character is lower-cased first. Characters that are not in the
    /// table, including characters whose lower-case form is more than one
    /// character long, map to `Σ − 1`.
    #[inline]
    pub fn value(&self, ch: char) -> u32 {
        let fallback = self.symbols.len() as u32 - 1;
        if ch.is_ascii() {
            let v = self.ascii[ch.to_ascii_lowercase() as usize];
            return if v == UNMAPPED { fallback } else { v };
        }
        match fold_case(ch) {
            Some(lower) if lower.is_ascii() => {
                let v = self.ascii[lower as usize];
                if v == UNMAPPED {
                    fallback
                } else {
                    v
                }
            }
            Some(lower) => self.other.get(&lower).copied().unwrap_or(fallback),
            None => fallback,
        }
    }

    /// Whether the lower-cased character has its own slot in the table.
    pub fn contains(&self, ch: char) -> bool {
        match fold_case(ch) {
            Some(lower) if lower.is_ascii() => self.ascii[lower as usize] != UNMAPPED,
            Some(lower) => self.other.contains_key(&lower),
            None => false,
        }
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        let mut ascii = [UNMAPPED; 128];
        for (i, b) in DEFAULT_SYMBOLS.bytes().enumerate() {
            ascii[b as usize] = i as u32;
        }
        Self {
            symbols: DEFAULT_SYMBOLS.chars().collect::<Vec<_>>().into(),
            ascii,
            other: Arc::new(FxHashMap::default()),
        }
    }
}

impl PartialEq for Alphabet {
    fn eq(&self, other: &Self) -> bool {
        self.symbols == other.symbols
    }
}

impl Eq for Alphabet {}

impl fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Alphabet").field(&self.to_string()).finish()
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.symbols.iter() {
            fmt::Write::write_char(f, *ch)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Alphabet {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_symbols(s)
    }
}

#[cfg(feature = "serialization")]
impl serde::Serialize for Alphabet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serialization")]
impl<'de> serde::Deserialize<'de> for Alphabet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let symbols = <String as serde::Deserialize>::deserialize(deserializer)?;
        Self::from_symbols(&symbols).map_err(serde::de::Error::custom)
    }
}

/// Single-character lower-case form, or `None` if lower-casing expands.
#[inline]
fn fold_case(ch: char) -> Option<char> {
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
