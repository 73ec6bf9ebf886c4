//! Forward/reverse rolling-hash sketches.
//!
//! A [`Sketch`] is a pair of 64-bit polynomial fingerprints of a string,
//! computed modulo the prime `P = 2^64 - 59`:
//!
//! ```text
//! F(w) = Σ (v_i + 1) · B^i          (mod P)
//! R(w) = Σ (v_i + 1) · B^(n-1-i)    (mod P)
//! ```
//!
//! where `v_i` is the [`Alphabet`] value of the `i`-th character and the base
//! `B` is `Σ + 2`. `R` is `F` of the reversed string. The `+1` bias keeps
//! leading zero-valued symbols visible to `F`.
//!
//! Appending one character is O(1) given the current length, see
//! [`Sketcher::append`] and [`RollingSketch`].
//!
//! Sketch equality is the only notion of identity used by the index.
//! Distinct strings can share a sketch; nothing downstream verifies string
//! equality after a sketch match.

pub mod powers;

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::alphabet::Alphabet;
use powers::PowerTable;

/// Hash modulus: the largest prime below `2^64`.
pub const MODULUS: u64 = 0xFFFF_FFFF_FFFF_FFC5;

/// `a · b mod P`.
#[inline(always)]
pub(crate) fn mul_mod(a: u64, b: u64) -> u64 {
    ((a as u128 * b as u128) % MODULUS as u128) as u64
}

/// `a + b mod P` for `a, b < P`.
#[inline(always)]
pub(crate) fn add_mod(a: u64, b: u64) -> u64 {
    let (sum, overflow) = a.overflowing_add(b);
    if overflow || sum >= MODULUS {
        sum.wrapping_sub(MODULUS)
    } else {
        sum
    }
}

/// Forward/reverse fingerprint pair of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Sketch {
    /// Forward-weighted fingerprint (`F`)
    pub forward: u64,
    /// Reverse-weighted fingerprint (`R`)
    pub reverse: u64,
}

impl Sketch {
    /// Sketch of the empty string.
    pub const EMPTY: Sketch = Sketch {
        forward: 0,
        reverse: 0,
    };

    /// Create a sketch from its two limbs.
    #[inline]
    pub const fn new(forward: u64, reverse: u64) -> Self {
        Self { forward, reverse }
    }

    /// XOR masks into each limb.
    #[inline]
    pub const fn flip(self, forward_mask: u64, reverse_mask: u64) -> Self {
        Self {
            forward: self.forward ^ forward_mask,
            reverse: self.reverse ^ reverse_mask,
        }
    }
}

impl From<(u64, u64)> for Sketch {
    fn from((forward, reverse): (u64, u64)) -> Self {
        Self { forward, reverse }
    }
}

impl From<Sketch> for (u64, u64) {
    fn from(sketch: Sketch) -> Self {
        (sketch.forward, sketch.reverse)
    }
}

impl fmt::Display for Sketch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:#018x}, {:#018x})", self.forward, self.reverse)
    }
}

/// Computes sketches over one alphabet.
///
/// Holds the alphabet and a handle to the process-wide power table for its
/// base. Cloning is cheap.
#[derive(Clone)]
pub struct Sketcher {
    alphabet: Alphabet,
    base: u64,
    powers: Arc<PowerTable>,
}

impl Sketcher {
    /// Create a sketcher for `alphabet`, with base `Σ + 2`.
    pub fn new(alphabet: Alphabet) -> Self {
        let base = alphabet.len() as u64 + 2;
        Self {
            alphabet,
            base,
            powers: PowerTable::shared(base),
        }
    }

    /// The alphabet used for symbol values.
    #[inline]
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The polynomial base.
    #[inline]
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Biased symbol value `v(c) + 1` of a character.
    #[inline]
    pub fn weight(&self, ch: char) -> u64 {
        self.alphabet.value(ch) as u64 + 1
    }

    /// Sketch of `word`.
    ///
    /// Length is measured in characters. The empty string maps to
    /// [`Sketch::EMPTY`].
    pub fn sketch(&self, word: &str) -> Sketch {
        let n = word.chars().count();
        if n == 0 {
            return Sketch::EMPTY;
        }
        self.powers.with_prefix(n, |powers| {
            let mut forward = 0u64;
            let mut reverse = 0u64;
            for (ch, &power) in word.chars().zip(powers) {
                let v = self.weight(ch);
                forward = add_mod(forward, mul_mod(v, power));
                // Horner form of Σ v_i · B^(n-1-i)
                reverse = add_mod(mul_mod(reverse, self.base), v);
            }
            Sketch { forward, reverse }
        })
    }

    /// Sketch of `w + ch` given `sketch = sketch(w)` and `len = |w|` in
    /// characters.
    ///
    /// `len` is trusted. Passing a length that does not match the sketched
    /// string yields a wrong sketch without any error.
    #[inline]
    pub fn append(&self, sketch: Sketch, len: usize, ch: char) -> Sketch {
        let v = self.weight(ch);
        Sketch {
            forward: add_mod(sketch.forward, mul_mod(v, self.powers.get(len))),
            reverse: add_mod(mul_mod(sketch.reverse, self.base), v),
        }
    }

    /// Start an incremental sketch of the empty string.
    pub fn rolling(&self) -> RollingSketch<'_> {
        RollingSketch {
            sketcher: self,
            sketch: Sketch::EMPTY,
            len: 0,
        }
    }
}

impl Default for Sketcher {
    fn default() -> Self {
        Self::new(Alphabet::default())
    }
}

impl fmt::Debug for Sketcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sketcher")
            .field("alphabet", &self.alphabet)
            .field("base", &self.base)
            .finish()
    }
}

fn default_sketcher() -> &'static Sketcher {
    static DEFAULT: OnceLock<Sketcher> = OnceLock::new();
    DEFAULT.get_or_init(Sketcher::default)
}

/// Sketch of `word` over the default `a..=z` alphabet.
pub fn sketch(word: &str) -> Sketch {
    default_sketcher().sketch(word)
}

/// Append `ch` to a sketch over the default alphabet.
///
/// See [`Sketcher::append`] for the length contract.
pub fn append_char(sketch: Sketch, len: usize, ch: char) -> Sketch {
    default_sketcher().append(sketch, len, ch)
}

/// Running sketch that tracks its own length.
///
/// Useful for search-as-you-type, where each keystroke extends the query by
/// one character.
#[derive(Clone, Copy)]
pub struct RollingSketch<'a> {
    sketcher: &'a Sketcher,
    sketch: Sketch,
    len: usize,
}

impl<'a> RollingSketch<'a> {
    /// Append one character.
    pub fn push(&mut self, ch: char) {
        self.sketch = self.sketcher.append(self.sketch, self.len, ch);
        self.len += 1;
    }

    /// Sketch of everything pushed so far.
    #[inline]
    pub fn sketch(&self) -> Sketch {
        self.sketch
    }

    /// Number of characters pushed so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been pushed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Back to the empty string.
    pub fn reset(&mut self) {
        self.sketch = Sketch::EMPTY;
        self.len = 0;
    }
}

impl Extend<char> for RollingSketch<'_> {
    fn extend<T: IntoIterator<Item = char>>(&mut self, iter: T) {
        for ch in iter {
            self.push(ch);
        }
    }
}

impl fmt::Debug for RollingSketch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RollingSketch")
            .field("sketch", &self.sketch)
            .field("len", &self.len)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_sketch(word: &str) -> Sketch {
        let alphabet = Alphabet::default();
        let chars: Vec<char> = word.chars().collect();
        let n = chars.len();
        let mut f = 0u128;
        let mut r = 0u128;
        let p = MODULUS as u128;
        let pow = |e: usize| {
            let mut acc = 1u128;
            for _ in 0..e {
                acc = acc * 28 % p;
            }
            acc
        };
        for (i, ch) in chars.iter().enumerate() {
            let v = alphabet.value(*ch) as u128 + 1;
            f = (f + v * pow(i)) % p;
            r = (r + v * pow(n - 1 - i)) % p;
        }
        Sketch::new(f as u64, r as u64)
    }

    #[test]
    fn test_empty_string() {
        assert_eq!(sketch(""), Sketch::EMPTY);
        assert_eq!(sketch(""), Sketch::new(0, 0));
    }

    #[test]
    fn test_single_character() {
        // 'a' has value 0, weight 1.
        assert_eq!(sketch("a"), Sketch::new(1, 1));
        assert_eq!(sketch("c"), Sketch::new(3, 3));
    }

    #[test]
    fn test_two_characters() {
        // "ab": weights 1, 2. F = 1 + 2*28, R = 1*28 + 2.
        assert_eq!(sketch("ab"), Sketch::new(57, 30));
        assert_eq!(sketch("ba"), Sketch::new(30, 57));
    }

    #[test]
    fn test_leading_a_is_visible() {
        assert_ne!(sketch("ab"), sketch("b"));
        assert_ne!(sketch("aab"), sketch("ab"));
    }

    #[test]
    fn test_reverse_is_forward_of_reversed_string() {
        for word in ["hello", "world", "abcdefghijklmnopqrstuvwxyz", "x"] {
            let reversed: String = word.chars().rev().collect();
            assert_eq!(sketch(word).reverse, sketch(&reversed).forward);
        }
    }

    #[test]
    fn test_matches_naive_for_long_words() {
        for word in ["hello", "pneumonoultramicroscopicsilicovolcanoconiosis", "zzzzzzzzzzzzzzzzzzzz"] {
            assert_eq!(sketch(word), naive_sketch(word), "word {}", word);
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(sketch("Hello"), sketch("hello"));
        assert_eq!(sketch("HELLO"), sketch("hElLo"));
    }

    #[test]
    fn test_out_of_alphabet_collision() {
        // Digits collapse to the last slot, same as 'z'.
        assert_eq!(sketch("hello123"), sketch("hellozzz"));
    }

    #[test]
    fn test_append_matches_recompute() {
        let word = "gyroscope";
        let mut s = Sketch::EMPTY;
        for (i, ch) in word.chars().enumerate() {
            s = append_char(s, i, ch);
            let prefix: String = word.chars().take(i + 1).collect();
            assert_eq!(s, sketch(&prefix));
        }
    }

    #[test]
    fn test_append_with_wrong_length_is_silently_wrong() {
        let s = sketch("abc");
        assert_ne!(append_char(s, 2, 'd'), sketch("abcd"));
        assert_eq!(append_char(s, 3, 'd'), sketch("abcd"));
    }

    #[test]
    fn test_rolling_sketch() {
        let sketcher = Sketcher::default();
        let mut rolling = sketcher.rolling();
        assert!(rolling.is_empty());
        rolling.extend("hel".chars());
        rolling.push('p');
        assert_eq!(rolling.len(), 4);
        assert_eq!(rolling.sketch(), sketcher.sketch("help"));
        rolling.reset();
        assert_eq!(rolling.sketch(), Sketch::EMPTY);
    }

    #[test]
    fn test_custom_alphabet_base() {
        let sketcher = Sketcher::new(Alphabet::from_symbols("acgt").unwrap());
        assert_eq!(sketcher.base(), 6);
        // "ca": weights 2, 1. F = 2 + 1*6, R = 2*6 + 1.
        assert_eq!(sketcher.sketch("ca"), Sketch::new(8, 13));
    }

    #[test]
    fn test_add_mod_wraps() {
        assert_eq!(add_mod(MODULUS - 1, 1), 0);
        assert_eq!(add_mod(MODULUS - 1, MODULUS - 1), MODULUS - 2);
        assert_eq!(add_mod(3, 4), 7);
    }

    #[test]
    fn test_flip() {
        let s = Sketch::new(0b1010, 0b0101);
        assert_eq!(s.flip(0b1111, 0), Sketch::new(0b0101, 0b0101));
        assert_eq!(s.flip(0, 0b0101), Sketch::new(0b1010, 0));
    }
}
