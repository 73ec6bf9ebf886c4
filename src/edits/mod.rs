//! Exact edit-neighborhood enumeration.
//!
//! Produces every string within standard Levenshtein distance `k` of a word,
//! over a given alphabet. The edit operations are single-character deletion,
//! substitution and insertion. Adjacent transposition is not an operation
//! here: `"hello"` and `"helol"` are two edits apart.
//!
//! This is the ground truth for [`SketchIndex::lookup`](crate::index::SketchIndex::lookup).
//! The neighborhood size grows as `O((|w|·Σ)^k)`, so only small radii are
//! practical.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::alphabet::Alphabet;

type CharBuf = SmallVec<[char; 32]>;

/// All strings exactly one deletion, substitution or insertion away from
/// `word`.
///
/// Substitutions and insertions draw from the alphabet's symbols. A
/// substitution of a character by itself yields `word`, which is therefore
/// part of the result whenever `word` is non-empty and contains an alphabet
/// symbol.
pub fn single_edits(word: &str, alphabet: &Alphabet) -> FxHashSet<String> {
    let chars: CharBuf = word.chars().collect();
    let mut out = FxHashSet::default();
    push_single_edits(&chars, alphabet.symbols(), &mut out);
    out
}

/// All strings within Levenshtein distance `k` of `word`, `word` included.
///
/// Computed by iterated closure: round `i` adds the single-edit neighbors of
/// the strings first reached in round `i - 1`. Expanding only the newly
/// reached strings gives the same set as re-expanding everything each round.
pub fn edits_within(word: &str, k: usize, alphabet: &Alphabet) -> FxHashSet<String> {
    let mut reached = FxHashSet::default();
    reached.insert(word.to_string());

    let mut frontier = vec![word.to_string()];
    let mut neighbors = FxHashSet::default();
    let mut chars = CharBuf::new();

    for _ in 0..k {
        neighbors.clear();
        for w in &frontier {
            chars.clear();
            chars.extend(w.chars());
            push_single_edits(&chars, alphabet.symbols(), &mut neighbors);
        }
        frontier = neighbors
            .drain()
            .filter(|candidate| !reached.contains(candidate))
            .collect();
        if frontier.is_empty() {
            break;
        }
        reached.extend(frontier.iter().cloned());
    }

    reached
}

fn push_single_edits(chars: &[char], symbols: &[char], out: &mut FxHashSet<String>) {
    let n = chars.len();
    let mut buf = String::with_capacity(4 * (n + 1));

    let mut emit = |prefix: &[char], middle: Option<char>, suffix: &[char]| {
        buf.clear();
        buf.extend(prefix.iter());
        if let Some(c) = middle {
            buf.push(c);
        }
        buf.extend(suffix.iter());
        if !out.contains(buf.as_str()) {
            out.insert(buf.clone());
        }
    };

    for i in 0..=n {
        let (left, right) = chars.split_at(i);
        if let Some((_, rest)) = right.split_first() {
            // deletion
            emit(left, None, rest);
            // substitution
            for &c in symbols {
                emit(left, Some(c), rest);
            }
        }
        // insertion
        for &c in symbols {
            emit(left, Some(c), right);
        }
    }
}

/// Number of distinct strings [`single_edits`] can produce at most.
///
/// `n` deletions, `n·Σ` substitutions and `(n+1)·Σ` insertions, before
/// duplicate removal.
pub fn single_edit_bound(len: usize, alphabet_size: usize) -> usize {
    len + len * alphabet_size + (len + 1) * alphabet_size
}
