//! Approximate sketch-space neighborhoods built from bit-run flips.
//!
//! Instead of enumerating edited strings and hashing each one, this module
//! perturbs a sketch directly. A *run mask* is a 64-bit word with 1 to
//! `max_run` contiguous set bits at any offset. A variant at radius `k` is
//! the original sketch with up to `k` distinct run masks XOR-ed into it, the
//! masks split in any way between the forward and reverse limbs.
//!
//! # Relationship to the exact neighborhood
//!
//! The variant set is a heuristic, not a characterization of edit distance:
//!
//! - It over-approximates. Most variants correspond to no string within the
//!   radius, and any indexed word whose sketch happens to equal a variant is
//!   returned by [`SketchIndex::lookup_bit_run`](crate::index::SketchIndex::lookup_bit_run).
//! - It can also miss true neighbors. A single-character edit changes a limb
//!   by `±δ·B^i mod P`, and the carries of that addition rarely line up into
//!   a few short runs of flipped bits.
//!
//! Neither set contains the other in general. Both lookups are kept side by
//! side; [`SketchIndex::compare`](crate::index::SketchIndex::compare) reports
//! where they disagree.

use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::sketch::Sketch;

/// Default maximum run length.
pub const DEFAULT_MAX_RUN: u32 = 6;

static MASKS: OnceLock<RwLock<FxHashMap<u32, Arc<[u64]>>>> = OnceLock::new();

/// Every run mask of 1 to `max_run` contiguous bits within a 64-bit word.
///
/// Ordered by run length, then by offset. `max_run` is clamped to 64; a
/// `max_run` of zero yields no masks. The table for each length is built once
/// per process and shared.
pub fn run_masks(max_run: u32) -> Arc<[u64]> {
    let max_run = max_run.min(64);
    let cache = MASKS.get_or_init(|| RwLock::new(FxHashMap::default()));
    if let Some(masks) = cache.read().get(&max_run) {
        return Arc::clone(masks);
    }

    let mut masks = Vec::with_capacity(mask_count(max_run));
    for len in 1..=max_run {
        let run = u64::MAX >> (64 - len);
        for start in 0..=(64 - len) {
            masks.push(run << start);
        }
    }
    trace!(max_run, count = masks.len(), "built run mask table");

    let masks: Arc<[u64]> = masks.into();
    Arc::clone(cache.write().entry(max_run).or_insert(masks))
}

/// Number of run masks for `max_run`: `Σ_{l=1..max_run} (65 - l)`.
pub fn mask_count(max_run: u32) -> usize {
    let max_run = max_run.min(64) as usize;
    (1..=max_run).map(|len| 65 - len).sum()
}

/// Visit every bit-run variant of `sketch` at radius `k`.
///
/// Visits the identity, then for each `e` in `1..=k` every way of choosing
/// `e` masks and splitting them between the two limbs. The same sketch can
/// be visited more than once (distinct mask combinations can XOR to the same
/// pattern); callers that need a set should use [`bit_run_variants`].
///
/// The visit count is [`variant_count`], which grows as `|masks|^k`.
pub fn for_each_bit_run_variant<F>(sketch: Sketch, k: usize, max_run: u32, mut visit: F)
where
    F: FnMut(Sketch),
{
    visit(sketch);
    if k == 0 {
        return;
    }

    let masks = run_masks(max_run);

    for &m in masks.iter() {
        visit(sketch.flip(m, 0));
        visit(sketch.flip(0, m));
    }

    for edits in 2..=k {
        for in_forward in 0..=edits {
            let in_reverse = edits - in_forward;
            xor_combinations(&masks, in_forward, &mut |forward_mask| {
                xor_combinations(&masks, in_reverse, &mut |reverse_mask| {
                    visit(sketch.flip(forward_mask, reverse_mask));
                });
            });
        }
    }
}

/// The set of bit-run variants of `sketch` at radius `k`.
///
/// Always contains `sketch` itself. See the module documentation for how
/// this set relates to the exact edit neighborhood.
pub fn bit_run_variants(sketch: Sketch, k: usize, max_run: u32) -> FxHashSet<Sketch> {
    let bound = variant_count(k, max_run).min(1 << 20) as usize;
    let mut out = FxHashSet::with_capacity_and_hasher(bound, Default::default());
    for_each_bit_run_variant(sketch, k, max_run, |variant| {
        out.insert(variant);
    });
    out
}

/// Number of visits [`for_each_bit_run_variant`] makes, saturating at
/// `u64::MAX`.
///
/// An upper bound on the size of [`bit_run_variants`].
pub fn variant_count(k: usize, max_run: u32) -> u64 {
    let m = mask_count(max_run) as u128;
    let mut total: u128 = 1;
    if k >= 1 {
        total += 2 * m;
    }
    for edits in 2..=k as u128 {
        for in_forward in 0..=edits {
            let term = binomial(m, in_forward).saturating_mul(binomial(m, edits - in_forward));
            total = total.saturating_add(term);
        }
    }
    u64::try_from(total).unwrap_or(u64::MAX)
}

fn binomial(n: u128, k: u128) -> u128 {
    if k > n {
        return 0;
    }
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = acc.saturating_mul(n - i) / (i + 1);
    }
    acc
}

/// Visit the XOR of every `count`-element combination of `masks`.
///
/// A count of zero visits the empty combination (`0`) once.
fn xor_combinations<F>(masks: &[u64], count: usize, visit: &mut F)
where
    F: FnMut(u64),
{
    fn walk<F: FnMut(u64)>(masks: &[u64], start: usize, remaining: usize, acc: u64, visit: &mut F) {
        if remaining == 0 {
            visit(acc);
            return;
        }
        let last_start = masks.len() - remaining;
        for i in start..=last_start {
            walk(masks, i + 1, remaining - 1, acc ^ masks[i], visit);
        }
    }

    if count > masks.len() {
        return;
    }
    walk(masks, 0, count, 0, visit);
}
