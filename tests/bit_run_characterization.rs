//! Characterization of the bit-run neighborhood against exact edits
//!
//! The bit-run variant set is a heuristic. These tests measure how much of
//! the single-edit neighborhood it covers and pin the structural facts that
//! do hold, without asserting any equivalence between the two.

use std::collections::BTreeSet;

use rollsketch::prelude::*;
use rollsketch::variants::{mask_count, variant_count, DEFAULT_MAX_RUN};

#[test]
fn test_mask_count_default() {
    assert_eq!(mask_count(DEFAULT_MAX_RUN), 369);
    assert_eq!(run_masks(DEFAULT_MAX_RUN).len(), 369);
    assert_eq!(mask_count(1), 64);
    assert_eq!(mask_count(64), 64 * 65 / 2);
}

#[test]
fn test_masks_are_contiguous_runs() {
    for &mask in run_masks(DEFAULT_MAX_RUN).iter() {
        let len = mask.count_ones();
        assert!((1..=DEFAULT_MAX_RUN).contains(&len));
        let shifted = mask >> mask.trailing_zeros();
        assert_eq!(shifted.count_ones(), shifted.trailing_ones());
    }
}

#[test]
fn test_radius_one_variant_set_size() {
    let origin = sketch("hello");
    let variants = bit_run_variants(origin, 1, DEFAULT_MAX_RUN);
    // Identity plus one mask in either limb; single flips never collide.
    assert_eq!(variants.len(), 1 + 2 * 369);
    assert_eq!(variant_count(1, DEFAULT_MAX_RUN), 1 + 2 * 369);
    assert!(variants.contains(&origin));
}

#[test]
fn test_radius_zero_is_identity() {
    let origin = sketch("hello");
    let variants = bit_run_variants(origin, 0, DEFAULT_MAX_RUN);
    assert_eq!(variants.len(), 1);
    assert!(variants.contains(&origin));
}

#[test]
fn test_variants_nest_by_radius() {
    let origin = sketch("abc");
    let one = bit_run_variants(origin, 1, 2);
    let two = bit_run_variants(origin, 2, 2);
    assert!(one.is_subset(&two));
    assert!(two.len() as u64 <= variant_count(2, 2));
}

#[test]
fn test_single_edit_coverage() {
    let alphabet = Alphabet::default();
    let words = ["hello", "world", "sketch", "a", "rolling", "hash"];

    let mut total = 0usize;
    let mut covered = 0usize;
    for word in words {
        let variants = bit_run_variants(sketch(word), 1, DEFAULT_MAX_RUN);
        for neighbor in single_edits(word, &alphabet) {
            total += 1;
            if variants.contains(&sketch(&neighbor)) {
                covered += 1;
                // Only the identity substitution lands in the variant set.
                assert_eq!(neighbor, word, "unexpected coverage of {:?}", neighbor);
            }
        }
    }

    println!("\n=== Bit-Run Coverage (k=1, max_run={}) ===", DEFAULT_MAX_RUN);
    println!("  Single-edit neighbors: {}", total);
    println!("  Covered by variants:   {}", covered);
    println!("  Coverage: {:.1}%", covered as f64 * 100.0 / total as f64);

    assert_eq!(total, 1588);
    assert_eq!(covered, words.len());
    assert!(covered < total);
}

#[test]
fn test_compare_reports_disagreement() {
    let index = SketchIndex::with_radius(1)
        .unwrap()
        .build(["hello", "help", "held", "hero", "world"]);

    let comparison = index.compare("helo");
    assert_eq!(comparison.exact, index.lookup("helo"));
    assert_eq!(comparison.bit_run, index.lookup_bit_run("helo"));
    assert!(!comparison.agrees());
    assert_eq!(
        comparison.exact_only(),
        BTreeSet::from(["held", "hello", "help", "hero"])
    );
    assert!(comparison.bit_run.is_empty());
    assert!(comparison.common().is_empty());

    let comparison = index.compare("helpo");
    assert!(!comparison.agrees());
    assert_eq!(comparison.exact_only(), BTreeSet::from(["hello", "help"]));
    assert!(comparison.bit_run_only().is_empty());
}

#[test]
fn test_bit_run_finds_run_flipped_neighbor() {
    // A single letter sketches to (v+1, v+1). From "a" = (1, 1):
    // b = (2, 2) and c = (3, 3) differ by runs 0b11 and 0b10 in each limb,
    // e = (5, 5) by the single bit 0b100, d = (4, 4) by 0b101, not a run.
    let index = IndexBuilder::new()
        .edit_radius(2)
        .max_run(2)
        .build()
        .unwrap()
        .build(["b", "c", "d", "e", "hello"]);

    let comparison = index.compare("a");
    assert_eq!(
        comparison.bit_run,
        ["b", "c", "e"].iter().map(|w| w.to_string()).collect::<BTreeSet<_>>()
    );
    assert_eq!(comparison.exact_only(), BTreeSet::from(["d"]));
    assert!(comparison.bit_run_only().is_empty());

    // One flip per limb, so radius 1 finds none of them.
    let narrow = IndexBuilder::new()
        .edit_radius(1)
        .max_run(2)
        .build()
        .unwrap()
        .build(["b", "c", "d", "e"]);
    assert!(narrow.lookup_bit_run("a").is_empty());
}
