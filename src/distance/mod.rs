//! Direct edit-distance computation.
//!
//! Used to post-filter sketch matches when a caller explicitly asks for
//! verified results, and as the reference metric in tests.
//!
//! Two metrics are provided:
//! - [`standard_distance`]: insert, delete, substitute (the metric of the
//!   exact enumerator)
//! - [`transposition_distance`]: additionally counts a swap of adjacent
//!   characters as one edit

use smallvec::SmallVec;

type CharBuf = SmallVec<[char; 32]>;

/// Strip the common prefix and suffix of two character slices.
#[inline(always)]
fn strip_common_affixes<'a>(a: &'a [char], b: &'a [char]) -> (&'a [char], &'a [char]) {
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let (a, b) = (&a[prefix..], &b[prefix..]);
    let suffix = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    (&a[..a.len() - suffix], &b[..b.len() - suffix])
}

/// Standard Levenshtein distance, in characters.
///
/// # Example
///
/// ```rust
/// use rollsketch::distance::standard_distance;
///
/// assert_eq!(standard_distance("kitten", "sitting"), 3);
/// assert_eq!(standard_distance("hello", "helol"), 2);
/// ```
pub fn standard_distance(source: &str, target: &str) -> usize {
    let source_chars: CharBuf = source.chars().collect();
    let target_chars: CharBuf = target.chars().collect();
    let (s, t) = strip_common_affixes(&source_chars, &target_chars);

    let m = s.len();
    let n = t.len();
    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut prev_row: SmallVec<[usize; 32]> = (0..=n).collect();
    let mut curr_row: SmallVec<[usize; 32]> = SmallVec::from_elem(0, n + 1);

    for i in 1..=m {
        curr_row[0] = i;
        for j in 1..=n {
            let cost = usize::from(s[i - 1] != t[j - 1]);
            curr_row[j] = (prev_row[j] + 1) // deletion
                .min(curr_row[j - 1] + 1) // insertion
                .min(prev_row[j - 1] + cost); // substitution
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[n]
}

/// Levenshtein distance where an adjacent swap costs one edit
/// (optimal string alignment).
///
/// ```rust
/// use rollsketch::distance::transposition_distance;
///
/// assert_eq!(transposition_distance("hello", "helol"), 1);
/// ```
pub fn transposition_distance(source: &str, target: &str) -> usize {
    let source_chars: CharBuf = source.chars().collect();
    let target_chars: CharBuf = target.chars().collect();
    let (s, t) = strip_common_affixes(&source_chars, &target_chars);

    let m = s.len();
    let n = t.len();
    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut two_ago: SmallVec<[usize; 32]> = SmallVec::from_elem(0, n + 1);
    let mut prev_row: SmallVec<[usize; 32]> = (0..=n).collect();
    let mut curr_row: SmallVec<[usize; 32]> = SmallVec::from_elem(0, n + 1);

    for i in 1..=m {
        curr_row[0] = i;
        for j in 1..=n {
            let cost = usize::from(s[i - 1] != t[j - 1]);
            curr_row[j] = (prev_row[j] + 1)
                .min(curr_row[j - 1] + 1)
                .min(prev_row[j - 1] + cost);

            if i > 1 && j > 1 && s[i - 1] == t[j - 2] && s[i - 2] == t[j - 1] {
                curr_row[j] = curr_row[j].min(two_ago[j - 2] + 1);
            }
        }
        std::mem::swap(&mut two_ago, &mut prev_row);
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[n]
}

/// Standard distance after lower-casing both strings.
///
/// Matches the case folding the sketch applies, so a stored `"Hello"` is at
/// distance 0 from a query `"HELLO"`.
pub fn case_folded_distance(source: &str, target: &str) -> usize {
    standard_distance(&source.to_lowercase(), &target.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_distance_identical() {
        assert_eq!(standard_distance("test", "test"), 0);
        assert_eq!(standard_distance("", ""), 0);
    }

    #[test]
    fn test_standard_distance_empty() {
        assert_eq!(standard_distance("", "test"), 4);
        assert_eq!(standard_distance("test", ""), 4);
    }

    #[test]
    fn test_standard_distance_basic() {
        assert_eq!(standard_distance("kitten", "sitting"), 3);
        assert_eq!(standard_distance("saturday", "sunday"), 3);
        assert_eq!(standard_distance("helo", "hello"), 1);
        assert_eq!(standard_distance("helo", "held"), 1);
        assert_eq!(standard_distance("helo", "help"), 1);
    }

    #[test]
    fn test_transposition_vs_standard() {
        assert_eq!(transposition_distance("helol", "hello"), 1);
        assert_eq!(standard_distance("helol", "hello"), 2);
        assert_eq!(transposition_distance("ab", "ba"), 1);
    }

    #[test]
    fn test_affix_stripping_edge_cases() {
        // One string is a prefix of the other.
        assert_eq!(standard_distance("abc", "abcdef"), 3);
        // Overlapping prefix and suffix candidates.
        assert_eq!(standard_distance("aaa", "aaaa"), 1);
        assert_eq!(standard_distance("abab", "ab"), 2);
    }

    #[test]
    fn test_unicode() {
        assert_eq!(standard_distance("café", "cafe"), 1);
        assert_eq!(standard_distance("日本語", "日本"), 1);
    }

    #[test]
    fn test_case_folded_distance() {
        assert_eq!(case_folded_distance("Hello", "hELLO"), 0);
        assert_eq!(case_folded_distance("Hello", "HELO"), 1);
        assert_eq!(standard_distance("Hello", "hello"), 1);
    }

    #[test]
    fn test_long_strings() {
        let a = "a".repeat(100);
        let b = format!("{}b", "a".repeat(99));
        assert_eq!(standard_distance(&a, &b), 1);
    }

    #[test]
    fn test_rows_longer_than_inline_capacity() {
        // No shared prefix or suffix, so the full rows are materialized.
        let a = "ab".repeat(20);
        let b = "ba".repeat(20);
        assert_eq!(standard_distance(&a, &b), 2);
        assert_eq!(transposition_distance(&a, &b), 2);

        let x = "x".repeat(33);
        let y = "y".repeat(33);
        assert_eq!(standard_distance(&x, &y), 33);
        assert_eq!(transposition_distance(&x, &y), 33);
        assert_eq!(case_folded_distance(&x.to_uppercase(), &y), 33);
    }
}
