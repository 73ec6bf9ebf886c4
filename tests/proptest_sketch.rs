//! Property-based tests for forward/reverse sketches using proptest

use rollsketch::prelude::*;
use rollsketch::sketch::MODULUS;
use proptest::prelude::*;

// Strategy for generating simple ASCII words
fn word_strategy() -> impl Strategy<Value = String> {
    "[a-z]{0,12}"
}

// Mixed-case words with digits and a few non-ASCII letters
fn messy_word_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9éß ]{0,12}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Property: appending a character to a sketch equals sketching the
    /// extended word
    #[test]
    fn prop_append_matches_full_sketch(word in messy_word_strategy(), ch in any::<char>()) {
        let len = word.chars().count();
        let extended = format!("{}{}", word, ch);
        prop_assert_eq!(append_char(sketch(&word), len, ch), sketch(&extended));
    }

    /// Property: the reverse limb is the forward limb of the reversed word
    #[test]
    fn prop_reverse_is_forward_of_reversal(word in messy_word_strategy()) {
        let reversed: String = word.chars().rev().collect();
        let s = sketch(&word);
        let r = sketch(&reversed);
        prop_assert_eq!(s.reverse, r.forward);
        prop_assert_eq!(s.forward, r.reverse);
    }

    /// Property: case never changes the sketch
    #[test]
    fn prop_case_insensitive(word in "[a-zA-Z]{0,12}") {
        prop_assert_eq!(sketch(&word), sketch(&word.to_lowercase()));
        prop_assert_eq!(sketch(&word), sketch(&word.to_uppercase()));
    }

    /// Property: both limbs are reduced modulo P
    #[test]
    fn prop_limbs_reduced(word in messy_word_strategy()) {
        let s = sketch(&word);
        prop_assert!(s.forward < MODULUS);
        prop_assert!(s.reverse < MODULUS);
    }

    /// Property: streaming characters through a rolling sketch reproduces
    /// the whole-word sketch at every prefix
    #[test]
    fn prop_rolling_matches_prefixes(word in messy_word_strategy()) {
        let sketcher = Sketcher::default();
        let mut rolling = sketcher.rolling();
        prop_assert_eq!(rolling.sketch(), Sketch::EMPTY);
        for (i, ch) in word.chars().enumerate() {
            rolling.push(ch);
            let prefix: String = word.chars().take(i + 1).collect();
            prop_assert_eq!(rolling.sketch(), sketcher.sketch(&prefix));
            prop_assert_eq!(rolling.len(), i + 1);
        }
    }

    /// Property: out-of-alphabet characters sketch like the last symbol
    #[test]
    fn prop_unknown_characters_fold_to_last_symbol(prefix in word_strategy(), digit in "[0-9]") {
        let with_digit = format!("{}{}", prefix, digit);
        let with_z = format!("{}z", prefix);
        prop_assert_eq!(sketch(&with_digit), sketch(&with_z));
    }

    /// Property: a word that differs from another only at one position
    /// has a different sketch under the default alphabet
    #[test]
    fn prop_substitution_changes_sketch(word in "[a-y]{1,10}", pos in 0usize..10) {
        let chars: Vec<char> = word.chars().collect();
        let pos = pos % chars.len();
        let mut edited = chars.clone();
        edited[pos] = 'z';
        let edited: String = edited.into_iter().collect();
        prop_assert_ne!(sketch(&word), sketch(&edited));
    }

    /// Property: sketches depend only on symbol values, so two alphabets
    /// with the same size and order sketch equivalent words identically
    #[test]
    fn prop_alphabet_relabeling(word in "[a-e]{0,10}") {
        let letters = Sketcher::new(Alphabet::from_symbols("abcde").unwrap());
        let digits = Sketcher::new(Alphabet::from_symbols("01234").unwrap());
        let relabeled: String = word
            .chars()
            .map(|c| char::from(b'0' + (c as u8 - b'a')))
            .collect();
        prop_assert_eq!(letters.sketch(&word), digits.sketch(&relabeled));
    }
}
