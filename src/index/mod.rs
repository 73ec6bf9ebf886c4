//! Sketch-keyed dictionary index.
//!
//! Words are grouped into buckets by [`Sketch`]. A fuzzy lookup enumerates
//! candidate sketches around the query and returns the union of the buckets
//! they hit.
//!
//! The index is built with `&mut self` inserts and then read through `&self`
//! lookups. `SketchIndex` is `Send + Sync`, so a finished index can be put in
//! an `Arc` and queried from several threads.
//!
//! # Example
//!
//! ```rust
//! use rollsketch::index::SketchIndex;
//!
//! let index = SketchIndex::with_radius(1)?.build(["hello", "world", "help", "held"]);
//!
//! let hits = index.lookup("helo");
//! assert!(hits.contains("hello"));
//! assert!(hits.contains("help"));
//! assert!(hits.contains("held"));
//! assert!(!hits.contains("world"));
//! # Ok::<(), rollsketch::error::ConfigError>(())
//! ```

mod config;
mod lookup;

pub use config::{IndexBuilder, IndexConfig, DEFAULT_EDIT_RADIUS, MAX_EDIT_RADIUS};
pub use lookup::{LookupComparison, LookupMode};

use std::collections::BTreeSet;
use std::fmt;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::distance::case_folded_distance;
use crate::edits::edits_within;
use crate::error::Result;
use crate::sketch::{Sketch, Sketcher};
use crate::variants::for_each_bit_run_variant;

/// Words sharing one sketch, in sorted order.
pub type Bucket = BTreeSet<String>;

/// Fuzzy string index keyed by forward/reverse sketches.
#[derive(Clone)]
pub struct SketchIndex {
    config: IndexConfig,
    sketcher: Sketcher,
    buckets: FxHashMap<Sketch, Bucket>,
    word_count: usize,
}

impl SketchIndex {
    /// Create an empty index.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`](crate::error::ConfigError) reported by
    /// [`IndexConfig::validate`].
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        let sketcher = Sketcher::new(config.alphabet.clone());
        Ok(Self {
            config,
            sketcher,
            buckets: FxHashMap::default(),
            word_count: 0,
        })
    }

    /// Create an empty index with the default alphabet and run length.
    pub fn with_radius(edit_radius: usize) -> Result<Self> {
        Self::new(IndexConfig::with_radius(edit_radius))
    }

    /// Add `word` to the bucket of its sketch.
    ///
    /// Returns `false` if the word was already present. Words are stored as
    /// given; case folding only affects the sketch.
    pub fn insert(&mut self, word: &str) -> bool {
        let key = self.sketcher.sketch(word);
        let bucket = self.buckets.entry(key).or_default();
        if bucket.contains(word) {
            return false;
        }
        bucket.insert(word.to_string());
        self.word_count += 1;
        true
    }

    /// Insert every word and return the index for chaining.
    pub fn build<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let before = self.word_count;
        self.extend(words);
        debug!(
            added = self.word_count - before,
            words = self.word_count,
            buckets = self.buckets.len(),
            "built sketch index"
        );
        self
    }

    /// Words within the edit radius of `query`, up to sketch collisions.
    ///
    /// Sketches every string of the exact edit neighborhood (see
    /// [`edits_within`]) and unions the buckets they hit. Every indexed word
    /// within standard Levenshtein distance `k` is returned. Words that
    /// merely collide with a neighbor's sketch are returned too.
    pub fn lookup(&self, query: &str) -> BTreeSet<String> {
        let neighborhood = edits_within(query, self.config.edit_radius, &self.config.alphabet);
        let keys: FxHashSet<Sketch> = neighborhood
            .iter()
            .map(|candidate| self.sketcher.sketch(candidate))
            .collect();

        let mut hits: BTreeSet<&str> = BTreeSet::new();
        for key in &keys {
            if let Some(bucket) = self.buckets.get(key) {
                hits.extend(bucket.iter().map(String::as_str));
            }
        }
        debug!(
            query,
            neighbors = neighborhood.len(),
            sketches = keys.len(),
            hits = hits.len(),
            "exact lookup"
        );
        hits.into_iter().map(str::to_owned).collect()
    }

    /// Words whose sketch is a bit-run variant of the query's sketch.
    ///
    /// Heuristic. See [`variants`](crate::variants) for why this can both
    /// miss words within the radius and return unrelated ones.
    pub fn lookup_bit_run(&self, query: &str) -> BTreeSet<String> {
        let origin = self.sketcher.sketch(query);
        let mut hits: BTreeSet<&str> = BTreeSet::new();
        let mut probes = 0u64;
        for_each_bit_run_variant(
            origin,
            self.config.edit_radius,
            self.config.max_run,
            |variant| {
                probes += 1;
                if let Some(bucket) = self.buckets.get(&variant) {
                    hits.extend(bucket.iter().map(String::as_str));
                }
            },
        );
        debug!(query, probes, hits = hits.len(), "bit-run lookup");
        hits.into_iter().map(str::to_owned).collect()
    }

    /// Dispatch to [`lookup`](Self::lookup) or
    /// [`lookup_bit_run`](Self::lookup_bit_run).
    pub fn lookup_with(&self, mode: LookupMode, query: &str) -> BTreeSet<String> {
        match mode {
            LookupMode::Exact => self.lookup(query),
            LookupMode::BitRun => self.lookup_bit_run(query),
        }
    }

    /// [`lookup`](Self::lookup) with sketch collisions removed.
    ///
    /// Keeps only words whose case-folded Levenshtein distance to `query` is
    /// at most the edit radius.
    pub fn lookup_verified(&self, query: &str) -> BTreeSet<String> {
        let k = self.config.edit_radius;
        let mut hits = self.lookup(query);
        let before = hits.len();
        hits.retain(|word| case_folded_distance(query, word) <= k);
        debug!(query, dropped = before - hits.len(), "verified lookup");
        hits
    }

    /// Run both lookups for `query`.
    pub fn compare(&self, query: &str) -> LookupComparison {
        LookupComparison {
            exact: self.lookup(query),
            bit_run: self.lookup_bit_run(query),
        }
    }

    /// Whether `word` itself was inserted.
    ///
    /// Equivalent to `self.lookup(word).contains(word)`: only inserted words
    /// live in buckets, and an inserted word always sits in the bucket of its
    /// own sketch, which the lookup probes at every radius.
    pub fn contains(&self, word: &str) -> bool {
        self.buckets
            .get(&self.sketcher.sketch(word))
            .is_some_and(|bucket| bucket.contains(word))
    }

    /// Word and bucket counts.
    pub fn stats(&self) -> IndexStats {
        IndexStats::new(self.word_count, self.buckets.len())
    }

    /// Number of distinct words.
    #[inline]
    pub fn len(&self) -> usize {
        self.word_count
    }

    /// Whether no word has been inserted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Number of distinct sketches.
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Words stored under `sketch`, if any.
    pub fn bucket(&self, sketch: &Sketch) -> Option<&Bucket> {
        self.buckets.get(sketch)
    }

    /// Iterate over `(sketch, bucket)` pairs in arbitrary order.
    pub fn buckets(&self) -> impl Iterator<Item = (&Sketch, &Bucket)> + '_ {
        self.buckets.iter()
    }

    /// All indexed words, sorted.
    pub fn words(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self
            .buckets
            .values()
            .flat_map(|bucket| bucket.iter().map(String::as_str))
            .collect();
        words.sort_unstable();
        words
    }

    /// Sketch of `word` under this index's alphabet.
    #[inline]
    pub fn sketch(&self, word: &str) -> Sketch {
        self.sketcher.sketch(word)
    }

    /// The configuration the index was built with.
    #[inline]
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// The edit radius `k`.
    #[inline]
    pub fn edit_radius(&self) -> usize {
        self.config.edit_radius
    }

    /// The sketcher used for keys.
    #[inline]
    pub fn sketcher(&self) -> &Sketcher {
        &self.sketcher
    }

    /// Remove every word.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.word_count = 0;
    }

    /// A new index with `config` holding the same words.
    ///
    /// Buckets depend on the alphabet and lookups on the radius, so changing
    /// either means re-inserting everything.
    pub fn reconfigure(&self, config: IndexConfig) -> Result<Self> {
        let index = Self::new(config)?;
        Ok(index.build(self.buckets.values().flatten()))
    }
}

impl Default for SketchIndex {
    fn default() -> Self {
        let config = IndexConfig::default();
        let sketcher = Sketcher::new(config.alphabet.clone());
        Self {
            config,
            sketcher,
            buckets: FxHashMap::default(),
            word_count: 0,
        }
    }
}

impl<S: AsRef<str>> Extend<S> for SketchIndex {
    fn extend<T: IntoIterator<Item = S>>(&mut self, iter: T) {
        for word in iter {
            self.insert(word.as_ref());
        }
    }
}

impl PartialEq for SketchIndex {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config && self.buckets == other.buckets
    }
}

impl Eq for SketchIndex {}

impl fmt::Debug for SketchIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SketchIndex")
            .field("config", &self.config)
            .field("words", &self.word_count)
            .field("buckets", &self.buckets.len())
            .finish()
    }
}

/// Size summary of an index.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct IndexStats {
    /// Number of distinct words.
    pub word_count: usize,
    /// Number of distinct sketches.
    pub bucket_count: usize,
    /// `word_count / max(1, bucket_count)`.
    pub avg_bucket_size: f64,
}

impl IndexStats {
    fn new(word_count: usize, bucket_count: usize) -> Self {
        Self {
            word_count,
            bucket_count,
            avg_bucket_size: word_count as f64 / bucket_count.max(1) as f64,
        }
    }

    /// Words beyond the first in each bucket. Zero when every sketch is
    /// unique.
    pub fn collision_excess(&self) -> usize {
        self.word_count.saturating_sub(self.bucket_count)
    }
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "words: {}, buckets: {}, avg bucket size: {:.3}",
            self.word_count, self.bucket_count, self.avg_bucket_size
        )
    }
}
