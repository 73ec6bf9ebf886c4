//! Lookup strategies and their comparison.

use std::collections::BTreeSet;

/// How a fuzzy lookup generates the sketches it probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(feature = "serialization", serde(rename_all = "kebab-case"))]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum LookupMode {
    /// Enumerate every string within the edit radius and sketch each one.
    ///
    /// Recall is complete with respect to standard Levenshtein distance over
    /// the alphabet.
    #[default]
    Exact,

    /// Flip up to `k` contiguous bit-runs of the query's sketch.
    ///
    /// Heuristic: may both miss true neighbors and return unrelated words.
    BitRun,
}

impl LookupMode {
    /// Short name, as accepted by [`FromStr`](std::str::FromStr).
    pub fn name(&self) -> &'static str {
        match self {
            LookupMode::Exact => "exact",
            LookupMode::BitRun => "bit-run",
        }
    }
}

impl std::fmt::Display for LookupMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for LookupMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" | "e" => Ok(LookupMode::Exact),
            "bit-run" | "bitrun" | "bits" | "br" => Ok(LookupMode::BitRun),
            _ => Err(format!(
                "Unknown lookup mode: {}. Valid options: exact, bit-run",
                s
            )),
        }
    }
}

/// Results of both lookups for the same query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LookupComparison {
    /// Result of [`SketchIndex::lookup`](super::SketchIndex::lookup).
    pub exact: BTreeSet<String>,
    /// Result of [`SketchIndex::lookup_bit_run`](super::SketchIndex::lookup_bit_run).
    pub bit_run: BTreeSet<String>,
}

impl LookupComparison {
    /// Words only the exact lookup found (bit-run misses).
    pub fn exact_only(&self) -> BTreeSet<&str> {
        self.exact
            .difference(&self.bit_run)
            .map(String::as_str)
            .collect()
    }

    /// Words only the bit-run lookup found.
    pub fn bit_run_only(&self) -> BTreeSet<&str> {
        self.bit_run
            .difference(&self.exact)
            .map(String::as_str)
            .collect()
    }

    /// Words both lookups found.
    pub fn common(&self) -> BTreeSet<&str> {
        self.exact
            .intersection(&self.bit_run)
            .map(String::as_str)
            .collect()
    }

    /// Whether the two result sets are identical.
    pub fn agrees(&self) -> bool {
        self.exact == self.bit_run
    }
}
