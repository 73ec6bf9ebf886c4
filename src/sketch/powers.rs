//! Process-wide memoized powers of the sketch base.
//!
//! One table exists per base value. Tables only grow: a request for an
//! exponent beyond the current length extends the table up to that exponent,
//! and entries are never removed or rewritten. Readers share a `RwLock`; two
//! threads racing to extend the same table compute identical entries, so the
//! second extension is a no-op.

use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::trace;

use super::{mul_mod, MODULUS};

/// Memoized table of `base^i mod P`.
pub struct PowerTable {
    base: u64,
    powers: RwLock<Vec<u64>>,
}

static TABLES: OnceLock<RwLock<FxHashMap<u64, Arc<PowerTable>>>> = OnceLock::new();

impl PowerTable {
    fn new(base: u64) -> Self {
        let mut powers = Vec::with_capacity(64);
        powers.push(1 % MODULUS);
        Self {
            base,
            powers: RwLock::new(powers),
        }
    }

    /// Shared table for `base`, created on first use.
    pub fn shared(base: u64) -> Arc<PowerTable> {
        let tables = TABLES.get_or_init(|| RwLock::new(FxHashMap::default()));
        if let Some(table) = tables.read().get(&base) {
            return Arc::clone(table);
        }
        let mut tables = tables.write();
        Arc::clone(
            tables
                .entry(base)
                .or_insert_with(|| Arc::new(PowerTable::new(base))),
        )
    }

    /// The base this table raises.
    #[inline]
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Number of memoized exponents.
    pub fn len(&self) -> usize {
        self.powers.read().len()
    }

    /// A table always holds at least `base^0`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// `base^exp mod P`.
    pub fn get(&self, exp: usize) -> u64 {
        if let Some(&p) = self.powers.read().get(exp) {
            return p;
        }
        self.grow(exp + 1);
        self.powers.read()[exp]
    }

    /// Run `f` over the first `count` powers, extending the table if needed.
    pub fn with_prefix<R>(&self, count: usize, f: impl FnOnce(&[u64]) -> R) -> R {
        {
            let powers = self.powers.read();
            if powers.len() >= count {
                return f(&powers[..count]);
            }
        }
        self.grow(count);
        let powers = self.powers.read();
        f(&powers[..count])
    }

    fn grow(&self, count: usize) {
        let mut powers = self.powers.write();
        if powers.len() >= count {
            return;
        }
        trace!(base = self.base, from = powers.len(), to = count, "extending power table");
        let extra = count - powers.len();
        powers.reserve(extra);
        let mut last = *powers.last().unwrap_or(&1);
        while powers.len() < count {
            last = mul_mod(last, self.base);
            powers.push(last);
        }
    }
}
