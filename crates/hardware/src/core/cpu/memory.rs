//! Data Memory.
//!
//! This module provides the sparse data memory seen by loads and written by commit.
//! It performs the following:
//! 1. **Sparse Storage:** Only written addresses occupy space; unwritten addresses read as zero.
//! 2. **Word Granularity:** Each address holds one 64-bit value. There is no byte lane
//!    model and no aliasing between neighbouring addresses.
//! 3. **Ordering:** Iteration is by ascending address, which keeps snapshots stable.

use std::collections::BTreeMap;

use serde::Serialize;

/// Sparse word-addressed data memory.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DataMemory {
    words: BTreeMap<i64, i64>,
}

impl DataMemory {
    /// Creates an empty memory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the word at `addr`, or 0 if it was never written.
    #[inline]
    pub fn load(&self, addr: i64) -> i64 {
        self.words.get(&addr).copied().unwrap_or(0)
    }

    /// Writes the word at `addr`.
    #[inline]
    pub fn store(&mut self, addr: i64, val: i64) {
        let _ = self.words.insert(addr, val);
    }

    /// Number of addresses that have been written.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterates written `(address, value)` pairs in ascending address order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.words.iter().map(|(&a, &v)| (a, v))
    }

    /// The underlying sparse map.
    pub const fn as_map(&self) -> &BTreeMap<i64, i64> {
        &self.words
    }

    /// Forgets every written address.
    pub fn clear(&mut self) {
        self.words.clear();
    }
}
