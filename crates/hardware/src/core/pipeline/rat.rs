//! Register Alias Table (RAT).
//!
//! Maps each architectural register to the ROB slot of its latest in-flight
//! producer, or to the architectural register file if nothing in flight writes
//! it. The issue stage does a single direct ROB lookup per source operand
//! instead of scanning the ROB.

use serde::Serialize;

use crate::common::constants::NUM_REGISTERS;
use crate::core::arch::Register;
use crate::core::pipeline::rob::RobTag;

/// Rename state of one register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum RatEntry {
    /// The committed register file holds the current value.
    #[default]
    Architectural,
    /// The youngest in-flight writer sits in this ROB slot.
    Pending(usize),
}

/// Register Alias Table: one entry per architectural register.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rat {
    entries: [RatEntry; NUM_REGISTERS],
}

impl Rat {
    /// Creates a table with every register architectural.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `tag` as the latest producer of `reg`.
    #[inline]
    pub const fn rename(&mut self, reg: Register, tag: RobTag) {
        self.entries[reg.index()] = RatEntry::Pending(tag.0);
    }

    /// Latest in-flight producer of `reg`, or `None` if it is architectural.
    #[inline]
    pub const fn producer(&self, reg: Register) -> Option<RobTag> {
        match self.entries[reg.index()] {
            RatEntry::Architectural => None,
            RatEntry::Pending(slot) => Some(RobTag(slot)),
        }
    }

    /// Returns `reg` to the architectural file, but only if `tag` is still its
    /// latest producer. A younger rename of the same register is kept (WAW).
    pub fn release_if_match(&mut self, reg: Register, tag: RobTag) {
        let slot = &mut self.entries[reg.index()];
        if *slot == RatEntry::Pending(tag.0) {
            *slot = RatEntry::Architectural;
        }
    }

    /// Flush: every register back to architectural.
    pub fn flush(&mut self) {
        self.entries = [RatEntry::Architectural; NUM_REGISTERS];
    }

    /// Entry for `reg`.
    #[inline]
    pub const fn get(&self, reg: Register) -> RatEntry {
        self.entries[reg.index()]
    }

    /// Iterates `(register, entry)` pairs in register order.
    pub fn iter(&self) -> impl Iterator<Item = (Register, RatEntry)> + '_ {
        Register::ALL.into_iter().map(|r| (r, self.get(r)))
    }
}
