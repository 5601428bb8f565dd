//! Load-Store Buffer (LSB).
//!
//! Holds dispatched LOAD, STORE, PUSH and POP instructions. Each entry
//! resolves its address from a base operand plus a constant offset; stores
//! and pushes additionally wait for a separate value operand. Memory writes
//! are never performed here, only at commit.

use crate::core::pipeline::cdb::CdbResult;
use crate::core::pipeline::operand::Operand;
use crate::core::pipeline::rob::RobTag;
use crate::isa::Opcode;

/// One occupied LSB slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LsbEntry {
    /// LOAD, STORE, PUSH or POP.
    pub op: Opcode,
    /// ROB slot of the instruction.
    pub dest: RobTag,
    /// Base register operand.
    pub base: Operand,
    /// Constant displacement added to the base.
    pub offset: i64,
    /// Latched effective address, once the base resolved.
    pub address: Option<i64>,
    /// Data to write, for STORE and PUSH.
    pub value: Option<Operand>,
}

impl LsbEntry {
    /// Returns true when the entry has everything it needs to complete:
    /// an address, and for stores a resolved value.
    pub const fn is_ready(&self) -> bool {
        if self.address.is_none() {
            return false;
        }
        match self.value {
            Some(v) => v.is_ready(),
            None => true,
        }
    }

    /// Latches `base + offset` once the base resolves. Returns true if the
    /// address became known in this call.
    pub const fn resolve_address(&mut self) -> bool {
        if self.address.is_some() {
            return false;
        }
        match self.base.value() {
            Some(base) => {
                self.address = Some(base.wrapping_add(self.offset));
                true
            }
            None => false,
        }
    }
}

/// The load-store buffer.
#[derive(Clone, Debug)]
pub struct LoadStoreBuffer {
    slots: Vec<Option<LsbEntry>>,
}

impl LoadStoreBuffer {
    /// Creates a buffer with `capacity` free slots.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    /// Number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Returns true if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Returns true if every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Places `entry` in the lowest free slot. Returns `None` if full.
    pub fn allocate(&mut self, entry: LsbEntry) -> Option<usize> {
        let idx = self.free_slot()?;
        self.fill(idx, entry);
        Some(idx)
    }

    /// Lowest free slot, if any.
    pub fn free_slot(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Places `entry` in slot `idx`, which must come from [`Self::free_slot`].
    pub fn fill(&mut self, idx: usize, entry: LsbEntry) {
        debug_assert!(self.slots[idx].is_none(), "slot {idx} occupied");
        self.slots[idx] = Some(entry);
    }

    /// Entry in slot `idx`.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&LsbEntry> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    /// Entry in slot `idx`, mutably.
    #[inline]
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut LsbEntry> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    /// Frees slot `idx`, returning its entry.
    pub fn release(&mut self, idx: usize) -> Option<LsbEntry> {
        self.slots.get_mut(idx).and_then(Option::take)
    }

    /// Resolves base and value operands waiting on `result`'s producer.
    pub fn broadcast(&mut self, result: &CdbResult) {
        for entry in self.slots.iter_mut().flatten() {
            entry.base.capture(result);
            if let Some(value) = entry.value.as_mut() {
                value.capture(result);
            }
        }
    }

    /// Frees every slot.
    pub fn flush(&mut self) {
        self.slots.fill(None);
    }

    /// Iterates `(slot, entry)` for occupied slots.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &LsbEntry)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|e| (i, e)))
    }

    /// Raw slot array, for inspection.
    pub fn slots(&self) -> &[Option<LsbEntry>] {
        &self.slots
    }
}
