//! Reservation stations.
//!
//! A pool of fixed slots, each holding one dispatched operation with its two
//! source operands and a latency countdown. The engine keeps two pools: the
//! ALU/Branch pool and the Multiply/Divide pool.

use crate::core::pipeline::cdb::CdbResult;
use crate::core::pipeline::operand::Operand;
use crate::core::pipeline::rob::RobTag;
use crate::isa::Opcode;

/// One occupied reservation station.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RsEntry {
    /// Operation to perform.
    pub op: Opcode,
    /// First source.
    pub lhs: Operand,
    /// Second source.
    pub rhs: Operand,
    /// ROB slot receiving the result.
    pub dest: RobTag,
    /// Cycles left before the result is produced.
    pub remaining: u32,
}

impl RsEntry {
    /// Returns true when both operands are resolved.
    #[inline]
    pub const fn operands_ready(&self) -> bool {
        self.lhs.is_ready() && self.rhs.is_ready()
    }
}

/// A pool of reservation stations.
#[derive(Clone, Debug)]
pub struct ReservationStations {
    slots: Vec<Option<RsEntry>>,
}

impl ReservationStations {
    /// Creates a pool with `capacity` free slots.
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

    /// Places `entry` in the lowest free slot. Returns the slot index, or
    /// `None` if the pool is full.
    pub fn allocate(&mut self, entry: RsEntry) -> Option<usize> {
        let idx = self.free_slot()?;
        self.fill(idx, entry);
        Some(idx)
    }

    /// Lowest free slot, if any.
    pub fn free_slot(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Places `entry` in slot `idx`, which must come from [`Self::free_slot`].
    pub fn fill(&mut self, idx: usize, entry: RsEntry) {
        debug_assert!(self.slots[idx].is_none(), "slot {idx} occupied");
        self.slots[idx] = Some(entry);
    }

    /// Entry in slot `idx`.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&RsEntry> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    /// Entry in slot `idx`, mutably.
    #[inline]
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut RsEntry> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    /// Frees slot `idx`, returning its entry.
    pub fn release(&mut self, idx: usize) -> Option<RsEntry> {
        self.slots.get_mut(idx).and_then(Option::take)
    }

    /// Resolves every operand waiting on `result`'s producer.
    pub fn broadcast(&mut self, result: &CdbResult) {
        for entry in self.slots.iter_mut().flatten() {
            entry.lhs.capture(result);
            entry.rhs.capture(result);
        }
    }

    /// Frees every slot.
    pub fn flush(&mut self) {
        self.slots.fill(None);
    }

    /// Iterates `(slot, entry)` for occupied slots.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &RsEntry)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|e| (i, e)))
    }

    /// Raw slot array, for inspection.
    pub fn slots(&self) -> &[Option<RsEntry>] {
        &self.slots
    }
}
