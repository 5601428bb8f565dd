//! Reorder Buffer (ROB) for in-order commit.
//!
//! The ROB is a circular buffer that tracks in-flight instructions from issue
//! through commit. It provides:
//! 1. **Allocation:** Claims the tail slot for each dispatched instruction; the slot
//!    index doubles as the rename tag.
//! 2. **Completion:** Records values, addresses, stack-pointer results and flags
//!    delivered by writeback (or by the LSB for stores).
//! 3. **In-order Commit:** Retires instructions from the head in program order.
//! 4. **Flush:** Squashes every in-flight entry after a misprediction.
//!
//! The slots between head and tail (modulo capacity) are exactly the in-flight
//! instructions, oldest first.

use crate::core::arch::Flags;
use crate::isa::Instruction;

/// ROB slot index, used as the rename tag for the instruction in that slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RobTag(pub usize);

/// Lifecycle state of an ROB entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RobState {
    /// Dispatched, waiting for operands or a functional unit.
    #[default]
    Issued,
    /// Counting down in a reservation station or resolving in the LSB.
    Executing,
    /// Result delivered over the CDB.
    WrittenBack,
    /// Retired. Only the entry handed back by [`Rob::commit_head`] carries
    /// this state; its slot is freed in the same step, so no occupied slot
    /// is ever observed as committed.
    Committed,
}

/// A single entry in the Reorder Buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RobEntry {
    /// The instruction in this slot.
    pub inst: Instruction,
    /// Current lifecycle state.
    pub state: RobState,
    /// The entry may commit once it reaches the head.
    pub ready: bool,
    /// Register result (or, for STORE/PUSH/CALL, the value written to memory).
    pub value: i64,
    /// Effective memory address for memory and stack operations.
    pub address: Option<i64>,
    /// New RSP for PUSH/POP/CALL/RET.
    pub stack_pointer: Option<i64>,
    /// Flags produced by CMP.
    pub flags: Option<Flags>,
    /// Resolved branch direction, filled in at commit.
    pub taken: Option<bool>,
    /// Resolved-correct successor address, filled in at commit.
    pub target: Option<usize>,
    /// Address fetch continued at after this instruction was dispatched.
    pub predicted_next: usize,
}

impl RobEntry {
    fn new(inst: Instruction, predicted_next: usize) -> Self {
        Self {
            inst,
            state: RobState::Issued,
            ready: false,
            value: 0,
            address: None,
            stack_pointer: None,
            flags: None,
            taken: None,
            target: None,
            predicted_next,
        }
    }

    /// Returns true once a result has been delivered, even if the entry is
    /// not yet allowed to commit (branches defer `ready` to commit).
    #[inline]
    pub const fn has_result(&self) -> bool {
        self.ready || matches!(self.state, RobState::WrittenBack)
    }
}

/// Reorder Buffer: circular buffer for in-order commit.
#[derive(Clone, Debug)]
pub struct Rob {
    /// Fixed-size slot array; `None` marks a free slot.
    entries: Vec<Option<RobEntry>>,
    /// Index of the oldest entry (commit point).
    head: usize,
    /// Index where the next entry will be allocated.
    tail: usize,
    /// Number of occupied entries.
    count: usize,
}

impl Rob {
    /// Creates a new ROB with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let mut entries = Vec::with_capacity(capacity);
        entries.resize_with(capacity, || None);
        Self {
            entries,
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Returns the ROB capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of occupied entries.
    #[inline]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the ROB is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns true if the tail slot is occupied.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.entries.get(self.tail).is_none_or(Option::is_some)
    }

    /// Index of the oldest entry.
    #[inline]
    pub const fn head(&self) -> usize {
        self.head
    }

    /// Index the next allocation will use.
    #[inline]
    pub const fn tail(&self) -> usize {
        self.tail
    }

    /// Allocates the tail slot. Returns `None` if the ROB is full.
    pub fn allocate(&mut self, inst: Instruction, predicted_next: usize) -> Option<RobTag> {
        if self.is_full() {
            return None;
        }
        let tag = RobTag(self.tail);
        self.entries[self.tail] = Some(RobEntry::new(inst, predicted_next));
        self.tail = (self.tail + 1) % self.entries.len();
        self.count += 1;
        Some(tag)
    }

    /// Finds the entry in slot `tag`.
    #[inline]
    pub fn get(&self, tag: RobTag) -> Option<&RobEntry> {
        self.entries.get(tag.0).and_then(Option::as_ref)
    }

    /// Finds the entry in slot `tag`, mutably.
    #[inline]
    pub fn get_mut(&mut self, tag: RobTag) -> Option<&mut RobEntry> {
        self.entries.get_mut(tag.0).and_then(Option::as_mut)
    }

    /// Tag of the head entry, if the ROB is non-empty.
    pub fn head_tag(&self) -> Option<RobTag> {
        (self.count > 0).then_some(RobTag(self.head))
    }

    /// Returns a reference to the head entry (oldest), if the ROB is non-empty.
    pub fn peek_head(&self) -> Option<&RobEntry> {
        self.get(RobTag(self.head))
    }

    /// Returns a mutable reference to the head entry.
    pub fn peek_head_mut(&mut self) -> Option<&mut RobEntry> {
        self.get_mut(RobTag(self.head))
    }

    /// Retires the head entry if it is ready, freeing its slot.
    ///
    /// Returns `None` if the ROB is empty or the head is not ready.
    pub fn commit_head(&mut self) -> Option<RobEntry> {
        if !self.peek_head()?.ready {
            return None;
        }
        let mut entry = self.entries[self.head].take()?;
        entry.state = RobState::Committed;
        self.head = (self.head + 1) % self.entries.len();
        self.count -= 1;
        Some(entry)
    }

    /// Distance of `tag` from the head in program order. Smaller is older.
    #[inline]
    pub fn age(&self, tag: RobTag) -> usize {
        let cap = self.entries.len();
        (tag.0 + cap - self.head) % cap
    }

    /// Flushes all entries from the ROB.
    pub fn flush_all(&mut self) {
        for entry in &mut self.entries {
            *entry = None;
        }
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }

    /// Iterates occupied entries from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = (RobTag, &RobEntry)> + '_ {
        let cap = self.entries.len();
        (0..self.count).filter_map(move |i| {
            let idx = (self.head + i) % cap;
            self.entries[idx].as_ref().map(|e| (RobTag(idx), e))
        })
    }

    /// Raw slot array in index order, for inspection.
    pub fn slots(&self) -> &[Option<RobEntry>] {
        &self.entries
    }
}
