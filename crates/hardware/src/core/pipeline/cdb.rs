//! Common Data Bus (CDB).
//!
//! Execute deposits finished results here; the next cycle's writeback drains
//! the bus, records each result in the ROB and broadcasts it to waiting
//! operands. The bus has one lane per functional-unit class, so at most one
//! result of each class is carried per cycle.

use crate::core::arch::Flags;
use crate::core::pipeline::rob::RobTag;
use crate::isa::Opcode;

/// Functional-unit class; each owns one CDB lane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FuClass {
    /// Integer ALU (arithmetic, logic, compare, move, LEA).
    Alu,
    /// Branch unit (jumps, CALL, RET).
    Branch,
    /// Multiplier/divider.
    MulDiv,
    /// Load-store buffer.
    Memory,
}

impl FuClass {
    /// Number of CDB lanes.
    pub const COUNT: usize = 4;

    /// Class that executes `op`.
    pub const fn of(op: Opcode) -> Self {
        match op {
            Opcode::Mul | Opcode::Div => Self::MulDiv,
            Opcode::Load | Opcode::Store | Opcode::Push | Opcode::Pop => Self::Memory,
            op if op.is_branch() => Self::Branch,
            _ => Self::Alu,
        }
    }

    const fn lane(self) -> usize {
        match self {
            Self::Alu => 0,
            Self::Branch => 1,
            Self::MulDiv => 2,
            Self::Memory => 3,
        }
    }
}

/// A finished result travelling on the bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CdbResult {
    /// Producing unit class.
    pub class: FuClass,
    /// ROB slot of the producer.
    pub rob: RobTag,
    /// Primary result.
    pub value: i64,
    /// Flags (CMP only).
    pub flags: Option<Flags>,
    /// New RSP (PUSH, POP, CALL, RET).
    pub stack_pointer: Option<i64>,
    /// Memory address touched (loads, stack operations).
    pub address: Option<i64>,
}

impl CdbResult {
    /// A plain value result with no side outputs.
    pub const fn value(class: FuClass, rob: RobTag, value: i64) -> Self {
        Self {
            class,
            rob,
            value,
            flags: None,
            stack_pointer: None,
            address: None,
        }
    }
}

/// The bus: one optional result per lane.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cdb {
    lanes: [Option<CdbResult>; FuClass::COUNT],
}

impl Cdb {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `result` on its class lane.
    ///
    /// Returns `false` if the lane is already taken this cycle; the caller
    /// keeps the result and retries next cycle.
    pub fn post(&mut self, result: CdbResult) -> bool {
        let lane = &mut self.lanes[result.class.lane()];
        if lane.is_some() {
            return false;
        }
        *lane = Some(result);
        true
    }

    /// Returns true if `class` already carries a result this cycle.
    #[inline]
    pub fn is_busy(&self, class: FuClass) -> bool {
        self.lanes[class.lane()].is_some()
    }

    /// Removes and returns every result on the bus, leaving it empty.
    pub fn drain(&mut self) -> Vec<CdbResult> {
        std::mem::take(&mut self.lanes).into_iter().flatten().collect()
    }

    /// Results currently on the bus.
    pub fn iter(&self) -> impl Iterator<Item = &CdbResult> + '_ {
        self.lanes.iter().flatten()
    }

    /// Returns true if no lane carries a result.
    pub fn is_empty(&self) -> bool {
        self.lanes.iter().all(Option::is_none)
    }

    /// Discards everything on the bus.
    pub fn clear(&mut self) {
        self.lanes = [None; FuClass::COUNT];
    }
}
