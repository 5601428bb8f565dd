//! Source operands captured at dispatch.
//!
//! An operand is either a resolved value or a tag naming the ROB slot (and
//! result port) that will produce it. Waiting operands resolve when the
//! producer's result is broadcast on the CDB.

use crate::core::pipeline::cdb::CdbResult;
use crate::core::pipeline::rob::{RobEntry, RobTag};

/// Which result of the producer an operand waits for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Port {
    /// The primary (register) result.
    Value,
    /// The new stack pointer of PUSH/POP/CALL/RET.
    StackPointer,
}

/// Producer reference held by a waiting operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tag {
    /// Producer ROB slot.
    pub rob: RobTag,
    /// Producer result port.
    pub port: Port,
}

impl Tag {
    /// Picks this tag's result out of a broadcast, if it is the producer's.
    pub const fn select(self, result: &CdbResult) -> Option<i64> {
        if self.rob.0 != result.rob.0 {
            return None;
        }
        match self.port {
            Port::Value => Some(result.value),
            Port::StackPointer => result.stack_pointer,
        }
    }

    /// Picks this tag's result out of a ROB entry that already has one.
    pub const fn select_from(self, entry: &RobEntry) -> Option<i64> {
        if !entry.has_result() {
            return None;
        }
        match self.port {
            Port::Value => Some(entry.value),
            Port::StackPointer => entry.stack_pointer,
        }
    }
}

/// A value-or-tag source operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    /// Resolved.
    Ready(i64),
    /// Waiting for a producer's broadcast.
    Waiting(Tag),
}

impl Operand {
    /// Resolved value, if any.
    #[inline]
    pub const fn value(self) -> Option<i64> {
        match self {
            Self::Ready(v) => Some(v),
            Self::Waiting(_) => None,
        }
    }

    /// Returns true if the operand is resolved.
    #[inline]
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Resolves the operand if `result` comes from its producer.
    pub fn capture(&mut self, result: &CdbResult) {
        if let Self::Waiting(tag) = *self
            && let Some(v) = tag.select(result)
        {
            *self = Self::Ready(v);
        }
    }
}
