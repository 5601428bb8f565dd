//! Assembled instruction representation.
//!
//! An [`Instruction`] pairs an [`Opcode`] with exactly one [`Operands`] shape. The
//! assembler guarantees the two agree (a `Binary` shape only ever carries one of
//! ADD/SUB/MUL/DIV/AND/OR/XOR, and so on), so the pipeline stages can match on
//! the shape without re-validating.

use serde::Serialize;

use crate::core::arch::Register;
use crate::isa::opcode::Opcode;

/// A register or immediate source operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Source {
    /// Read a register.
    Reg(Register),
    /// A constant captured at assembly time.
    Imm(i64),
}

/// A `[base+offset]` memory operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct MemOperand {
    /// Base register.
    pub base: Register,
    /// Constant displacement.
    pub offset: i64,
}

/// Operand shape of an instruction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Operands {
    /// `dst = lhs op rhs` (ADD SUB MUL DIV AND OR XOR). The two-operand
    /// assembly form uses `dst` as `lhs`.
    Binary {
        /// Destination register.
        dst: Register,
        /// Left source register.
        lhs: Register,
        /// Right source.
        rhs: Source,
    },
    /// `lhs - rhs` for flags only (CMP).
    Compare {
        /// Left source register.
        lhs: Register,
        /// Right source.
        rhs: Source,
    },
    /// `dst = src` (MOV).
    Move {
        /// Destination register.
        dst: Register,
        /// Value to copy.
        src: Source,
    },
    /// `dst <- [mem]` or `dst = &[mem]` (LOAD, LEA).
    Address {
        /// Destination register.
        dst: Register,
        /// Effective address operand.
        mem: MemOperand,
    },
    /// `[mem] <- src` (STORE).
    Store {
        /// Register holding the value to store.
        src: Register,
        /// Effective address operand.
        mem: MemOperand,
    },
    /// Read-modify-write of one register (INC DEC NOT).
    Unary {
        /// Source and destination register.
        reg: Register,
    },
    /// `[RSP-8] <- src; RSP -= 8` (PUSH).
    Push {
        /// Register to push.
        src: Register,
    },
    /// `dst <- [RSP]; RSP += 8` (POP).
    Pop {
        /// Destination register.
        dst: Register,
    },
    /// Jcc, JMP and CALL to a resolved label.
    Branch {
        /// Label as written.
        label: String,
        /// Resolved program address.
        target: usize,
    },
    /// RET; the target is popped from the stack at run time.
    Return,
}

/// A fully resolved instruction. Immutable after assembly.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Instruction {
    /// Operation.
    pub opcode: Opcode,
    /// Operand shape.
    pub operands: Operands,
    /// Program-order index.
    pub address: usize,
    /// Normalized source text.
    pub text: String,
}

impl Instruction {
    /// Register the instruction writes, if any. RSP updates made implicitly by
    /// stack instructions are not included; see [`Opcode::touches_stack`].
    pub const fn dest(&self) -> Option<Register> {
        match self.operands {
            Operands::Binary { dst, .. }
            | Operands::Move { dst, .. }
            | Operands::Address { dst, .. }
            | Operands::Pop { dst } => Some(dst),
            Operands::Unary { reg } => Some(reg),
            Operands::Compare { .. }
            | Operands::Store { .. }
            | Operands::Push { .. }
            | Operands::Branch { .. }
            | Operands::Return => None,
        }
    }

    /// Static branch target, for Jcc/JMP/CALL.
    pub const fn target(&self) -> Option<usize> {
        match self.operands {
            Operands::Branch { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Address of the next instruction in program order.
    #[inline]
    pub const fn fallthrough(&self) -> usize {
        self.address + 1
    }

    /// True for jumps, CALL and RET.
    #[inline]
    pub const fn is_branch(&self) -> bool {
        self.opcode.is_branch()
    }

    /// True if the static branch target lies before this instruction.
    pub const fn is_backward(&self) -> bool {
        match self.target() {
            Some(t) => t < self.address,
            None => false,
        }
    }
}
