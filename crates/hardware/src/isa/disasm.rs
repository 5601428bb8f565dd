//! Instruction disassembler.
//!
//! Renders assembled instructions back to canonical assembly text for
//! tracing, commit logs and test diagnostics. The canonical form always uses
//! the three-operand arithmetic shape and an explicit signed memory offset.

use std::fmt;

use crate::isa::instruction::{Instruction, MemOperand, Operands, Source};

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reg(r) => write!(f, "{r}"),
            Self::Imm(v) => write!(f, "{v}"),
        }
    }
}

impl fmt::Display for MemOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.offset < 0 {
            write!(f, "[{}-{}]", self.base, self.offset.unsigned_abs())
        } else {
            write!(f, "[{}+{}]", self.base, self.offset)
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.opcode;
        match &self.operands {
            Operands::Binary { dst, lhs, rhs } => write!(f, "{op} {dst}, {lhs}, {rhs}"),
            Operands::Compare { lhs, rhs } => write!(f, "{op} {lhs}, {rhs}"),
            Operands::Move { dst, src } => write!(f, "{op} {dst}, {src}"),
            Operands::Address { dst, mem } => write!(f, "{op} {dst}, {mem}"),
            Operands::Store { src, mem } => write!(f, "{op} {src}, {mem}"),
            Operands::Unary { reg } => write!(f, "{op} {reg}"),
            Operands::Push { src } => write!(f, "{op} {src}"),
            Operands::Pop { dst } => write!(f, "{op} {dst}"),
            Operands::Branch { label, .. } => write!(f, "{op} {label}"),
            Operands::Return => write!(f, "{op}"),
        }
    }
}
