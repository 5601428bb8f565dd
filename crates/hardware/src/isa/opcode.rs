//! Opcodes.
//!
//! The closed set of operations understood by the pipeline, with the per-opcode
//! properties the issue, execute and commit stages switch on.

use std::fmt;

use serde::Serialize;

use crate::core::arch::Flags;

/// Resource pool an instruction occupies between issue and completion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Unit {
    /// ALU/Branch reservation stations.
    Alu,
    /// Multiply/Divide reservation stations.
    MulDiv,
    /// Load-store buffer.
    Memory,
}

/// An operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Opcode {
    /// Integer add.
    Add,
    /// Integer subtract.
    Sub,
    /// Integer multiply.
    Mul,
    /// Integer divide; division by zero yields zero.
    Div,
    /// Bitwise and.
    And,
    /// Bitwise or.
    Or,
    /// Bitwise exclusive or.
    Xor,
    /// Subtract for flags only.
    Cmp,
    /// Register or immediate copy.
    Mov,
    /// Effective address computation, no memory access.
    Lea,
    /// Memory read.
    Load,
    /// Memory write.
    Store,
    /// Increment in place.
    Inc,
    /// Decrement in place.
    Dec,
    /// Bitwise complement in place.
    Not,
    /// Push a register onto the stack.
    Push,
    /// Pop the stack into a register.
    Pop,
    /// Unconditional jump.
    Jmp,
    /// Jump if zero.
    Jz,
    /// Jump if not zero.
    Jnz,
    /// Jump if greater (signed).
    Jg,
    /// Jump if greater or equal (signed).
    Jge,
    /// Jump if less (signed).
    Jl,
    /// Jump if less or equal (signed).
    Jle,
    /// Push the return address and jump.
    Call,
    /// Pop the return address and jump to it.
    Ret,
}

impl Opcode {
    /// Every opcode, in declaration order.
    pub const ALL: [Self; 26] = [
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Cmp,
        Self::Mov,
        Self::Lea,
        Self::Load,
        Self::Store,
        Self::Inc,
        Self::Dec,
        Self::Not,
        Self::Push,
        Self::Pop,
        Self::Jmp,
        Self::Jz,
        Self::Jnz,
        Self::Jg,
        Self::Jge,
        Self::Jl,
        Self::Jle,
        Self::Call,
        Self::Ret,
    ];

    /// Upper-case assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Xor => "XOR",
            Self::Cmp => "CMP",
            Self::Mov => "MOV",
            Self::Lea => "LEA",
            Self::Load => "LOAD",
            Self::Store => "STORE",
            Self::Inc => "INC",
            Self::Dec => "DEC",
            Self::Not => "NOT",
            Self::Push => "PUSH",
            Self::Pop => "POP",
            Self::Jmp => "JMP",
            Self::Jz => "JZ",
            Self::Jnz => "JNZ",
            Self::Jg => "JG",
            Self::Jge => "JGE",
            Self::Jl => "JL",
            Self::Jle => "JLE",
            Self::Call => "CALL",
            Self::Ret => "RET",
        }
    }

    /// Looks up an upper-case mnemonic.
    pub fn from_mnemonic(m: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.mnemonic() == m)
    }

    /// Pool the instruction is dispatched to.
    pub const fn unit(self) -> Unit {
        match self {
            Self::Mul | Self::Div => Unit::MulDiv,
            Self::Load | Self::Store | Self::Push | Self::Pop => Unit::Memory,
            Self::Add
            | Self::Sub
            | Self::And
            | Self::Or
            | Self::Xor
            | Self::Cmp
            | Self::Mov
            | Self::Lea
            | Self::Inc
            | Self::Dec
            | Self::Not
            | Self::Jmp
            | Self::Jz
            | Self::Jnz
            | Self::Jg
            | Self::Jge
            | Self::Jl
            | Self::Jle
            | Self::Call
            | Self::Ret => Unit::Alu,
        }
    }

    /// Control-transfer instructions: every jump, CALL and RET.
    pub const fn is_branch(self) -> bool {
        matches!(
            self,
            Self::Jmp
                | Self::Jz
                | Self::Jnz
                | Self::Jg
                | Self::Jge
                | Self::Jl
                | Self::Jle
                | Self::Call
                | Self::Ret
        )
    }

    /// Control transfers that are always taken.
    pub const fn is_unconditional(self) -> bool {
        matches!(self, Self::Jmp | Self::Call | Self::Ret)
    }

    /// Instructions that read and write RSP implicitly.
    pub const fn touches_stack(self) -> bool {
        matches!(self, Self::Push | Self::Pop | Self::Call | Self::Ret)
    }

    /// Instructions whose commit writes data memory.
    pub const fn writes_memory(self) -> bool {
        matches!(self, Self::Store | Self::Push | Self::Call)
    }

    /// Resolves whether the branch is taken under `flags`.
    ///
    /// Non-branch opcodes are never taken.
    pub const fn is_taken(self, flags: Flags) -> bool {
        let Flags {
            zero,
            sign,
            overflow,
        } = flags;
        match self {
            Self::Jmp | Self::Call | Self::Ret => true,
            Self::Jz => zero,
            Self::Jnz => !zero,
            Self::Jg => !zero && sign == overflow,
            Self::Jge => sign == overflow,
            Self::Jl => sign != overflow,
            Self::Jle => zero || sign != overflow,
            _ => false,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
