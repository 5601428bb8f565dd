//! General-Purpose Register names.
//!
//! This module defines the sixteen architectural integer registers. It performs the following:
//! 1. **Naming:** Maps between assembly names (`RAX`, `R8`, ...) and register identities.
//! 2. **Indexing:** Gives every register a dense index for table storage.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::common::constants::NUM_REGISTERS;

/// An architectural integer register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Register {
    /// Accumulator.
    Rax,
    /// Base.
    Rbx,
    /// Counter.
    Rcx,
    /// Data.
    Rdx,
    /// Source index.
    Rsi,
    /// Destination index.
    Rdi,
    /// Frame pointer.
    Rbp,
    /// Stack pointer; implicitly read and written by PUSH, POP, CALL and RET.
    Rsp,
    /// General register 8.
    R8,
    /// General register 9.
    R9,
    /// General register 10.
    R10,
    /// General register 11.
    R11,
    /// General register 12.
    R12,
    /// General register 13.
    R13,
    /// General register 14.
    R14,
    /// General register 15.
    R15,
}

impl Register {
    /// All registers in index order.
    pub const ALL: [Self; NUM_REGISTERS] = [
        Self::Rax,
        Self::Rbx,
        Self::Rcx,
        Self::Rdx,
        Self::Rsi,
        Self::Rdi,
        Self::Rbp,
        Self::Rsp,
        Self::R8,
        Self::R9,
        Self::R10,
        Self::R11,
        Self::R12,
        Self::R13,
        Self::R14,
        Self::R15,
    ];

    /// The stack pointer register.
    pub const STACK_POINTER: Self = Self::Rsp;

    /// Dense index of the register, `0..NUM_REGISTERS`.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Upper-case assembly name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rax => "RAX",
            Self::Rbx => "RBX",
            Self::Rcx => "RCX",
            Self::Rdx => "RDX",
            Self::Rsi => "RSI",
            Self::Rdi => "RDI",
            Self::Rbp => "RBP",
            Self::Rsp => "RSP",
            Self::R8 => "R8",
            Self::R9 => "R9",
            Self::R10 => "R10",
            Self::R11 => "R11",
            Self::R12 => "R12",
            Self::R13 => "R13",
            Self::R14 => "R14",
            Self::R15 => "R15",
        }
    }
}

impl FromStr for Register {
    type Err = String;

    /// Parses a register name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|r| r.name() == upper)
            .ok_or(upper)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
