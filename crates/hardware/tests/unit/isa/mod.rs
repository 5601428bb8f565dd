//! Instruction set tests.

/// Two-pass assembler: shapes, labels and rejected input.
pub mod assembler;

/// Canonical disassembly of assembled programs.
pub mod disasm;
