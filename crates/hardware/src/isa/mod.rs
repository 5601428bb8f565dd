//! Instruction Set Definitions.
//!
//! Contains the opcode set, the assembled instruction representation, the
//! text assembler and the disassembler used for traces.
//!
//! # Instruction set
//!
//! Arithmetic and logic (`ADD SUB MUL DIV AND OR XOR`, `INC DEC NOT`), compare
//! (`CMP`), moves (`MOV LEA`), memory (`LOAD STORE PUSH POP`) and control flow
//! (`JMP JZ JNZ JG JGE JL JLE CALL RET`) over sixteen 64-bit registers.

/// Two-pass text assembler and program image.
pub mod asm;

/// Instruction disassembler for tracing and diagnostics.
pub mod disasm;

/// Assembled instruction and operand shapes.
pub mod instruction;

/// Opcodes and their pipeline properties.
pub mod opcode;

pub use asm::{Program, assemble};
pub use instruction::{Instruction, MemOperand, Operands, Source};
pub use opcode::{Opcode, Unit};
