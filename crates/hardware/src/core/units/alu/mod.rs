//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer datapath shared by the ALU/Branch and
//! Multiply/Divide reservation pools. Latency is modelled by the reservation
//! station countdown; the ALU itself is combinational.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Inc, Dec, Mul, Div, and the LEA/CMP adders
//! - [`logic`]:      And, Or, Xor, Not

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Bitwise logical operations (and, or, xor, not).
pub mod logic;

use crate::core::arch::Flags;
use crate::isa::Opcode;

/// Output of one ALU operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AluOutput {
    /// Register result.
    pub value: i64,
    /// Condition flags, produced only by CMP.
    pub flags: Option<Flags>,
}

/// Arithmetic Logic Unit for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer operation on captured operand values.
    ///
    /// # Arguments
    ///
    /// * `op` - The operation
    /// * `a`  - First operand (the left source, MOV's source, LEA's base)
    /// * `b`  - Second operand (the right source or LEA's offset)
    ///
    /// # Examples
    ///
    /// ```
    /// use tomasim_core::core::units::alu::Alu;
    /// use tomasim_core::isa::Opcode;
    ///
    /// assert_eq!(Alu::execute(Opcode::Add, 5, 3).value, 8);
    /// assert_eq!(Alu::execute(Opcode::Mov, 9, 0).value, 9);
    ///
    /// let cmp = Alu::execute(Opcode::Cmp, 4, 4);
    /// assert!(cmp.flags.unwrap().zero);
    /// ```
    pub const fn execute(op: Opcode, a: i64, b: i64) -> AluOutput {
        match op {
            Opcode::Cmp => AluOutput {
                value: arithmetic::execute(op, a, b),
                flags: Some(Flags::from_sub(a, b)),
            },
            Opcode::Mov => AluOutput {
                value: a,
                flags: None,
            },
            Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::Div
            | Opcode::Inc
            | Opcode::Dec
            | Opcode::Lea => AluOutput {
                value: arithmetic::execute(op, a, b),
                flags: None,
            },
            Opcode::And | Opcode::Or | Opcode::Xor | Opcode::Not => AluOutput {
                value: logic::execute(op, a, b),
                flags: None,
            },
            // Control flow and memory opcodes never reach the integer datapath.
            _ => AluOutput {
                value: 0,
                flags: None,
            },
        }
    }
}
