//! ALU bitwise operations: and, or, xor, not.

use crate::isa::Opcode;

/// Executes a bitwise operation; `b` is ignored by NOT.
///
/// Returns `0` for non-logic opcodes.
pub const fn execute(op: Opcode, a: i64, b: i64) -> i64 {
    match op {
        Opcode::And => a & b,
        Opcode::Or => a | b,
        Opcode::Xor => a ^ b,
        Opcode::Not => !a,
        _ => 0,
    }
}
