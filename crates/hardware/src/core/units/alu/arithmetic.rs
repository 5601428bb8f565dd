//! ALU arithmetic operations.
//!
//! Integer addition, subtraction, increment/decrement, multiplication and
//! division on 64-bit two's-complement values. Every operation wraps on
//! overflow; division by zero yields zero and `i64::MIN / -1` wraps to
//! `i64::MIN`.

use crate::isa::Opcode;

/// Executes an integer arithmetic operation.
///
/// # Arguments
///
/// * `op` - The operation (must be an arithmetic opcode).
/// * `a`  - First operand.
/// * `b`  - Second operand; ignored by INC and DEC.
///
/// # Returns
///
/// The wrapped 64-bit result, or `0` for non-arithmetic opcodes.
pub const fn execute(op: Opcode, a: i64, b: i64) -> i64 {
    match op {
        Opcode::Add | Opcode::Lea => a.wrapping_add(b),
        Opcode::Sub | Opcode::Cmp => a.wrapping_sub(b),
        Opcode::Inc => a.wrapping_add(1),
        Opcode::Dec => a.wrapping_sub(1),
        Opcode::Mul => a.wrapping_mul(b),
        Opcode::Div => {
            if b == 0 {
                0
            } else {
                a.wrapping_div(b)
            }
        }
        _ => 0,
    }
}
