//! Condition flags.
//!
//! The three single-bit flags written by CMP and read by conditional branches
//! when they resolve at commit.

use serde::Serialize;

/// Zero, sign and overflow flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Flags {
    /// Result was zero.
    pub zero: bool,
    /// Result was negative.
    pub sign: bool,
    /// Signed overflow occurred.
    pub overflow: bool,
}

impl Flags {
    /// Flags produced by the subtraction `lhs - rhs`.
    pub const fn from_sub(lhs: i64, rhs: i64) -> Self {
        let (diff, overflow) = lhs.overflowing_sub(rhs);
        Self {
            zero: diff == 0,
            sign: diff < 0,
            overflow,
        }
    }
}
