//! Architectural Register File.
//!
//! This module provides the `RegisterFile` struct, the committed register and flag state.
//! It provides:
//! 1. **Storage:** Sixteen 64-bit integer registers plus the zero/sign/overflow flags.
//! 2. **Typed Access:** Reads and writes by [`Register`].
//! 3. **Named Access:** Reads and writes by assembly name, failing with
//!    [`SimError::InvalidRegister`] for names outside the file.
//!
//! Only the commit stage writes here; everything in flight lives in the ROB.

use serde::Serialize;

use crate::common::constants::NUM_REGISTERS;
use crate::common::error::SimError;
use crate::core::arch::flags::Flags;
use crate::core::arch::gpr::Register;

/// Committed register and flag state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RegisterFile {
    gpr: [i64; NUM_REGISTERS],
    /// Condition flags as of the last committed CMP.
    pub flags: Flags,
}

impl RegisterFile {
    /// Creates a register file with every register and flag cleared.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a register.
    #[inline]
    pub const fn read(&self, reg: Register) -> i64 {
        self.gpr[reg.index()]
    }

    /// Writes a register.
    #[inline]
    pub fn write(&mut self, reg: Register, val: i64) {
        self.gpr[reg.index()] = val;
    }

    /// Reads a register by its assembly name.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidRegister`] if `name` is not a register.
    pub fn read_by_name(&self, name: &str) -> Result<i64, SimError> {
        let reg = name.parse::<Register>().map_err(SimError::InvalidRegister)?;
        Ok(self.read(reg))
    }

    /// Writes a register by its assembly name.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidRegister`] if `name` is not a register.
    pub fn write_by_name(&mut self, name: &str, val: i64) -> Result<(), SimError> {
        let reg = name.parse::<Register>().map_err(SimError::InvalidRegister)?;
        self.write(reg, val);
        Ok(())
    }

    /// Iterates `(register, value)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Register, i64)> + '_ {
        Register::ALL.into_iter().map(|r| (r, self.read(r)))
    }

    /// Dumps all registers and flags to stdout, two per line.
    pub fn dump(&self) {
        for pair in Register::ALL.chunks(2) {
            let line: Vec<String> = pair
                .iter()
                .map(|r| format!("{:<3}={:#018x}", r.name(), self.read(*r)))
                .collect();
            println!("{}", line.join(" "));
        }
        println!(
            "ZF={} SF={} OF={}",
            u8::from(self.flags.zero),
            u8::from(self.flags.sign),
            u8::from(self.flags.overflow)
        );
    }
}
