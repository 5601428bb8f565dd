//! Commit log.
//!
//! One record per retired instruction, in commit order, describing exactly
//! which architectural state it changed. A mispredicted branch is squashed
//! rather than retired and leaves no record. Enabled by `general.commit_log`.

use std::fmt;

use serde::Serialize;

use crate::core::arch::{Flags, Register};

/// Architectural effects of one committed instruction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    /// Cycle in which the instruction committed.
    pub cycle: u64,
    /// Program address of the instruction.
    pub address: usize,
    /// Canonical assembly text.
    pub text: String,
    /// Register writes, in the order they were applied.
    pub reg_writes: Vec<(Register, i64)>,
    /// `(address, value)` written to data memory.
    pub mem_write: Option<(i64, i64)>,
    /// Flags written by CMP.
    pub flags: Option<Flags>,
}

impl fmt::Display for CommitRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>6}] {:>4}: {:<24}", self.cycle, self.address, self.text)?;
        for (reg, val) in &self.reg_writes {
            write!(f, " {reg}={val}")?;
        }
        if let Some((addr, val)) = self.mem_write {
            write!(f, " [{addr}]={val}")?;
        }
        if let Some(flags) = self.flags {
            write!(
                f,
                " ZF={} SF={} OF={}",
                u8::from(flags.zero),
                u8::from(flags.sign),
                u8::from(flags.overflow)
            )?;
        }
        Ok(())
    }
}
