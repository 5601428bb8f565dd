//! Owned, serializable view of architectural state.
//!
//! Taken at any point with [`Simulator::snapshot`](crate::sim::Simulator::snapshot);
//! the CLI prints it as JSON after a run.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::arch::{Flags, Register};
use crate::core::cpu::DataMemory;
use crate::stats::SimStats;

/// Architectural state and counters at one instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Cycles simulated so far.
    pub cycle: u64,
    /// Next fetch address.
    pub pc: usize,
    /// Committed register values by name.
    pub registers: BTreeMap<Register, i64>,
    /// Committed condition flags.
    pub flags: Flags,
    /// Every written memory word.
    pub memory: DataMemory,
    /// Performance counters.
    pub stats: SimStats,
    /// Whether the simulation has finished.
    pub finished: bool,
    /// Fatal condition, if one stopped the run.
    pub fatal: Option<String>,
}
