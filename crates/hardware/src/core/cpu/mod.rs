//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, the container for all
//! architectural state the pipeline reads and commits to:
//! 1. **State Management:** Register file, flags and the fetch PC.
//! 2. **Memory:** Sparse word-addressed data memory.
//! 3. **Program:** The assembled instruction stream being executed.
//! 4. **Bookkeeping:** Statistics, the optional commit log and the fatal condition.
//!
//! Speculative state (ROB, RAT, reservation stations, LSB, CDB) lives in the
//! pipeline, not here.

/// Commit log records.
pub mod commit_log;

/// Sparse data memory.
pub mod memory;

use std::fmt;

use crate::common::RegisterFile;
use crate::config::Config;
use crate::core::arch::Register;
use crate::isa::Program;
use crate::stats::SimStats;

pub use self::commit_log::CommitRecord;
pub use self::memory::DataMemory;

/// Condition that stops the simulation before the program drains.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fatal {
    /// The configured cycle limit was reached.
    CycleLimit(u64),
}

impl fmt::Display for Fatal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CycleLimit(limit) => write!(f, "cycle limit of {limit} reached"),
        }
    }
}

/// Main CPU structure containing all architectural state.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// Committed registers and flags.
    pub regs: RegisterFile,
    /// Committed data memory.
    pub memory: DataMemory,
    /// Address of the next instruction to dispatch.
    pub pc: usize,
    /// Loaded program.
    pub program: Program,
    /// Performance statistics.
    pub stats: SimStats,
    /// Retired instructions, oldest first, when logging is enabled.
    pub commit_log: Vec<CommitRecord>,
    /// Whether commits are recorded in `commit_log`.
    pub log_commits: bool,
    /// Set once a fatal condition stops the simulation.
    pub fatal: Option<Fatal>,
    /// RSP value after reset.
    pub initial_sp: i64,
    /// Optional cycle limit.
    pub max_cycles: Option<u64>,
}

impl Cpu {
    /// Creates a new CPU with an empty program.
    ///
    /// # Arguments
    ///
    /// * `config` - The simulator configuration parameters.
    pub fn new(config: &Config) -> Self {
        let mut cpu = Self {
            regs: RegisterFile::new(),
            memory: DataMemory::new(),
            pc: 0,
            program: Program::default(),
            stats: SimStats::default(),
            commit_log: Vec::new(),
            log_commits: config.general.commit_log,
            fatal: None,
            initial_sp: config.general.initial_sp,
            max_cycles: config.general.max_cycles,
        };
        cpu.reset();
        cpu
    }

    /// Clears all architectural state, keeping the loaded program.
    pub fn reset(&mut self) {
        self.regs = RegisterFile::new();
        self.regs.write(Register::STACK_POINTER, self.initial_sp);
        self.memory.clear();
        self.pc = 0;
        self.stats = SimStats::default();
        self.commit_log.clear();
        self.fatal = None;
    }

    /// Returns true once fetch has run past the last instruction.
    #[inline]
    pub fn fetch_done(&self) -> bool {
        self.pc >= self.program.len()
    }
}
