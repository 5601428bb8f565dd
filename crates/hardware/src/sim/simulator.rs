//! Simulator: owns both the CPU and the pipeline side-by-side.
//!
//! The CPU holds committed architectural state; the pipeline holds everything
//! speculative. The simulator exposes the two mutating entry points, `load`
//! and `step`, plus read-only views of every internal table.

use tracing::{debug, warn};

use crate::common::RegisterFile;
use crate::common::error::ParseError;
use crate::config::Config;
use crate::core::Cpu;
use crate::core::arch::Flags;
use crate::core::cpu::{CommitRecord, DataMemory, Fatal};
use crate::core::pipeline::lsb::LoadStoreBuffer;
use crate::core::pipeline::rat::Rat;
use crate::core::pipeline::reservation::ReservationStations;
use crate::core::pipeline::rob::Rob;
use crate::core::pipeline::Pipeline;
use crate::isa::{Program, assemble};
use crate::sim::snapshot::Snapshot;
use crate::stats::SimStats;

/// Top-level simulator: CPU architectural state + pipeline.
#[derive(Clone, Debug)]
pub struct Simulator {
    /// CPU architectural state (registers, memory, program, stats).
    pub cpu: Cpu,
    /// Out-of-order pipeline.
    pub pipeline: Pipeline,
    config: Config,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    /// Creates a simulator with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a simulator with the given configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            cpu: Cpu::new(&config),
            pipeline: Pipeline::new(&config),
            config,
        }
    }

    /// Assembles `text` and makes it the current program.
    ///
    /// All simulator state is reset first, whether or not assembly succeeds.
    ///
    /// # Errors
    ///
    /// Returns the [`ParseError`] of the first rejected line; the simulator is
    /// then left reset with an empty program.
    pub fn load(&mut self, text: &str) -> Result<(), ParseError> {
        self.reset();
        let program = assemble(text)?;
        debug!(
            instructions = program.len(),
            labels = program.labels.len(),
            "program loaded"
        );
        self.cpu.program = program;
        Ok(())
    }

    /// Returns to the power-on state: empty program, zeroed registers, empty
    /// memory and an empty pipeline. The configuration is kept.
    pub fn reset(&mut self) {
        self.cpu.program = Program::default();
        self.cpu.reset();
        self.pipeline = Pipeline::new(&self.config);
    }

    /// Advances the simulator by one clock cycle. Does nothing once finished.
    pub fn step(&mut self) {
        if self.is_finished() {
            return;
        }
        self.pipeline.tick(&mut self.cpu);

        if let Some(limit) = self.cpu.max_cycles
            && self.cpu.stats.cycles >= limit
            && !self.is_finished()
        {
            warn!(cycle = self.cpu.stats.cycles, pc = self.cpu.pc, "cycle limit reached");
            self.cpu.fatal = Some(Fatal::CycleLimit(limit));
        }
    }

    /// Steps until the simulation finishes.
    pub fn run(&mut self) -> &SimStats {
        while !self.is_finished() {
            self.step();
        }
        &self.cpu.stats
    }

    /// Finished when a fatal condition was raised, or nothing is in flight and
    /// the PC is past the end of the program.
    pub fn is_finished(&self) -> bool {
        self.cpu.fatal.is_some() || (self.pipeline.is_drained() && self.cpu.fetch_done())
    }

    /// Active configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Committed registers and flags.
    pub const fn registers(&self) -> &RegisterFile {
        &self.cpu.regs
    }

    /// Committed condition flags.
    pub const fn flags(&self) -> Flags {
        self.cpu.regs.flags
    }

    /// Reorder buffer, including head and tail indices.
    pub const fn rob(&self) -> &Rob {
        &self.pipeline.rob
    }

    /// ALU/Branch reservation stations.
    pub const fn alu_rs(&self) -> &ReservationStations {
        &self.pipeline.stations.alu
    }

    /// Multiply/Divide reservation stations.
    pub const fn mul_div_rs(&self) -> &ReservationStations {
        &self.pipeline.stations.mul_div
    }

    /// Load-store buffer.
    pub const fn lsb(&self) -> &LoadStoreBuffer {
        &self.pipeline.stations.lsb
    }

    /// Register alias table.
    pub const fn rat(&self) -> &Rat {
        &self.pipeline.rat
    }

    /// Committed data memory.
    pub const fn memory(&self) -> &DataMemory {
        &self.cpu.memory
    }

    /// Performance counters.
    pub const fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }

    /// Next fetch address.
    pub const fn pc(&self) -> usize {
        self.cpu.pc
    }

    /// Cycles simulated since the last reset.
    pub const fn cycle(&self) -> u64 {
        self.cpu.stats.cycles
    }

    /// Instructions committed since the last reset.
    pub const fn committed(&self) -> u64 {
        self.cpu.stats.instructions_retired
    }

    /// Branch mispredictions since the last reset.
    pub const fn mispredictions(&self) -> u64 {
        self.cpu.stats.branch_mispredictions
    }

    /// Loaded program.
    pub const fn program(&self) -> &Program {
        &self.cpu.program
    }

    /// Commit log (empty unless `general.commit_log` is set).
    pub fn commit_log(&self) -> &[CommitRecord] {
        &self.cpu.commit_log
    }

    /// Fatal condition, if one stopped the run.
    pub const fn fatal(&self) -> Option<Fatal> {
        self.cpu.fatal
    }

    /// Owned copy of architectural state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            cycle: self.cycle(),
            pc: self.cpu.pc,
            registers: self.cpu.regs.iter().collect(),
            flags: self.cpu.regs.flags,
            memory: self.cpu.memory.clone(),
            stats: self.cpu.stats,
            finished: self.is_finished(),
            fatal: self.cpu.fatal.map(|f| f.to_string()),
        }
    }
}
