//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the pipeline. It provides:
//! 1. **Cycle and IPC:** Total cycles, committed instructions, and derived metrics (IPC, CPI).
//! 2. **Instruction mix:** Committed counts by category (ALU, mul/div, load, store, stack, branch).
//! 3. **Branch prediction:** Committed branches, mispredictions, squashed instructions.
//! 4. **Stalls:** Issue stalls broken down by the structure that was full.
//! 5. **Result bus:** Results deferred because their CDB lane was taken.

use std::io::{self, Write};

use serde::Serialize;

use crate::isa::{Opcode, Unit};

/// Issue stalls by cause. Each stalled cycle increments exactly one counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StallStats {
    /// The ROB tail slot was occupied.
    pub rob_full: u64,
    /// Every ALU/Branch reservation station was occupied.
    pub alu_rs_full: u64,
    /// Every Multiply/Divide reservation station was occupied.
    pub mul_div_rs_full: u64,
    /// Every load-store buffer slot was occupied.
    pub lsb_full: u64,
}

impl StallStats {
    /// Sum of all stall cycles.
    pub const fn total(&self) -> u64 {
        self.rob_full + self.alu_rs_full + self.mul_div_rs_full + self.lsb_full
    }
}

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Instructions dispatched into the ROB, including ones later squashed.
    pub instructions_issued: u64,
    /// Number of instructions committed (retired).
    pub instructions_retired: u64,

    /// Committed ALU instructions (arithmetic, logic, compare, move, LEA).
    pub inst_alu: u64,
    /// Committed MUL/DIV instructions.
    pub inst_mul_div: u64,
    /// Committed LOAD instructions.
    pub inst_load: u64,
    /// Committed STORE instructions.
    pub inst_store: u64,
    /// Committed PUSH/POP instructions.
    pub inst_stack: u64,
    /// Committed jumps, CALLs and RETs.
    pub inst_branch: u64,

    /// Number of branches whose predicted successor was correct.
    pub branch_predictions: u64,
    /// Number of branches whose predicted successor was wrong.
    pub branch_mispredictions: u64,
    /// In-flight instructions discarded by misprediction recovery.
    pub squashed: u64,

    /// Issue stalls by cause.
    pub stalls: StallStats,
    /// Finished results that lost their CDB lane and retried next cycle.
    pub cdb_conflicts: u64,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"instruction_mix"`, `"branch"`, `"stalls"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "instruction_mix", "branch", "stalls"];

impl SimStats {
    /// Instructions committed per cycle.
    pub fn ipc(&self) -> f64 {
        self.instructions_retired as f64 / self.cycles.max(1) as f64
    }

    /// Cycles per committed instruction.
    pub fn cpi(&self) -> f64 {
        self.cycles as f64 / self.instructions_retired.max(1) as f64
    }

    /// Fraction of committed branches that were predicted correctly, in percent.
    pub fn branch_accuracy(&self) -> f64 {
        let total = self.branch_predictions + self.branch_mispredictions;
        if total == 0 {
            0.0
        } else {
            100.0 * (self.branch_predictions as f64 / total as f64)
        }
    }

    /// Counts one committed instruction in the instruction mix.
    pub const fn record_commit(&mut self, op: Opcode) {
        self.instructions_retired += 1;
        match op.unit() {
            Unit::MulDiv => self.inst_mul_div += 1,
            Unit::Memory => match op {
                Opcode::Load => self.inst_load += 1,
                Opcode::Store => self.inst_store += 1,
                _ => self.inst_stack += 1,
            },
            Unit::Alu if op.is_branch() => self.inst_branch += 1,
            Unit::Alu => self.inst_alu += 1,
        }
    }

    /// Writes the requested statistics sections.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an
    /// empty slice to write all sections.
    ///
    /// # Errors
    ///
    /// Propagates failures of the underlying writer.
    pub fn write_sections<W: Write>(&self, out: &mut W, sections: &[String]) -> io::Result<()> {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let cyc = self.cycles.max(1) as f64;
        let instr = self.instructions_retired.max(1) as f64;

        writeln!(out, "\n==========================================================")?;
        writeln!(out, "TOMASULO PIPELINE STATISTICS")?;
        writeln!(out, "==========================================================")?;
        if want("summary") {
            writeln!(out, "sim_cycles               {}", self.cycles)?;
            writeln!(out, "sim_insts                {}", self.instructions_retired)?;
            writeln!(out, "sim_issued               {}", self.instructions_issued)?;
            writeln!(out, "sim_ipc                  {:.4}", self.ipc())?;
            writeln!(out, "sim_cpi                  {:.4}", self.cpi())?;
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("instruction_mix") {
            writeln!(out, "INSTRUCTION MIX")?;
            for (name, count) in [
                ("op.alu", self.inst_alu),
                ("op.mul_div", self.inst_mul_div),
                ("op.load", self.inst_load),
                ("op.store", self.inst_store),
                ("op.stack", self.inst_stack),
                ("op.branch", self.inst_branch),
            ] {
                writeln!(
                    out,
                    "  {name:<22} {count} ({:.2}%)",
                    (count as f64 / instr) * 100.0
                )?;
            }
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("branch") {
            writeln!(out, "BRANCH PREDICTION")?;
            writeln!(
                out,
                "  bp.lookups             {}",
                self.branch_predictions + self.branch_mispredictions
            )?;
            writeln!(out, "  bp.mispredicts         {}", self.branch_mispredictions)?;
            writeln!(out, "  bp.accuracy            {:.2}%", self.branch_accuracy())?;
            writeln!(out, "  bp.squashed            {}", self.squashed)?;
            writeln!(out, "----------------------------------------------------------")?;
        }
        if want("stalls") {
            writeln!(out, "ISSUE STALLS")?;
            for (name, count) in [
                ("stalls.rob_full", self.stalls.rob_full),
                ("stalls.alu_rs_full", self.stalls.alu_rs_full),
                ("stalls.mul_div_rs_full", self.stalls.mul_div_rs_full),
                ("stalls.lsb_full", self.stalls.lsb_full),
            ] {
                writeln!(
                    out,
                    "  {name:<22} {count} ({:.2}%)",
                    (count as f64 / cyc) * 100.0
                )?;
            }
            writeln!(out, "  cdb.conflicts          {}", self.cdb_conflicts)?;
        }
        writeln!(out, "==========================================================")?;
        Ok(())
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout cannot be written.
    pub fn print_sections(&self, sections: &[String]) -> io::Result<()> {
        self.write_sections(&mut io::stdout().lock(), sections)
    }

    /// Prints all statistics sections to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout cannot be written.
    pub fn print(&self) -> io::Result<()> {
        self.print_sections(&[])
    }
}
