//! Core processor implementation.
//!
//! This module contains the main CPU implementation including the instruction
//! pipeline, execution units and architectural register definitions.

/// Architectural components (register names, condition flags).
pub mod arch;

/// CPU architectural state.
pub mod cpu;

/// Out-of-order pipeline (ROB, RAT, stations, CDB, stages).
pub mod pipeline;

/// Execution units (ALU, branch predictor).
pub mod units;

pub use self::cpu::Cpu;
