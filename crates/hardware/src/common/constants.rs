//! Global System Constants.
//!
//! This module defines system-wide constants used across the simulator. It includes:
//! 1. **Structure Sizes:** Default capacities of the ROB, reservation stations and LSB.
//! 2. **Latencies:** Default functional-unit latencies in cycles.
//! 3. **Stack Constants:** Width of one stack slot.

/// Number of architectural integer registers.
pub const NUM_REGISTERS: usize = 16;

/// Default reorder buffer capacity.
pub const ROB_SIZE: usize = 32;

/// Default number of ALU/Branch reservation stations.
pub const ALU_RS_SIZE: usize = 6;

/// Default number of Multiply/Divide reservation stations.
pub const MUL_DIV_RS_SIZE: usize = 3;

/// Default number of load-store buffer entries.
pub const LSB_SIZE: usize = 6;

/// Default Return Address Stack depth.
pub const RAS_SIZE: usize = 8;

/// Default latency of ALU and branch operations, in cycles.
pub const ALU_LATENCY: u32 = 2;

/// Default latency of MUL, in cycles.
pub const MUL_LATENCY: u32 = 8;

/// Default latency of DIV, in cycles.
pub const DIV_LATENCY: u32 = 20;

/// Bytes occupied by one PUSH/CALL stack slot.
pub const STACK_SLOT: i64 = 8;
