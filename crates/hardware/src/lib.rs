//! Tomasulo out-of-order pipeline simulator library.
//!
//! This crate implements a cycle-level, single-issue Tomasulo machine with the following:
//! 1. **ISA:** A small register/immediate/memory instruction set and its two-pass assembler.
//! 2. **Core:** Register renaming, reservation stations, a load-store buffer, a per-class
//!    common data bus and a circular reorder buffer for in-order commit.
//! 3. **Speculation:** Static branch prediction with a return address stack and
//!    squash-and-redirect recovery at commit.
//! 4. **Simulation:** Configuration, statistics, file loading and serializable snapshots.
//!
//! # Examples
//!
//! ```
//! use tomasim_core::Simulator;
//! use tomasim_core::core::arch::Register;
//!
//! let mut sim = Simulator::new();
//! sim.load("MOV RAX, 5\nADD RBX, RAX, 3\nSTORE RBX, [RAX+0]").unwrap();
//! sim.run();
//!
//! assert_eq!(sim.registers().read(Register::Rbx), 8);
//! assert_eq!(sim.memory().load(5), 8);
//! assert_eq!(sim.committed(), 3);
//! ```

/// Common types and constants (errors, register file, default sizes).
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// CPU core (architectural state, pipeline, execution units).
pub mod core;
/// Instruction set (opcodes, instructions, assembler, disassembler).
pub mod isa;
/// Simulator driver, file loading and snapshots.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Crate-level error types.
pub use crate::common::{ParseError, SimError};
/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Architectural state container.
pub use crate::core::Cpu;
/// Top-level simulator; construct with `Simulator::new` or `Simulator::with_config`.
pub use crate::sim::Simulator;
