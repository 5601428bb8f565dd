//! Out-of-order instruction pipeline.
//!
//! This module contains the Tomasulo backend. It includes the following components:
//! 1. **ROB:** Circular reorder buffer; the sole authority for commit order.
//! 2. **RAT:** Register alias table mapping registers to in-flight producers.
//! 3. **Stations:** Reservation station pools and the load-store buffer.
//! 4. **CDB:** Per-class result bus between execute and writeback.
//! 5. **Stages:** Commit, writeback, execute and issue.
//! 6. **Engine:** Owns the structures above and runs one cycle.

/// Common data bus.
pub mod cdb;

/// Pipeline engine and one-cycle driver.
pub mod engine;

/// Load-store buffer.
pub mod lsb;

/// Value-or-tag source operands.
pub mod operand;

/// Register alias table.
pub mod rat;

/// Reservation station pools.
pub mod reservation;

/// Reorder buffer.
pub mod rob;

/// Pipeline stage implementations (commit, writeback, execute, issue).
pub mod stages;

pub use self::engine::{Pipeline, Stations};
