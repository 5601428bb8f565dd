//! Pipeline stage implementations.
//!
//! This module contains the four phases of one Tomasulo cycle. In the order
//! the engine runs them:
//! 1. **Commit:** Retires the ROB head, resolves branches, detects mispredictions.
//! 2. **Writeback:** Drains the CDB into the ROB and wakes waiting operands.
//! 3. **Execute:** Counts down ready reservation stations and resolves the LSB.
//! 4. **Issue:** Dispatches one instruction at the PC, renaming its registers.

/// Commit stage implementation.
pub mod commit;

/// Execute stage implementation.
pub mod execute;

/// Issue (dispatch) stage implementation.
pub mod issue;

/// Writeback stage implementation.
pub mod writeback;

/// Commit stage entry point.
pub use commit::commit_stage;
/// Execute stage entry point.
pub use execute::execute_stage;
/// Issue stage entry point.
pub use issue::issue_stage;
/// Writeback stage entry point.
pub use writeback::writeback_stage;
