//! Branch Predictor Interface.
//!
//! This module defines the `BranchPredictor` trait consulted by the issue stage
//! to pick the next fetch address, and told about committed control transfers
//! and squashes so that any speculative state can be checkpointed and restored.

use crate::isa::Instruction;

/// Trait for branch prediction algorithms.
pub trait BranchPredictor {
    /// Predicts the successor of a control-transfer instruction being
    /// dispatched. Speculative state (e.g. a return stack) is updated here.
    ///
    /// # Arguments
    ///
    /// * `inst` - The branch, CALL or RET being dispatched
    ///
    /// # Returns
    ///
    /// The address fetch continues at.
    fn predict(&mut self, inst: &Instruction) -> usize;

    /// Records a control transfer that has committed.
    ///
    /// Called from the commit stage in program order, so the predictor can
    /// maintain a non-speculative checkpoint.
    fn on_commit(&mut self, inst: &Instruction);

    /// Discards speculative state after a pipeline squash, restoring the last
    /// committed checkpoint.
    fn recover(&mut self);
}
