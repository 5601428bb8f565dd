//! Static Branch Predictor.
//!
//! Implements a backward-taken, forward-not-taken policy for conditional
//! branches. JMP and CALL always go to their label. RET is predicted from a
//! speculative RAS that CALL pushes at dispatch; a committed copy of the RAS
//! replaces it after a squash.

use super::{BranchPredictor, ras::Ras};
use crate::isa::{Instruction, Opcode};

/// Static Branch Predictor structure.
#[derive(Clone, Debug)]
pub struct StaticPredictor {
    /// Return Address Stack updated at dispatch.
    ras: Ras,
    /// Return Address Stack updated at commit.
    committed: Ras,
}

impl StaticPredictor {
    /// Creates a new Static Predictor.
    ///
    /// # Arguments
    ///
    /// * `ras_size` - Capacity of the RAS.
    pub fn new(ras_size: usize) -> Self {
        Self {
            ras: Ras::new(ras_size),
            committed: Ras::new(ras_size),
        }
    }

    /// Speculative return stack, for inspection.
    pub const fn ras(&self) -> &Ras {
        &self.ras
    }
}

impl BranchPredictor for StaticPredictor {
    fn predict(&mut self, inst: &Instruction) -> usize {
        match inst.opcode {
            Opcode::Call => {
                self.ras.push(inst.fallthrough());
                inst.target().unwrap_or_else(|| inst.fallthrough())
            }
            Opcode::Ret => self.ras.pop().unwrap_or_else(|| inst.fallthrough()),
            op if op.is_unconditional() || inst.is_backward() => {
                inst.target().unwrap_or_else(|| inst.fallthrough())
            }
            _ => inst.fallthrough(),
        }
    }

    fn on_commit(&mut self, inst: &Instruction) {
        match inst.opcode {
            Opcode::Call => self.committed.push(inst.fallthrough()),
            Opcode::Ret => {
                let _ = self.committed.pop();
            }
            _ => {}
        }
    }

    fn recover(&mut self) {
        self.ras.clone_from(&self.committed);
    }
}
