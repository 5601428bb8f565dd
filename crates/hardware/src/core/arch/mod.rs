//! Architecture-specific components.
//!
//! This module contains the architectural elements of the simulated machine.
//! It includes the following modules:
//! 1. **Flags:** Zero/sign/overflow condition flags.
//! 2. **GPRs:** The sixteen named integer registers.

/// Condition flags written by CMP.
pub mod flags;

/// General-purpose register names.
pub mod gpr;

pub use flags::Flags;
pub use gpr::Register;
