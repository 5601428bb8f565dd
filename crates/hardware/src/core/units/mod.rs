//! Execution units and functional components.
//!
//! This module contains the integer ALU shared by the ALU/Branch and
//! Multiply/Divide pools, and the branch prediction unit consulted at issue.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch prediction unit: static direction predictor and return address stack.
pub mod bru;
