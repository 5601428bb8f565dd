//! Core tests.

/// Out-of-order pipeline behaviour observed through the simulator.
pub mod pipeline;
