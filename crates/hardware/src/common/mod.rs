//! Common utilities and types used throughout the simulator.
//!
//! This module provides fundamental building blocks shared across all components.
//! It includes:
//! 1. **Constants:** Default structure sizes, latencies and stack slot width.
//! 2. **Error Handling:** Assembly errors and the crate-level error type.
//! 3. **Register Management:** The architectural register file with condition flags.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use error::{ParseError, ParseErrorKind, SimError};
pub use reg::RegisterFile;
