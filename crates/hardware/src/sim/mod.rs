//! Simulation driver and program loading.
//!
//! Provides the [`Simulator`] facade (load, step, run, inspect), file loading
//! helpers, and the serializable [`Snapshot`].

/// Program and config file loading.
pub mod loader;

/// Top-level simulator.
pub mod simulator;

/// Serializable architectural snapshot.
pub mod snapshot;

pub use self::simulator::Simulator;
pub use self::snapshot::Snapshot;
