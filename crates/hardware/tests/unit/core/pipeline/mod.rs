//! Pipeline behaviour tests.

/// In-order commit and the one-cycle result broadcast.
pub mod ordering;


/// Register renaming and false-dependency elimination.
pub mod renaming;

/// Structural hazards: full pools and a full ROB.
pub mod structural;
