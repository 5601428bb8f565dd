//! Branch prediction unit (BRU).
//!
//! Static direction prediction plus a return address stack (RAS) for RET.

pub use self::branch_predictor::BranchPredictor;
pub use self::static_bp::StaticPredictor;

/// Branch predictor trait.
pub mod branch_predictor;

/// Return Address Stack for predicting return addresses.
pub mod ras;

/// Static branch predictor (backward taken, forward not taken).
pub mod static_bp;
