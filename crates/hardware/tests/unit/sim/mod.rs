//! Simulator driver tests.


/// Load, reset, cycle limit and snapshot behaviour.
pub mod lifecycle;



/// PUSH, POP, CALL and RET through the stack-pointer rename.
pub mod stack;
