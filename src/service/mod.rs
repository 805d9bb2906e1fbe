//! Guarded multi-statement operations. Each function expects to run inside a
//! database transaction owned by the caller.

pub mod deposits;
pub mod users;
