//! Sample worlds used by tests and benchmarks.

pub mod corridor;
pub mod hub;
pub mod lattice;
