//! Carrier module: positions, states, state schemas and state sets.
//!
//! This is the foundational layer. No other kernel module is imported here
//! except the shared error type.

pub mod position;
pub mod schema;
pub mod state;
pub mod state_set;
