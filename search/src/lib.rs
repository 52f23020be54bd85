//! Lodestar Search: state-augmented Dijkstra search over conditional graphs.
//!
//! This crate provides the search layer for Lodestar. It depends only on
//! `lodestar_kernel`; it does NOT depend on `lodestar_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! lodestar_kernel  ←  lodestar_search  ←  lodestar_harness
//! (states, context)   (frontier, driver)   (rule graphs, runner, worlds)
//! ```
//!
//! # Key types
//!
//! - [`Action`] -- a costed edge with gate, transform or link logic
//! - [`StateFrontier`] -- per-position Pareto frontier of reached states
//! - [`SearchNode`] -- immutable path record with deterministic ordering
//! - [`SearchSession`] -- resumable queue and result bookkeeping
//! - [`SearchParams`] -- starts, destinations, limits and termination condition
//! - [`SearchWorld`] -- trait for rule graphs that can be searched
//! - [`search()`] -- the driver

#![forbid(unsafe_code)]

pub mod action;
pub mod config;
pub mod contract;
pub mod error;
pub mod frontier;
pub mod node;
pub mod policy;
pub mod queue;
pub mod search;
pub mod session;

pub use action::{Action, ActionLogic, ActionSource, GateLogic, StateLogic};
pub use contract::SearchWorld;
pub use error::SearchError;
pub use frontier::StateFrontier;
pub use node::{NodeKey, SearchNode, TraversalRules};
pub use policy::{SearchParams, StartPosition, TerminationCondition};
pub use search::{search, SearchOutcome};
pub use session::SearchSession;
