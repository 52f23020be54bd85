//! Lodestar Harness: reference collaborators and orchestration for search.
//!
//! The harness supplies what the search core leaves external: an evaluation
//! context ([`context::ProgressContext`]), a rule graph that enumerates
//! actions ([`graph::RuleGraph`]), a runner that drives sessions to
//! completion and reports their results, and a handful of sample worlds.
//!
//! The harness does NOT implement search logic; it delegates to
//! `lodestar_search`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod context;
pub mod graph;
pub mod logging;
pub mod runner;
pub mod worlds;
