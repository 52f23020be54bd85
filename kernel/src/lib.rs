//! Lodestar Kernel: value types for state-augmented path search.
//!
//! # API Surface
//!
//! - [`carrier::state::State`] -- an immutable, dominance-ordered value vector
//! - [`carrier::state_set::StateSet`] -- a Pareto antichain of states (empty = indeterminate)
//! - [`carrier::position::PositionTable`] -- interned graph locations
//! - [`context::ScopedStates`] -- scoped apply/restore of per-position states on an
//!   [`context::EvaluationContext`]
//!
//! # Module Dependency Direction
//!
//! `carrier` ← `context`
//!
//! One-way only. `carrier` depends on nothing internal.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod carrier;
pub mod context;
pub mod error;
