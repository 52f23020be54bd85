//! `ProgressContext`: a reference evaluation context.
//!
//! Holds two kinds of facts that action logic may consult:
//!
//! - per-position state sets, written only by the search driver while a
//!   node is being expanded;
//! - named integer terms (items, flags, counters) fixed by the caller
//!   before the search.

use std::collections::BTreeMap;

use lodestar_kernel::carrier::position::Position;
use lodestar_kernel::carrier::state_set::StateSet;
use lodestar_kernel::context::EvaluationContext;

/// Evaluation context backed by ordered maps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressContext {
    graph_id: String,
    states: BTreeMap<Position, StateSet>,
    terms: BTreeMap<String, i32>,
}

impl ProgressContext {
    #[must_use]
    pub fn new(graph_id: impl Into<String>) -> Self {
        Self {
            graph_id: graph_id.into(),
            ..Self::default()
        }
    }

    /// Value of a named term; unset terms read as `0`.
    #[must_use]
    pub fn term(&self, name: &str) -> i32 {
        self.terms.get(name).copied().unwrap_or(0)
    }

    pub fn set_term(&mut self, name: impl Into<String>, value: i32) {
        self.terms.insert(name.into(), value);
    }

    /// Builder-style [`ProgressContext::set_term`].
    #[must_use]
    pub fn with_term(mut self, name: impl Into<String>, value: i32) -> Self {
        self.set_term(name, value);
        self
    }

    pub fn increment_term(&mut self, name: &str, delta: i32) {
        let value = self.term(name).saturating_add(delta);
        self.terms.insert(name.to_string(), value);
    }

    /// Whether `position` currently has states applied.
    #[must_use]
    pub fn has_states(&self, position: Position) -> bool {
        self.states.contains_key(&position)
    }
}

impl EvaluationContext for ProgressContext {
    fn graph_id(&self) -> &str {
        &self.graph_id
    }

    fn position_states(&self, position: Position) -> Option<&StateSet> {
        self.states.get(&position)
    }

    fn replace_position_states(
        &mut self,
        position: Position,
        states: Option<StateSet>,
    ) -> Option<StateSet> {
        match states {
            Some(states) => self.states.insert(position, states),
            None => self.states.remove(&position),
        }
    }
}
