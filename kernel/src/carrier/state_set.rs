//! `StateSet`: a Pareto antichain of [`State`]s.
//!
//! # Invariant
//!
//! No element dominates another. Every constructor normalizes its input:
//! dominated states are dropped, and of several comparably-equal states the
//! first one wins.
//!
//! # The indeterminate marker
//!
//! The empty set is not "unreached". It marks a success whose state is not
//! tracked (stateless evaluation, or a start without a schema). "Unreached"
//! is expressed by the absence of a set (`Option::None`) at the call site.

use std::fmt;

use crate::carrier::state::State;

/// A set of pairwise-incomparable states.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct StateSet {
    states: Vec<State>,
}

impl StateSet {
    /// The indeterminate-success marker (empty set).
    #[must_use]
    pub fn indeterminate() -> Self {
        Self { states: Vec::new() }
    }

    #[must_use]
    pub fn single(state: State) -> Self {
        Self {
            states: vec![state],
        }
    }

    /// Build an antichain from arbitrary states. O(n²).
    ///
    /// An empty input yields the indeterminate marker.
    #[must_use]
    pub fn from_states<I: IntoIterator<Item = State>>(states: I) -> Self {
        let mut kept: Vec<State> = Vec::new();
        for state in states {
            if kept.iter().any(|k| k.is_comparably_le(&state)) {
                continue;
            }
            kept.retain(|k| !state.is_comparably_le(k));
            kept.push(state);
        }
        Self { states: kept }
    }

    #[must_use]
    pub fn is_indeterminate(&self) -> bool {
        self.states.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[State] {
        &self.states
    }

    pub fn iter(&self) -> std::slice::Iter<'_, State> {
        self.states.iter()
    }

    /// Candidates from `self` that no state in `visited` dominates.
    ///
    /// Only the forward direction is checked: states in `visited` are never
    /// tested against `self`.
    #[must_use]
    pub fn undominated_by(&self, visited: &[State]) -> Vec<State> {
        self.states
            .iter()
            .filter(|s| !visited.iter().any(|v| v.is_comparably_le(s)))
            .cloned()
            .collect()
    }

    /// Map each state through `f`, dropping `None`s.
    ///
    /// Returns `None` if nothing survives, so an action built on this helper
    /// "cannot fire" rather than succeeding with the indeterminate marker.
    #[must_use]
    pub fn filter_map<F>(&self, f: F) -> Option<Self>
    where
        F: FnMut(&State) -> Option<State>,
    {
        let mapped: Vec<State> = self.states.iter().filter_map(f).collect();
        if mapped.is_empty() {
            None
        } else {
            Some(Self::from_states(mapped))
        }
    }

    /// True iff some state in `self` dominates `state`.
    #[must_use]
    pub fn covers(&self, state: &State) -> bool {
        self.states.iter().any(|s| s.is_comparably_le(state))
    }
}

impl FromIterator<State> for StateSet {
    fn from_iter<I: IntoIterator<Item = State>>(iter: I) -> Self {
        Self::from_states(iter)
    }
}

impl<'a> IntoIterator for &'a StateSet {
    type Item = &'a State;
    type IntoIter = std::slice::Iter<'a, State>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}

impl From<State> for StateSet {
    fn from(state: State) -> Self {
        Self::single(state)
    }
}

impl fmt::Debug for StateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_indeterminate() {
            return f.write_str("StateSet(indeterminate)");
        }
        f.debug_set().entries(self.states.iter()).finish()
    }
}
