//! Per-position Pareto frontier of reached states.
//!
//! Replaces a plain visited set: a position may be reached again as long as
//! it brings at least one state no earlier arrival dominates.
//!
//! # Acceptance rule
//!
//! ```text
//! candidates = ∅ (indeterminate):
//!     accept once per position, reject every later indeterminate arrival
//! otherwise:
//!     kept = { c ∈ candidates | ¬∃ v ∈ visited[p]: v ≤ c }
//!     kept = ∅  → reject
//!     else      → visited[p] ∪= kept, accept kept
//! ```
//!
//! Only the forward direction is checked. A newly accepted state that
//! dominates an existing entry does not evict it, so the stored set may stop
//! being an antichain. That never admits a dominated candidate; it only
//! makes later checks scan more entries.
//!
//! `BTreeMap`/`BTreeSet` keep iteration order deterministic.

use std::collections::{BTreeMap, BTreeSet};

use lodestar_kernel::carrier::position::Position;
use lodestar_kernel::carrier::state::State;
use lodestar_kernel::carrier::state_set::StateSet;

/// Visited-state bookkeeping for one start group.
#[derive(Debug, Clone, Default)]
pub struct StateFrontier {
    visited: BTreeMap<Position, Vec<State>>,
    indeterminate: BTreeSet<Position>,
}

impl StateFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer `candidates` arriving at `position`.
    ///
    /// Returns the accepted subset, or `None` if the arrival brings nothing
    /// new. An accepted indeterminate arrival returns the indeterminate set.
    pub fn try_add(&mut self, position: Position, candidates: &StateSet) -> Option<StateSet> {
        if candidates.is_indeterminate() {
            return self
                .indeterminate
                .insert(position)
                .then(StateSet::indeterminate);
        }

        let visited = self.visited.entry(position).or_default();
        let kept = candidates.undominated_by(visited);
        if kept.is_empty() {
            return None;
        }
        visited.extend(kept.iter().cloned());
        Some(StateSet::from_states(kept))
    }

    /// States stored for `position` (possibly not an antichain).
    #[must_use]
    pub fn visited(&self, position: Position) -> &[State] {
        self.visited.get(&position).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether an indeterminate arrival has been accepted at `position`.
    #[must_use]
    pub fn has_indeterminate(&self, position: Position) -> bool {
        self.indeterminate.contains(&position)
    }

    /// Whether anything has been accepted at `position`.
    #[must_use]
    pub fn is_reached(&self, position: Position) -> bool {
        self.has_indeterminate(position) || self.visited.contains_key(&position)
    }

    /// Number of distinct positions with at least one accepted arrival.
    #[must_use]
    pub fn position_count(&self) -> usize {
        self.visited
            .keys()
            .chain(self.indeterminate.iter())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// Total stored states across all positions.
    #[must_use]
    pub fn state_count(&self) -> usize {
        self.visited.values().map(Vec::len).sum()
    }
}
