//! Search parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use lodestar_kernel::carrier::position::Position;
use lodestar_kernel::carrier::state_set::StateSet;

use crate::error::SearchError;

/// When a search call stops after reaching a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationCondition {
    /// Never stop on a destination; run until exhausted or a limit trips.
    #[default]
    None,
    /// Stop at the first destination hit.
    Any,
    /// Stop at a hit on a destination no earlier result reached.
    AnyUniqueDestination,
    /// Stop at a hit whose `(start, destination)` pair no earlier result reached.
    AnyUniqueStartAndDestination,
    /// Stop once every destination has been reached from some start.
    EveryDestination,
    /// Stop once every `(start, destination)` pair has been reached.
    EveryStartAndDestination,
}

/// One entry point of a search.
#[derive(Debug, Clone, PartialEq)]
pub struct StartPosition {
    pub position: Position,
    pub states: StateSet,
    /// Initial path cost.
    pub cost: f64,
    /// Starts sharing a group key share one state frontier. `None` gives the
    /// start a frontier of its own.
    pub group: Option<String>,
}

impl StartPosition {
    #[must_use]
    pub fn new(position: Position, states: StateSet) -> Self {
        Self {
            position,
            states,
            cost: 0.0,
            group: None,
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

/// Parameters of a search session and of each call that resumes it.
///
/// Starts and destinations are fixed when the session is created; every
/// later call must pass the same ones. Limits, the termination condition and
/// the mode flags may change from call to call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub starts: Vec<StartPosition>,
    pub destinations: Vec<Position>,
    /// Wall-clock budget per call. `None` means unlimited.
    pub max_time: Option<Duration>,
    /// Nodes costing more than this are not expanded.
    pub max_cost: f64,
    /// Nodes deeper than this are not expanded.
    pub max_depth: u32,
    pub termination: TerminationCondition,
    /// Evaluate actions without state tracking.
    pub stateless: bool,
    /// On timeout, switch to stateless mode and keep going instead of
    /// returning.
    pub continue_stateless: bool,
    /// Refuse paths that revisit a position.
    pub disallow_backtracking: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            starts: Vec::new(),
            destinations: Vec::new(),
            max_time: None,
            max_cost: f64::INFINITY,
            max_depth: u32::MAX,
            termination: TerminationCondition::None,
            stateless: false,
            continue_stateless: false,
            disallow_backtracking: false,
        }
    }
}

impl SearchParams {
    #[must_use]
    pub fn new(starts: Vec<StartPosition>, destinations: Vec<Position>) -> Self {
        Self {
            starts,
            destinations,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_time(mut self, max_time: Duration) -> Self {
        self.max_time = Some(max_time);
        self
    }

    #[must_use]
    pub fn with_max_cost(mut self, max_cost: f64) -> Self {
        self.max_cost = max_cost;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_termination(mut self, termination: TerminationCondition) -> Self {
        self.termination = termination;
        self
    }

    #[must_use]
    pub fn stateless(mut self, stateless: bool) -> Self {
        self.stateless = stateless;
        self
    }

    #[must_use]
    pub fn continue_stateless(mut self, continue_stateless: bool) -> Self {
        self.continue_stateless = continue_stateless;
        self
    }

    #[must_use]
    pub fn disallow_backtracking(mut self, disallow_backtracking: bool) -> Self {
        self.disallow_backtracking = disallow_backtracking;
        self
    }

    /// Check the parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidParams`] if there are no starts, a start
    /// cost is negative or not finite, or `max_cost` is NaN.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.starts.is_empty() {
            return Err(SearchError::InvalidParams {
                detail: "at least one start is required".into(),
            });
        }
        if let Some(start) = self
            .starts
            .iter()
            .find(|s| !(s.cost.is_finite() && s.cost >= 0.0))
        {
            return Err(SearchError::InvalidParams {
                detail: format!(
                    "start at {} has cost {}, expected a finite non-negative value",
                    start.position, start.cost
                ),
            });
        }
        if self.max_cost.is_nan() {
            return Err(SearchError::InvalidParams {
                detail: "max_cost is NaN".into(),
            });
        }
        Ok(())
    }
}
