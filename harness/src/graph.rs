//! `RuleGraph`: a reference [`SearchWorld`] backed by an action table.
//!
//! Actions are indexed by source position and kept sorted by target id, so
//! enumeration order is deterministic. Jump actions (source
//! [`ActionSource::Any`]) are offered only from depth-0 nodes, i.e. from the
//! starts themselves.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use thiserror::Error;

use lodestar_kernel::carrier::position::{Position, PositionTable};
use lodestar_search::action::{Action, ActionLogic, ActionSource, GateLogic, StateLogic};
use lodestar_search::contract::SearchWorld;
use lodestar_search::node::SearchNode;

use crate::context::ProgressContext;

/// Rule graph construction failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("action `{name}` has cost {cost}, expected a finite non-negative value")]
    InvalidCost { name: String, cost: f64 },

    #[error("action `{name}` is defined twice")]
    DuplicateAction { name: String },
}

/// A searchable table of actions.
pub struct RuleGraph<C> {
    id: String,
    positions: PositionTable,
    by_source: BTreeMap<Position, Vec<Arc<Action<C>>>>,
    jumps: Vec<Arc<Action<C>>>,
}

impl<C> RuleGraph<C> {
    #[must_use]
    pub fn builder(id: impl Into<String>) -> RuleGraphBuilder<C> {
        RuleGraphBuilder::new(id)
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn positions(&self) -> &PositionTable {
        &self.positions
    }

    /// Look up a position by name.
    #[must_use]
    pub fn position(&self, name: &str) -> Option<Position> {
        self.positions.get(name)
    }

    /// Fixed-source actions leaving `position`, sorted by target.
    #[must_use]
    pub fn actions_at(&self, position: Position) -> &[Arc<Action<C>>] {
        self.by_source
            .get(&position)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn jumps(&self) -> &[Arc<Action<C>>] {
        &self.jumps
    }

    #[must_use]
    pub fn action_count(&self) -> usize {
        self.by_source.values().map(Vec::len).sum::<usize>() + self.jumps.len()
    }
}

impl RuleGraph<ProgressContext> {
    /// A fresh context bound to this graph.
    #[must_use]
    pub fn new_context(&self) -> ProgressContext {
        ProgressContext::new(self.id.clone())
    }
}

impl<C> SearchWorld<C> for RuleGraph<C> {
    fn world_id(&self) -> &str {
        &self.id
    }

    fn actions_from(&self, node: &SearchNode<C>, _ctx: &C) -> Vec<Arc<Action<C>>> {
        let fixed = self.actions_at(node.position());
        let mut actions = Vec::with_capacity(fixed.len() + self.jumps.len());
        actions.extend(fixed.iter().cloned());
        if node.depth() == 0 {
            actions.extend(self.jumps.iter().cloned());
        }
        actions
    }
}

impl<C> std::fmt::Debug for RuleGraph<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleGraph")
            .field("id", &self.id)
            .field("positions", &self.positions.len())
            .field("actions", &self.action_count())
            .finish()
    }
}

/// Incremental [`RuleGraph`] construction. Position names are interned on
/// first use.
pub struct RuleGraphBuilder<C> {
    id: String,
    positions: PositionTable,
    actions: Vec<Action<C>>,
    names: BTreeSet<String>,
}

impl<C> RuleGraphBuilder<C> {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            positions: PositionTable::new(),
            actions: Vec::new(),
            names: BTreeSet::new(),
        }
    }

    /// Intern a position name.
    pub fn position(&mut self, name: &str) -> Position {
        self.positions.intern(name)
    }

    /// Add an unconditional edge.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] for a bad cost or a reused action name.
    pub fn link(
        &mut self,
        name: &str,
        from: &str,
        to: &str,
        cost: f64,
    ) -> Result<&mut Self, GraphError> {
        self.add(name, Some(from), to, cost, ActionLogic::Link)
    }

    /// Add a stateless conditional edge.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] for a bad cost or a reused action name.
    pub fn gate(
        &mut self,
        name: &str,
        from: &str,
        to: &str,
        cost: f64,
        logic: impl GateLogic<C> + 'static,
    ) -> Result<&mut Self, GraphError> {
        self.add(name, Some(from), to, cost, ActionLogic::Gate(Arc::new(logic)))
    }

    /// Add a state-producing edge.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] for a bad cost or a reused action name.
    pub fn transform(
        &mut self,
        name: &str,
        from: &str,
        to: &str,
        cost: f64,
        logic: impl StateLogic<C> + 'static,
    ) -> Result<&mut Self, GraphError> {
        self.add(
            name,
            Some(from),
            to,
            cost,
            ActionLogic::Transform(Arc::new(logic)),
        )
    }

    /// Add a jump, offered from every start.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError`] for a bad cost or a reused action name.
    pub fn jump(
        &mut self,
        name: &str,
        to: &str,
        cost: f64,
        logic: ActionLogic<C>,
    ) -> Result<&mut Self, GraphError> {
        self.add(name, None, to, cost, logic)
    }

    fn add(
        &mut self,
        name: &str,
        from: Option<&str>,
        to: &str,
        cost: f64,
        logic: ActionLogic<C>,
    ) -> Result<&mut Self, GraphError> {
        if !(cost.is_finite() && cost >= 0.0) {
            return Err(GraphError::InvalidCost {
                name: name.to_string(),
                cost,
            });
        }
        if !self.names.insert(name.to_string()) {
            return Err(GraphError::DuplicateAction {
                name: name.to_string(),
            });
        }
        let source = match from {
            Some(from) => ActionSource::Fixed(self.positions.intern(from)),
            None => ActionSource::Any,
        };
        let target = self.positions.intern(to);
        self.actions.push(Action::new(name, source, target, cost, logic));
        Ok(self)
    }

    #[must_use]
    pub fn build(self) -> RuleGraph<C> {
        let mut by_source: BTreeMap<Position, Vec<Arc<Action<C>>>> = BTreeMap::new();
        let mut jumps = Vec::new();
        for action in self.actions {
            match action.source() {
                ActionSource::Fixed(source) => {
                    by_source.entry(source).or_default().push(Arc::new(action));
                }
                ActionSource::Any => jumps.push(Arc::new(action)),
            }
        }
        for actions in by_source.values_mut() {
            actions.sort_by_key(|a| a.target());
        }
        jumps.sort_by_key(|a: &Arc<Action<C>>| a.target());

        RuleGraph {
            id: self.id,
            positions: self.positions,
            by_source,
            jumps,
        }
    }
}
