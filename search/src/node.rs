//! Search nodes and the queue ordering key.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use lodestar_kernel::carrier::position::{Position, PositionTable};
use lodestar_kernel::carrier::state_set::StateSet;

use crate::action::Action;
use crate::frontier::StateFrontier;

/// Index of a start in [`crate::policy::SearchParams::starts`].
pub type StartIndex = usize;

/// How a node expands its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TraversalRules {
    /// Evaluate actions without state tracking.
    pub stateless: bool,
    /// Refuse to revisit any position already on the node's path.
    pub disallow_backtracking: bool,
}

/// An immutable search node.
///
/// A node is a reached `(start, position, states)` triple together with the
/// path that reached it. Queue extraction uses `(cost, depth, node_id)`;
/// `node_id` is assigned in creation order, so it doubles as the final
/// tie-breaker.
pub struct SearchNode<C> {
    node_id: u64,
    start: StartIndex,
    group: usize,
    start_position: Position,
    position: Position,
    states: StateSet,
    cost: f64,
    depth: u32,
    path: Vec<Arc<Action<C>>>,
}

impl<C> SearchNode<C> {
    /// A zero-depth node for a start.
    #[must_use]
    pub fn root(
        node_id: u64,
        start: StartIndex,
        group: usize,
        position: Position,
        states: StateSet,
        cost: f64,
    ) -> Self {
        Self {
            node_id,
            start,
            group,
            start_position: position,
            position,
            states,
            cost,
            depth: 0,
            path: Vec::new(),
        }
    }

    #[must_use]
    pub fn node_id(&self) -> u64 {
        self.node_id
    }

    /// The start this node descends from.
    #[must_use]
    pub fn start(&self) -> StartIndex {
        self.start
    }

    /// Index of the start group whose frontier this node shares.
    #[must_use]
    pub fn group(&self) -> usize {
        self.group
    }

    #[must_use]
    pub fn start_position(&self) -> Position {
        self.start_position
    }

    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    #[must_use]
    pub fn states(&self) -> &StateSet {
        &self.states
    }

    #[must_use]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of actions taken from the start.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[must_use]
    pub fn path(&self) -> &[Arc<Action<C>>] {
        &self.path
    }

    /// The node's queue key.
    #[must_use]
    pub fn key(&self) -> NodeKey {
        NodeKey {
            cost: self.cost,
            depth: self.depth,
            node_id: self.node_id,
        }
    }

    /// Whether `position` is the start or the target of any action on the path.
    #[must_use]
    pub fn has_visited(&self, position: Position) -> bool {
        self.start_position == position || self.path.iter().any(|a| a.target() == position)
    }

    /// Try to take `action` from this node.
    ///
    /// Evaluates the action against `ctx` (which must have this node's states
    /// applied at its position), offers the result to `frontier`, and builds
    /// the child from whatever the frontier accepts. Returns `None` if the
    /// action does not fire, brings nothing new, or would backtrack.
    ///
    /// The backtracking check runs before the frontier is touched, so a
    /// refused action leaves no trace.
    ///
    /// # Panics
    ///
    /// Panics if the action's source does not admit this node's position.
    pub fn traverse(
        &self,
        action: &Arc<Action<C>>,
        ctx: &C,
        frontier: &mut StateFrontier,
        rules: TraversalRules,
        child_id: u64,
    ) -> Option<Self> {
        assert!(
            action.source().admits(self.position),
            "action `{}` offered from {} but its source is {:?}",
            action.name(),
            self.position,
            action.source()
        );

        let target = action.target();
        if rules.disallow_backtracking && self.has_visited(target) {
            return None;
        }

        let reached = if rules.stateless {
            action.evaluate_stateless(ctx, self.position, &self.states)?
        } else {
            action.evaluate(ctx, self.position, &self.states)?
        };
        let accepted = frontier.try_add(target, &reached)?;

        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.extend(self.path.iter().cloned());
        path.push(Arc::clone(action));

        Some(Self {
            node_id: child_id,
            start: self.start,
            group: self.group,
            start_position: self.start_position,
            position: target,
            states: accepted,
            cost: self.cost + action.cost(),
            depth: self.depth.saturating_add(1),
            path,
        })
    }

    /// Render the path as `start -> action -> action ...`, naming positions
    /// through `table`.
    #[must_use]
    pub fn path_display(&self, table: &PositionTable) -> String {
        let mut out = table.display(self.start_position);
        for action in &self.path {
            out.push_str(" -> ");
            out.push_str(action.name());
        }
        out
    }
}

impl<C> Clone for SearchNode<C> {
    fn clone(&self) -> Self {
        Self {
            node_id: self.node_id,
            start: self.start,
            group: self.group,
            start_position: self.start_position,
            position: self.position,
            states: self.states.clone(),
            cost: self.cost,
            depth: self.depth,
            path: self.path.clone(),
        }
    }
}

impl<C> fmt::Debug for SearchNode<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchNode")
            .field("node_id", &self.node_id)
            .field("start", &self.start)
            .field("position", &self.position)
            .field("states", &self.states)
            .field("cost", &self.cost)
            .field("depth", &self.depth)
            .field(
                "path",
                &self.path.iter().map(|a| a.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// The queue ordering key: `(cost, depth, node_id)`.
///
/// Lower cost first, then shallower depth, then older node. Costs compare
/// with [`f64::total_cmp`], so the order is total even though costs are
/// floating point.
#[derive(Debug, Clone, Copy)]
pub struct NodeKey {
    pub cost: f64,
    pub depth: u32,
    pub node_id: u64,
}

impl PartialEq for NodeKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeKey {}

impl PartialOrd for NodeKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for NodeKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then(self.depth.cmp(&other.depth))
            .then(self.node_id.cmp(&other.node_id))
    }
}
