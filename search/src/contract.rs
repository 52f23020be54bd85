//! Search world contract trait.

use std::sync::Arc;

use crate::action::Action;
use crate::node::SearchNode;

/// Trait for rule graphs that can be searched.
///
/// # Contract
///
/// - `world_id` must equal the graph identity reported by every evaluation
///   context built for this world.
/// - `actions_from` must only return actions whose source admits
///   `node.position()`. Offering an action from the wrong position is a
///   defect and aborts the search.
/// - Enumeration must be deterministic: the same node and the same scoped
///   context yield the same actions in the same order. The context passed in
///   already has the node's states applied at its position.
pub trait SearchWorld<C> {
    /// Unique rule graph identifier.
    fn world_id(&self) -> &str;

    /// Enumerate the actions worth trying from `node`.
    fn actions_from(&self, node: &SearchNode<C>, ctx: &C) -> Vec<Arc<Action<C>>>;
}
