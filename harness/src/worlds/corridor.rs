//! `corridor`: the smallest conditional graph.
//!
//! ```text
//! A --walk(1)--> B --door(2, KEY = 0)--> C
//! ```
//!
//! The door only opens while the `KEY` term is zero, so flipping one term in
//! the context decides whether C is reachable.

use lodestar_kernel::carrier::state_set::StateSet;
use lodestar_search::policy::{SearchParams, StartPosition, TerminationCondition};

use crate::context::ProgressContext;
use crate::graph::{GraphError, RuleGraph};

pub const WORLD_ID: &str = "corridor";

/// Context term that keeps the door shut while non-zero.
pub const KEY: &str = "KEY";

/// Build the corridor graph.
///
/// # Errors
///
/// Never in practice; propagates [`GraphError`] from the builder.
pub fn corridor() -> Result<RuleGraph<ProgressContext>, GraphError> {
    let mut b = RuleGraph::builder(WORLD_ID);
    b.link("walk", "A", "B", 1.0)?;
    b.gate("door", "B", "C", 2.0, |ctx: &ProgressContext| {
        ctx.term(KEY) == 0
    })?;
    Ok(b.build())
}

/// From A to C, stopping at the first hit.
#[must_use]
pub fn a_to_c(graph: &RuleGraph<ProgressContext>) -> Option<SearchParams> {
    Some(
        SearchParams::new(
            vec![StartPosition::new(graph.position("A")?, StateSet::indeterminate())],
            vec![graph.position("C")?],
        )
        .with_termination(TerminationCondition::Any),
    )
}
