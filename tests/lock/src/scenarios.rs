//! Small rule graphs with known answers.
//!
//! # Panics
//!
//! Builders panic on construction failure. Every graph here is fixed, so a
//! failure is a bug in the builder, not in the test that calls it.

use std::sync::Arc;

use lodestar_harness::context::ProgressContext;
use lodestar_harness::graph::RuleGraph;
use lodestar_kernel::carrier::position::Position;
use lodestar_kernel::carrier::schema::{Preference, StateBuilder, StateSchema};
use lodestar_kernel::carrier::state_set::StateSet;
use lodestar_search::action::StateLogic;
use lodestar_search::policy::{SearchParams, StartPosition, TerminationCondition};

/// Resolve `name` in `graph`.
///
/// # Panics
///
/// Panics if the graph has no such position.
#[must_use]
pub fn pos(graph: &RuleGraph<ProgressContext>, name: &str) -> Position {
    graph
        .position(name)
        .unwrap_or_else(|| panic!("graph `{}` has no position `{name}`", graph.id()))
}

/// `A --1--> B --2 (k = 0)--> C`, destination `C`, terminate on any hit.
///
/// # Panics
///
/// Panics if the fixed graph fails to build.
#[must_use]
pub fn gated_pair() -> (RuleGraph<ProgressContext>, SearchParams) {
    let mut b = RuleGraph::builder("gated_pair");
    b.link("ab", "A", "B", 1.0).unwrap();
    b.gate("bc", "B", "C", 2.0, |ctx: &ProgressContext| ctx.term("k") == 0)
        .unwrap();
    let graph = b.build();
    let params = SearchParams::new(
        vec![StartPosition::new(pos(&graph, "A"), StateSet::indeterminate())],
        vec![pos(&graph, "C")],
    )
    .with_termination(TerminationCondition::Any);
    (graph, params)
}

/// Starts `A` (cost 0) and `A2` (cost 5) in separate groups, each two away
/// from `D`.
///
/// # Panics
///
/// Panics if the fixed graph fails to build.
#[must_use]
pub fn twin_starts() -> (RuleGraph<ProgressContext>, SearchParams) {
    let mut b = RuleGraph::builder("twin_starts");
    b.link("a_d", "A", "D", 2.0).unwrap();
    b.link("a2_d", "A2", "D", 2.0).unwrap();
    let graph = b.build();
    let params = SearchParams::new(
        vec![
            StartPosition::new(pos(&graph, "A"), StateSet::indeterminate()).in_group("a"),
            StartPosition::new(pos(&graph, "A2"), StateSet::indeterminate())
                .with_cost(5.0)
                .in_group("a2"),
        ],
        vec![pos(&graph, "D")],
    )
    .with_termination(TerminationCondition::EveryStartAndDestination);
    (graph, params)
}

/// A single cost-2 edge `A -> B`, destination `B`.
///
/// # Panics
///
/// Panics if the fixed graph fails to build.
#[must_use]
pub fn single_edge() -> (RuleGraph<ProgressContext>, SearchParams) {
    let mut b = RuleGraph::builder("single_edge");
    b.link("ab", "A", "B", 2.0).unwrap();
    let graph = b.build();
    let params = SearchParams::new(
        vec![StartPosition::new(pos(&graph, "A"), StateSet::indeterminate())],
        vec![pos(&graph, "B")],
    );
    (graph, params)
}

/// Name of the collected-coins field in [`coin_loop`].
pub const COINS: &str = "COINS";

/// Highest coin count [`coin_loop`] tracks.
pub const MAX_COINS: i32 = 3;

struct Collect {
    schema: Arc<StateSchema>,
}

impl StateLogic<ProgressContext> for Collect {
    fn evaluate(&self, _ctx: &ProgressContext, _source: Position, input: &StateSet) -> Option<StateSet> {
        input.filter_map(|state| {
            self.schema
                .modify(state)
                .add_int(COINS, 1)
                .ok()
                .map(StateBuilder::build)
        })
    }

    fn evaluate_stateless(&self, _ctx: &ProgressContext, _source: Position) -> bool {
        true
    }
}

/// `A <-> B` where walking back to `A` collects a coin, plus `A --5--> D`.
///
/// More coins are better, so every lap reaches `A` with a state that beats
/// all earlier ones and the frontier lets it through. Without backtracking
/// the loop never closes.
///
/// # Panics
///
/// Panics if the fixed graph fails to build.
#[must_use]
pub fn coin_loop() -> (RuleGraph<ProgressContext>, SearchParams) {
    let schema = Arc::new(
        StateSchema::new()
            .with_int(COINS, 0, MAX_COINS, Preference::HigherIsBetter)
            .unwrap(),
    );
    let mut b = RuleGraph::builder("coin_loop");
    b.link("ab", "A", "B", 1.0).unwrap();
    b.transform(
        "ba",
        "B",
        "A",
        1.0,
        Collect {
            schema: Arc::clone(&schema),
        },
    )
    .unwrap();
    b.link("ad", "A", "D", 5.0).unwrap();
    let graph = b.build();
    let params = SearchParams::new(
        vec![StartPosition::new(
            pos(&graph, "A"),
            StateSet::single(schema.default_state()),
        )],
        vec![pos(&graph, "D")],
    );
    (graph, params)
}
