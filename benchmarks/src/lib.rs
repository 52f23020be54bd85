//! Shared helpers for lodestar benchmark suites.

use lodestar_harness::worlds::lattice::Lattice;
use lodestar_search::policy::{SearchParams, TerminationCondition};
use lodestar_search::search::{search, SearchOutcome};
use lodestar_search::session::SearchSession;

/// A named lattice workload.
pub struct Regime {
    pub name: &'static str,
    pub lattice: Lattice,
    pub params: SearchParams,
    pub dash: bool,
}

/// Build a square lattice regime.
///
/// # Panics
///
/// Panics if the lattice cannot be built. Benchmark setup failures are fatal.
#[must_use]
pub fn regime(
    name: &'static str,
    side: u32,
    max_soul: i32,
    dash: bool,
    termination: TerminationCondition,
) -> Regime {
    let lattice = Lattice::new(side, side, max_soul).expect("lattice builds");
    let params = lattice
        .corner_params()
        .expect("corner positions exist")
        .with_termination(termination);
    Regime {
        name,
        lattice,
        params,
        dash,
    }
}

/// The standard regimes, smallest first.
#[must_use]
pub fn regimes() -> Vec<Regime> {
    vec![
        regime("walk_first_hit", 12, 0, false, TerminationCondition::Any),
        regime("walk_exhaustive", 12, 0, false, TerminationCondition::None),
        regime("dash_first_hit", 12, 3, true, TerminationCondition::Any),
        regime("frontier_pressure", 12, 6, true, TerminationCondition::None),
    ]
}

/// Run one fresh search over `regime`, returning the outcome and the
/// number of expanded nodes.
///
/// # Panics
///
/// Panics if the search rejects its inputs.
#[must_use]
pub fn run_once(regime: &Regime) -> (SearchOutcome, u64) {
    let graph = &regime.lattice.graph;
    let mut ctx = regime.lattice.context(regime.dash);
    let mut session = SearchSession::new(graph, &regime.params).expect("session builds");
    let outcome = search(&mut ctx, graph, &mut session, &regime.params).expect("search runs");
    (outcome, session.nodes_popped())
}
