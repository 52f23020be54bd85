//! A search split across many short calls finds exactly what one long call
//! finds, in the same order, with the same amount of work.

use std::time::Duration;

use lodestar_harness::runner::{resume_until_done, run_search, SearchReport};
use lodestar_harness::worlds::hub::{hub, hub_params};
use lodestar_harness::worlds::lattice::Lattice;
use lodestar_search::policy::{SearchParams, TerminationCondition};
use lodestar_search::search::{search, SearchOutcome};
use lodestar_search::session::SearchSession;

fn comparable(report: &SearchReport) -> (SearchOutcome, u64, Vec<(u64, String, String, f64)>) {
    (
        report.outcome,
        report.nodes_popped,
        report
            .results
            .iter()
            .map(|r| (r.node_id, r.start_position.clone(), r.destination.clone(), r.cost))
            .collect(),
    )
}

fn sliced(params: &SearchParams) -> SearchParams {
    params.clone().with_max_time(Duration::ZERO)
}

#[test]
fn lattice_one_call_equals_many() {
    let lattice = Lattice::new(5, 5, 2).unwrap();
    let params = lattice.corner_params().unwrap();

    let whole = run_search(&mut lattice.context(true), &lattice.graph, &params).unwrap();

    let sliced_params = sliced(&params);
    let mut ctx = lattice.context(true);
    let mut session = SearchSession::new(&lattice.graph, &sliced_params).unwrap();
    let pieces =
        resume_until_done(&mut ctx, &lattice.graph, &mut session, &sliced_params, 10_000).unwrap();

    assert!(pieces.calls > 1);
    assert!(pieces.timed_out);
    assert!(!whole.timed_out);
    assert_eq!(comparable(&whole), comparable(&pieces));
}

#[test]
fn hub_one_call_equals_many() {
    let graph = hub().unwrap();
    let params = hub_params(&graph, TerminationCondition::None).unwrap();

    let whole = run_search(&mut graph.new_context(), &graph, &params).unwrap();

    let sliced_params = sliced(&params);
    let mut session = SearchSession::new(&graph, &sliced_params).unwrap();
    let pieces = resume_until_done(
        &mut graph.new_context(),
        &graph,
        &mut session,
        &sliced_params,
        1_000,
    )
    .unwrap();

    assert_eq!(comparable(&whole), comparable(&pieces));
    // Zero budget still expands one node per call; the last call finds the
    // queue empty right after its expansion.
    assert_eq!(u64::from(pieces.calls), pieces.nodes_popped);
}

#[test]
fn success_then_resume_matches_exhaustive_run() {
    let graph = hub().unwrap();
    let exhaustive = hub_params(&graph, TerminationCondition::None).unwrap();
    let whole = run_search(&mut graph.new_context(), &graph, &exhaustive).unwrap();

    let any = hub_params(&graph, TerminationCondition::Any).unwrap();
    let mut ctx = graph.new_context();
    let mut session = SearchSession::new(&graph, &any).unwrap();
    while search(&mut ctx, &graph, &mut session, &any).unwrap() == SearchOutcome::Success {}

    assert_eq!(session.nodes_popped(), whole.nodes_popped);
    let costs: Vec<f64> = session.results().iter().map(|n| n.cost()).collect();
    assert_eq!(costs, whole.costs());
}

#[test]
fn stateless_fallback_is_sticky_and_keeps_going() {
    let lattice = Lattice::new(4, 4, 2).unwrap();
    let params = lattice
        .corner_params()
        .unwrap()
        .with_max_time(Duration::ZERO)
        .continue_stateless(true);
    let mut ctx = lattice.context(true);
    let mut session = SearchSession::new(&lattice.graph, &params).unwrap();

    let first = search(&mut ctx, &lattice.graph, &mut session, &params).unwrap();
    assert_eq!(first, SearchOutcome::TimedOut);
    assert!(session.is_stateless());
    assert!(session.has_timed_out());
    // One expansion stateful, one more after switching.
    assert_eq!(session.nodes_popped(), 2);

    let report =
        resume_until_done(&mut ctx, &lattice.graph, &mut session, &params, 10_000).unwrap();
    assert_eq!(report.outcome, SearchOutcome::Exhausted);
    assert!(report.stateless);
    assert!(!report.results.is_empty());
}
