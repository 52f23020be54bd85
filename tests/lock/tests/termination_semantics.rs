//! Termination conditions over the 2×2 `hub` world.
//!
//! Hits in cost order: West→Vault 2, East→Vault 3, West→Spire 4, East→Spire 5.

use lodestar_harness::context::ProgressContext;
use lodestar_harness::graph::RuleGraph;
use lodestar_harness::worlds::hub::{hub, hub_params};
use lodestar_search::policy::TerminationCondition;
use lodestar_search::search::{search, SearchOutcome};
use lodestar_search::session::SearchSession;

/// Run calls until the queue is exhausted, returning each call's outcome
/// and the result costs recorded so far after that call.
fn calls_until_exhausted(
    graph: &RuleGraph<ProgressContext>,
    termination: TerminationCondition,
) -> Vec<(SearchOutcome, Vec<f64>)> {
    let params = hub_params(graph, termination).unwrap();
    let mut ctx = graph.new_context();
    let mut session = SearchSession::new(graph, &params).unwrap();
    let mut calls = Vec::new();
    loop {
        let outcome = search(&mut ctx, graph, &mut session, &params).unwrap();
        let costs = session.results().iter().map(|n| n.cost()).collect();
        calls.push((outcome, costs));
        if outcome == SearchOutcome::Exhausted {
            return calls;
        }
        assert!(calls.len() < 10, "search does not converge: {calls:?}");
    }
}

#[test]
fn none_runs_to_exhaustion() {
    let graph = hub().unwrap();
    let calls = calls_until_exhausted(&graph, TerminationCondition::None);
    assert_eq!(calls, vec![(SearchOutcome::Exhausted, vec![2.0, 3.0, 4.0, 5.0])]);
}

#[test]
fn any_stops_at_every_hit() {
    let graph = hub().unwrap();
    let calls = calls_until_exhausted(&graph, TerminationCondition::Any);
    let outcomes: Vec<SearchOutcome> = calls.iter().map(|(o, _)| *o).collect();
    assert_eq!(
        outcomes,
        vec![
            SearchOutcome::Success,
            SearchOutcome::Success,
            SearchOutcome::Success,
            SearchOutcome::Success,
            SearchOutcome::Exhausted,
        ]
    );
    assert_eq!(calls[0].1, vec![2.0]);
    assert_eq!(calls[4].1, vec![2.0, 3.0, 4.0, 5.0]);
}

#[test]
fn any_unique_destination_skips_repeat_destinations() {
    let graph = hub().unwrap();
    let calls = calls_until_exhausted(&graph, TerminationCondition::AnyUniqueDestination);
    assert_eq!(
        calls,
        vec![
            (SearchOutcome::Success, vec![2.0]),
            (SearchOutcome::Success, vec![2.0, 3.0, 4.0]),
            (SearchOutcome::Exhausted, vec![2.0, 3.0, 4.0, 5.0]),
        ]
    );
}

#[test]
fn any_unique_pair_stops_at_each_new_pair() {
    let graph = hub().unwrap();
    let calls = calls_until_exhausted(&graph, TerminationCondition::AnyUniqueStartAndDestination);
    assert_eq!(calls.len(), 5);
    assert_eq!(calls[1], (SearchOutcome::Success, vec![2.0, 3.0]));
}

#[test]
fn every_destination_needs_both_destinations_from_any_start() {
    let graph = hub().unwrap();
    let calls = calls_until_exhausted(&graph, TerminationCondition::EveryDestination);
    assert_eq!(calls[0], (SearchOutcome::Success, vec![2.0, 3.0, 4.0]));
}

#[test]
fn every_pair_needs_all_four() {
    let graph = hub().unwrap();
    let calls = calls_until_exhausted(&graph, TerminationCondition::EveryStartAndDestination);
    assert_eq!(
        calls,
        vec![
            (SearchOutcome::Success, vec![2.0, 3.0, 4.0, 5.0]),
            (SearchOutcome::Exhausted, vec![2.0, 3.0, 4.0, 5.0]),
        ]
    );
}

#[test]
fn found_and_remaining_pairs_partition_the_grid() {
    let graph = hub().unwrap();
    let params = hub_params(&graph, TerminationCondition::EveryDestination).unwrap();
    let mut session = SearchSession::new(&graph, &params).unwrap();
    search(&mut graph.new_context(), &graph, &mut session, &params).unwrap();

    let spire = graph.position("Spire").unwrap();
    let vault = graph.position("Vault").unwrap();
    assert_eq!(session.found_pairs().len(), 3);
    assert_eq!(
        session.remaining_pairs().iter().copied().collect::<Vec<_>>(),
        vec![(1, spire)]
    );
    assert!(session.all_destinations_found());
    assert!(session.is_pair_found((1, vault)));
    assert_eq!(session.new_results().len(), 3);
}
