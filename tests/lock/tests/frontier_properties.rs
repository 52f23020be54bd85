//! Frontier acceptance laws: idempotence, monotonicity, and the forward-only
//! dominance check.

use lodestar_kernel::carrier::position::Position;
use lodestar_kernel::carrier::state::State;
use lodestar_kernel::carrier::state_set::StateSet;
use lodestar_search::frontier::StateFrontier;
use proptest::prelude::*;

fn state_set() -> impl Strategy<Value = StateSet> {
    prop::collection::vec(
        prop::collection::vec(-3_i32..3, 2).prop_map(State::from_fields),
        1..6,
    )
    .prop_map(StateSet::from_states)
}

proptest! {
    #[test]
    fn same_arrival_twice_is_rejected(prior in prop::collection::vec(state_set(), 0..4), set in state_set()) {
        let p = Position::from_raw(0);
        let mut frontier = StateFrontier::new();
        for s in &prior {
            let _ = frontier.try_add(p, s);
        }
        let _ = frontier.try_add(p, &set);
        prop_assert_eq!(frontier.try_add(p, &set), None);
    }

    #[test]
    fn accepted_states_are_never_dominated_by_earlier_ones(arrivals in prop::collection::vec(state_set(), 1..10)) {
        let p = Position::from_raw(3);
        let mut frontier = StateFrontier::new();
        for arrival in &arrivals {
            let before: Vec<State> = frontier.visited(p).to_vec();
            if let Some(accepted) = frontier.try_add(p, arrival) {
                for s in accepted.iter() {
                    prop_assert!(!before.iter().any(|v| v.dominates(s)), "{s:?} dominated by {before:?}");
                }
                // Visited only grows, by appending.
                prop_assert_eq!(&frontier.visited(p)[..before.len()], before.as_slice());
            } else {
                prop_assert_eq!(frontier.visited(p), before.as_slice());
            }
        }
    }

    #[test]
    fn positions_do_not_interfere(set in state_set()) {
        let mut frontier = StateFrontier::new();
        prop_assert!(frontier.try_add(Position::from_raw(1), &set).is_some());
        prop_assert!(frontier.try_add(Position::from_raw(2), &set).is_some());
    }
}

#[test]
fn dominated_entries_are_not_evicted() {
    let p = Position::from_raw(0);
    let mut frontier = StateFrontier::new();
    let worse = StateSet::single(State::from_fields([5]));
    let better = StateSet::single(State::from_fields([3]));

    assert!(frontier.try_add(p, &worse).is_some());
    assert!(frontier.try_add(p, &better).is_some());

    // The dominated [5] stays; only new arrivals are checked against old ones.
    assert_eq!(
        frontier.visited(p),
        &[State::from_fields([5]), State::from_fields([3])]
    );
    assert_eq!(frontier.state_count(), 2);
    assert_eq!(frontier.try_add(p, &worse), None);
}

#[test]
fn indeterminate_accepted_once_per_position() {
    let p = Position::from_raw(4);
    let mut frontier = StateFrontier::new();
    let marker = StateSet::indeterminate();
    assert_eq!(frontier.try_add(p, &marker), Some(StateSet::indeterminate()));
    assert_eq!(frontier.try_add(p, &marker), None);
    assert!(frontier.has_indeterminate(p));
    assert!(frontier.is_reached(p));

    // Determinate arrivals are tracked separately.
    assert!(frontier
        .try_add(p, &StateSet::single(State::from_fields([1])))
        .is_some());
    assert_eq!(frontier.position_count(), 1);
}
