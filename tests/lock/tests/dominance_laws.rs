//! Dominance is a partial order over states of equal arity, and schema
//! orientation makes "better" mean "dominates" for both preferences.

use lodestar_kernel::carrier::schema::{Preference, StateSchema};
use lodestar_kernel::carrier::state::State;
use lodestar_kernel::carrier::state_set::StateSet;
use proptest::prelude::*;

fn state(arity: usize) -> impl Strategy<Value = State> {
    prop::collection::vec(-4_i32..4, arity).prop_map(State::from_fields)
}

proptest! {
    #[test]
    fn reflexive(a in state(3)) {
        prop_assert!(a.dominates(&a));
        prop_assert!(a.comparably_equals(&a));
    }

    #[test]
    fn antisymmetric(a in state(3), b in state(3)) {
        if a.dominates(&b) && b.dominates(&a) {
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn transitive(a in state(3), b in state(3), c in state(3)) {
        if a.dominates(&b) && b.dominates(&c) {
            prop_assert!(a.dominates(&c));
        }
    }

    #[test]
    fn incomparable_is_symmetric(a in state(3), b in state(3)) {
        prop_assert_eq!(a.is_incomparable(&b), b.is_incomparable(&a));
    }

    #[test]
    fn partial_cmp_agrees_with_dominates(a in state(2), b in state(2)) {
        prop_assert_eq!(a <= b, a.dominates(&b));
        prop_assert_eq!(a.partial_cmp(&b).is_none(), a.is_incomparable(&b));
    }

    #[test]
    fn state_sets_are_antichains(states in prop::collection::vec(state(2), 1..12)) {
        let set = StateSet::from_states(states.clone());
        let kept = set.as_slice();
        for (i, x) in kept.iter().enumerate() {
            for (j, y) in kept.iter().enumerate() {
                if i != j {
                    prop_assert!(x.is_incomparable(y), "{x:?} vs {y:?}");
                }
            }
        }
        // Every dropped input is covered by something kept.
        for s in &states {
            prop_assert!(set.covers(s));
        }
    }
}

#[test]
fn different_arity_is_incomparable() {
    let a = State::from_fields([0]);
    let b = State::from_fields([0, 0]);
    assert!(a.is_incomparable(&b));
    assert_eq!(a.partial_cmp(&b), None);
}

#[test]
fn schema_orientation_follows_preference() {
    let schema = StateSchema::new()
        .with_int("spent", 0, 10, Preference::LowerIsBetter)
        .unwrap()
        .with_int("carried", 0, 10, Preference::HigherIsBetter)
        .unwrap();

    let base = schema.default_state();
    let spent_more = schema.modify(&base).add_int("spent", 1).unwrap().build();
    let carried_more = schema.modify(&base).add_int("carried", 1).unwrap().build();

    assert!(base.dominates(&spent_more));
    assert!(!spent_more.dominates(&base));
    assert!(carried_more.dominates(&base));
    assert!(!base.dominates(&carried_more));
    assert!(spent_more.is_incomparable(&carried_more));
    assert_eq!(schema.get_int(&carried_more, "carried").unwrap(), 1);
}
