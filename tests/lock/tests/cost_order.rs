//! Without resumption, nodes are expanded in non-decreasing cost order.

use std::sync::{Arc, Mutex};

use lodestar_harness::context::ProgressContext;
use lodestar_harness::graph::RuleGraph;
use lodestar_harness::worlds::lattice::Lattice;
use lodestar_kernel::carrier::position::Position;
use lodestar_kernel::carrier::state_set::StateSet;
use lodestar_search::action::Action;
use lodestar_search::contract::SearchWorld;
use lodestar_search::node::SearchNode;
use lodestar_search::queue::NodeQueue;
use lodestar_search::search::search;
use lodestar_search::session::SearchSession;
use proptest::prelude::*;

/// Delegates to a rule graph and remembers the cost of every expanded node.
struct Recording<'a> {
    graph: &'a RuleGraph<ProgressContext>,
    expanded: Mutex<Vec<f64>>,
}

impl SearchWorld<ProgressContext> for Recording<'_> {
    fn world_id(&self) -> &str {
        self.graph.world_id()
    }

    fn actions_from(
        &self,
        node: &SearchNode<ProgressContext>,
        ctx: &ProgressContext,
    ) -> Vec<Arc<Action<ProgressContext>>> {
        self.expanded.lock().unwrap().push(node.cost());
        self.graph.actions_from(node, ctx)
    }
}

fn assert_non_decreasing(costs: &[f64]) {
    for pair in costs.windows(2) {
        assert!(pair[0] <= pair[1], "cost order broken: {costs:?}");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn lattice_expansions_are_cost_ordered(width in 1_u32..6, height in 1_u32..6, soul in 0_i32..3, dash: bool) {
        let lattice = Lattice::new(width, height, soul).unwrap();
        let params = lattice.corner_params().unwrap();
        let world = Recording { graph: &lattice.graph, expanded: Mutex::new(Vec::new()) };
        let mut session = SearchSession::new(&world, &params).unwrap();
        search(&mut lattice.context(dash), &world, &mut session, &params).unwrap();

        let expanded = world.expanded.into_inner().unwrap();
        prop_assert_eq!(u64::try_from(expanded.len()).unwrap(), session.nodes_popped());
        assert_non_decreasing(&expanded);

        let results: Vec<f64> = session.results().iter().map(SearchNode::cost).collect();
        assert_non_decreasing(&results);
    }

    #[test]
    fn queue_pops_by_cost_then_depth_then_age(costs in prop::collection::vec(0_u8..20, 1..40)) {
        let mut queue: NodeQueue<ProgressContext> = NodeQueue::new();
        for (id, cost) in costs.iter().enumerate() {
            queue.push(SearchNode::root(
                u64::try_from(id).unwrap(),
                0,
                0,
                Position::from_raw(0),
                StateSet::indeterminate(),
                f64::from(*cost),
            ));
        }
        prop_assert_eq!(queue.high_water(), u64::try_from(costs.len()).unwrap());

        let mut popped = Vec::new();
        while let Some(node) = queue.pop() {
            popped.push((node.cost(), node.node_id()));
        }
        let mut sorted = popped.clone();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        prop_assert_eq!(popped, sorted);
    }
}
