//! Binary that runs the `hub` world exhaustively and prints deterministic
//! output lines for cross-process verification.
//!
//! Usage: `search_fixture`
//!
//! Output: `key=value` lines, then one `result=` line per recorded result.

use lodestar_harness::runner::run_search;
use lodestar_harness::worlds::hub::{hub, hub_params};
use lodestar_search::policy::TerminationCondition;

fn main() {
    let graph = hub().expect("hub world builds");
    let params =
        hub_params(&graph, TerminationCondition::None).expect("hub positions resolve");
    let report =
        run_search(&mut graph.new_context(), &graph, &params).expect("search run failed");

    println!("graph_id={}", report.graph_id);
    println!("outcome={}", report.outcome);
    println!("nodes_popped={}", report.nodes_popped);
    println!("queue_high_water={}", report.queue_high_water);
    println!("result_count={}", report.results.len());
    for result in &report.results {
        println!(
            "result={}:{}->{}@{}:{}",
            result.node_id,
            result.start_position,
            result.destination,
            result.cost,
            result.path.join(",")
        );
    }
}
