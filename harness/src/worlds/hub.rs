//! `hub`: two starts, two destinations, one shared junction.
//!
//! ```text
//! West --1--> Hub --1--> Vault
//! East --2--> Hub --3--> Spire
//!
//! warp (jump, 0.5, WARP > 0) --> Vault      offered from starts only
//! ```
//!
//! Destination hits in cost order, with `WARP` unset:
//!
//! | cost | start | destination |
//! |------|-------|-------------|
//! | 2    | West  | Vault       |
//! | 3    | East  | Vault       |
//! | 4    | West  | Spire       |
//! | 5    | East  | Spire       |

use std::sync::Arc;

use lodestar_kernel::carrier::state_set::StateSet;
use lodestar_search::action::ActionLogic;
use lodestar_search::policy::{SearchParams, StartPosition, TerminationCondition};

use crate::context::ProgressContext;
use crate::graph::{GraphError, RuleGraph};

pub const WORLD_ID: &str = "hub";

/// Context term that enables the warp jump.
pub const WARP: &str = "WARP";

/// Build the hub graph.
///
/// # Errors
///
/// Never in practice; propagates [`GraphError`] from the builder.
pub fn hub() -> Result<RuleGraph<ProgressContext>, GraphError> {
    let mut b = RuleGraph::builder(WORLD_ID);
    b.link("west_road", "West", "Hub", 1.0)?;
    b.link("east_road", "East", "Hub", 2.0)?;
    b.link("vault_stairs", "Hub", "Vault", 1.0)?;
    b.link("spire_lift", "Hub", "Spire", 3.0)?;
    b.jump(
        "warp",
        "Vault",
        0.5,
        ActionLogic::Gate(Arc::new(|ctx: &ProgressContext| ctx.term(WARP) > 0)),
    )?;
    Ok(b.build())
}

/// Both starts, in separate groups, to both destinations.
#[must_use]
pub fn hub_params(
    graph: &RuleGraph<ProgressContext>,
    termination: TerminationCondition,
) -> Option<SearchParams> {
    Some(
        SearchParams::new(
            vec![
                StartPosition::new(graph.position("West")?, StateSet::indeterminate()),
                StartPosition::new(graph.position("East")?, StateSet::indeterminate()),
            ],
            vec![graph.position("Vault")?, graph.position("Spire")?],
        )
        .with_termination(termination),
    )
}
