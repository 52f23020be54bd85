//! Search entry point and expansion loop.
//!
//! ```text
//! loop:
//!   node = pop                       ; none → Exhausted
//!   time limit  → push back, TimedOut (or switch to stateless and go on)
//!   cost limit  → push back, CostLimitReached
//!   depth limit → push back, DepthLimitReached
//!   destination hit, not yet recorded:
//!       record; termination satisfied → push back, Success
//!   apply node states to ctx (scoped)
//!       children = traverse(actions_from(node))
//!   restore ctx
//! ```
//!
//! Every suspension pushes the popped node back unexpanded, so a later call
//! with the same session continues exactly where this one stopped. A node
//! pushed back after a destination hit is recognized by its id on the next
//! pop and expanded without being recorded twice.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, trace};

use lodestar_kernel::context::{EvaluationContext, ScopedStates};

use crate::contract::SearchWorld;
use crate::error::SearchError;
use crate::node::{SearchNode, TraversalRules};
use crate::policy::{SearchParams, TerminationCondition};
use crate::session::SearchSession;

/// How a search call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    /// A destination hit satisfied the termination condition.
    Success,
    /// The queue ran dry.
    Exhausted,
    /// The per-call time budget ran out.
    TimedOut,
    /// The cheapest pending node costs more than `max_cost`.
    CostLimitReached,
    /// The cheapest pending node is deeper than `max_depth`.
    DepthLimitReached,
}

impl SearchOutcome {
    /// Whether the session still holds work a later call could continue.
    ///
    /// Only [`SearchOutcome::Exhausted`] is final.
    #[must_use]
    pub fn is_resumable(self) -> bool {
        !matches!(self, Self::Exhausted)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Exhausted => "exhausted",
            Self::TimedOut => "timed_out",
            Self::CostLimitReached => "cost_limit_reached",
            Self::DepthLimitReached => "depth_limit_reached",
        }
    }
}

impl std::fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run (or resume) a search.
///
/// Results accumulate in `session`; [`SearchSession::new_results`] holds the
/// ones found by this call. The context is left exactly as it was passed in.
///
/// # Errors
///
/// Returns a [`SearchError`] before touching the session if the context or
/// world belongs to a different graph than the session, or `params` is
/// invalid or describes different starts/destinations.
///
/// # Panics
///
/// Panics if `world` offers an action whose source does not admit the
/// expanded node's position.
pub fn search<C, W>(
    ctx: &mut C,
    world: &W,
    session: &mut SearchSession<C>,
    params: &SearchParams,
) -> Result<SearchOutcome, SearchError>
where
    C: EvaluationContext,
    W: SearchWorld<C> + ?Sized,
{
    if ctx.graph_id() != session.graph_id() {
        return Err(SearchError::ContextMismatch {
            expected: session.graph_id().to_string(),
            found: ctx.graph_id().to_string(),
        });
    }
    if world.world_id() != session.graph_id() {
        return Err(SearchError::WorldMismatch {
            expected: session.graph_id().to_string(),
            found: world.world_id().to_string(),
        });
    }
    params.validate()?;
    session.check_params(params)?;

    session.reset_for_new_call();
    let call_started = Instant::now();
    let mut budget_started = call_started;
    let mut expanded_since_budget = 0_u64;

    debug!(
        event = "search_start",
        graph_id = session.graph_id(),
        queue_len = session.queue_len(),
        results = session.results().len(),
        stateless = params.stateless || session.is_stateless(),
    );

    let outcome = loop {
        let Some(node) = session.pop() else {
            break SearchOutcome::Exhausted;
        };

        if let Some(max_time) = params.max_time {
            // At least one expansion per budget, so tiny limits still progress.
            if expanded_since_budget > 0 && budget_started.elapsed() >= max_time {
                session.push(node);
                session.mark_timed_out();
                if params.continue_stateless && !(params.stateless || session.is_stateless()) {
                    session.switch_to_stateless();
                    info!(
                        event = "stateless_fallback",
                        graph_id = session.graph_id(),
                        queue_len = session.queue_len(),
                        elapsed_ms = budget_started.elapsed().as_millis(),
                    );
                    budget_started = Instant::now();
                    expanded_since_budget = 0;
                    continue;
                }
                debug!(event = "limit_reached", limit = "time", queue_len = session.queue_len());
                break SearchOutcome::TimedOut;
            }
        }

        if node.cost() > params.max_cost {
            debug!(event = "limit_reached", limit = "cost", cost = node.cost());
            session.push(node);
            break SearchOutcome::CostLimitReached;
        }

        if node.depth() > params.max_depth {
            debug!(event = "limit_reached", limit = "depth", depth = node.depth());
            session.push(node);
            break SearchOutcome::DepthLimitReached;
        }

        if session.is_destination(node.position()) && !session.is_recorded(node.node_id()) {
            let terminate = record_hit(session, &node, params.termination);
            debug!(
                event = "destination_reached",
                node_id = node.node_id(),
                start = node.start(),
                position = %node.position(),
                cost = node.cost(),
                depth = node.depth(),
                terminate,
            );
            if terminate {
                session.push(node);
                break SearchOutcome::Success;
            }
        }

        let rules = TraversalRules {
            stateless: params.stateless || session.is_stateless(),
            disallow_backtracking: params.disallow_backtracking,
        };
        let children = {
            let scoped = ScopedStates::apply(ctx, node.position(), node.states().clone());
            let actions = world.actions_from(&node, &scoped);
            session.expand(&node, &scoped, &actions, rules)
        };
        session.count_pop();
        expanded_since_budget += 1;

        trace!(
            event = "expand",
            node_id = node.node_id(),
            position = %node.position(),
            cost = node.cost(),
            depth = node.depth(),
            children,
        );
    };

    session.add_search_time(call_started.elapsed());

    debug!(
        event = "search_end",
        graph_id = session.graph_id(),
        outcome = outcome.as_str(),
        new_results = session.new_results().len(),
        nodes_popped = session.nodes_popped(),
        queue_len = session.queue_len(),
        elapsed_ms = call_started.elapsed().as_millis(),
    );

    Ok(outcome)
}

/// Record a destination hit and decide whether it ends the call.
///
/// The "unique" conditions look at the found set before this hit; the
/// "every" conditions look at it after.
fn record_hit<C>(
    session: &mut SearchSession<C>,
    node: &SearchNode<C>,
    condition: TerminationCondition,
) -> bool {
    let pair = (node.start(), node.position());
    let destination_seen = session.is_destination_found(node.position());
    let pair_seen = session.is_pair_found(pair);

    session.record(node);

    match condition {
        TerminationCondition::None => false,
        TerminationCondition::Any => true,
        TerminationCondition::AnyUniqueDestination => !destination_seen,
        TerminationCondition::AnyUniqueStartAndDestination => !pair_seen,
        TerminationCondition::EveryDestination => session.all_destinations_found(),
        TerminationCondition::EveryStartAndDestination => session.remaining_pairs().is_empty(),
    }
}
