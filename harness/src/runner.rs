//! Search orchestration: drive a session and summarize what it found.
//!
//! `run_search` creates a fresh session and makes a single call.
//! `resume_until_done` keeps calling on an existing session while calls end
//! with [`SearchOutcome::TimedOut`]. Both return a [`SearchReport`] holding
//! every result the session has recorded, in discovery order.

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use lodestar_kernel::carrier::position::PositionTable;
use lodestar_kernel::carrier::state_set::StateSet;
use lodestar_kernel::context::EvaluationContext;
use lodestar_search::config::{ConfigError, SearchConfig};
use lodestar_search::error::SearchError;
use lodestar_search::node::SearchNode;
use lodestar_search::policy::SearchParams;
use lodestar_search::search::{search, SearchOutcome};
use lodestar_search::session::SearchSession;

use crate::graph::RuleGraph;

/// Error during a harness run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    #[error("configuration failed: {0}")]
    Config(#[from] ConfigError),

    #[error("report serialization failed: {0}")]
    Report(#[from] serde_json::Error),
}

/// One recorded result, with positions and actions named.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRecord {
    pub node_id: u64,
    /// Index of the start in the search parameters.
    pub start: usize,
    pub start_position: String,
    pub destination: String,
    pub cost: f64,
    pub depth: u32,
    /// Action names, in order.
    pub path: Vec<String>,
}

impl ResultRecord {
    fn from_node<C>(node: &SearchNode<C>, table: &PositionTable) -> Self {
        Self {
            node_id: node.node_id(),
            start: node.start(),
            start_position: table.display(node.start_position()),
            destination: table.display(node.position()),
            cost: node.cost(),
            depth: node.depth(),
            path: node.path().iter().map(|a| a.name().to_string()).collect(),
        }
    }
}

/// Summary of a session after one or more search calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchReport {
    pub graph_id: String,
    /// Outcome of the last call.
    pub outcome: SearchOutcome,
    /// Number of search calls made by the runner.
    pub calls: u32,
    pub nodes_popped: u64,
    pub queue_high_water: u64,
    pub queue_remaining: usize,
    pub timed_out: bool,
    pub stateless: bool,
    pub search_time_ms: u64,
    pub results: Vec<ResultRecord>,
}

impl SearchReport {
    /// Snapshot `session`.
    #[must_use]
    pub fn from_session<C>(
        session: &SearchSession<C>,
        table: &PositionTable,
        outcome: SearchOutcome,
        calls: u32,
    ) -> Self {
        Self {
            graph_id: session.graph_id().to_string(),
            outcome,
            calls,
            nodes_popped: session.nodes_popped(),
            queue_high_water: session.queue_high_water(),
            queue_remaining: session.queue_len(),
            timed_out: session.has_timed_out(),
            stateless: session.is_stateless(),
            search_time_ms: u64::try_from(session.search_time().as_millis()).unwrap_or(u64::MAX),
            results: session
                .results()
                .iter()
                .map(|node| ResultRecord::from_node(node, table))
                .collect(),
        }
    }

    /// Result costs, in discovery order.
    #[must_use]
    pub fn costs(&self) -> Vec<f64> {
        self.results.iter().map(|r| r.cost).collect()
    }

    /// Pretty-printed JSON rendering.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Report`] if serialization fails.
    pub fn to_json(&self) -> Result<String, RunError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Create a session and make a single search call.
///
/// # Errors
///
/// Returns [`RunError::Search`] if the session cannot be created or the call
/// is rejected.
pub fn run_search<C: EvaluationContext>(
    ctx: &mut C,
    graph: &RuleGraph<C>,
    params: &SearchParams,
) -> Result<SearchReport, RunError> {
    let mut session = SearchSession::new(graph, params)?;
    let outcome = search(ctx, graph, &mut session, params)?;
    Ok(SearchReport::from_session(
        &session,
        graph.positions(),
        outcome,
        1,
    ))
}

/// Resolve `config` against the graph's positions and run it.
///
/// # Errors
///
/// Returns [`RunError::Config`] if the configuration does not resolve, or
/// [`RunError::Search`] as [`run_search`].
pub fn run_config<C: EvaluationContext>(
    ctx: &mut C,
    graph: &RuleGraph<C>,
    config: &SearchConfig,
    initial: &StateSet,
) -> Result<SearchReport, RunError> {
    let params = config.to_params(graph.positions(), initial)?;
    run_search(ctx, graph, &params)
}

/// Call [`search`] on `session` until a call ends with anything other than
/// [`SearchOutcome::TimedOut`], or `max_calls` calls have been made.
///
/// # Errors
///
/// Returns [`RunError::Search`] if a call is rejected.
pub fn resume_until_done<C: EvaluationContext>(
    ctx: &mut C,
    graph: &RuleGraph<C>,
    session: &mut SearchSession<C>,
    params: &SearchParams,
    max_calls: u32,
) -> Result<SearchReport, RunError> {
    let mut calls = 0;
    let outcome = loop {
        calls += 1;
        let outcome = search(ctx, graph, session, params)?;
        if outcome != SearchOutcome::TimedOut || calls >= max_calls {
            break outcome;
        }
    };

    info!(
        event = "run_complete",
        graph_id = session.graph_id(),
        outcome = outcome.as_str(),
        calls,
        results = session.results().len(),
        nodes_popped = session.nodes_popped(),
    );

    Ok(SearchReport::from_session(
        session,
        graph.positions(),
        outcome,
        calls,
    ))
}
