//! Resumable search session.
//!
//! A session carries everything a search call leaves behind so that the next
//! call can pick up where the last one stopped: the queue, the per-group
//! frontiers, the results recorded so far and the accumulated statistics.
//! Starts and destinations are fixed at creation.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;
use std::time::Duration;

use lodestar_kernel::carrier::position::Position;

use crate::action::Action;
use crate::contract::SearchWorld;
use crate::error::SearchError;
use crate::frontier::StateFrontier;
use crate::node::{SearchNode, StartIndex, TraversalRules};
use crate::policy::{SearchParams, StartPosition};
use crate::queue::NodeQueue;

/// A `(start, destination)` pair.
pub type StartDestination = (StartIndex, Position);

/// Resumable state of one search.
pub struct SearchSession<C> {
    graph_id: String,
    starts: Vec<StartPosition>,
    destinations: Vec<Position>,
    frontiers: Vec<StateFrontier>,
    queue: NodeQueue<C>,
    next_node_id: u64,
    results: Vec<SearchNode<C>>,
    new_results_from: usize,
    recorded: HashSet<u64>,
    found: BTreeSet<StartDestination>,
    remaining: BTreeSet<StartDestination>,
    nodes_popped: u64,
    search_time: Duration,
    timed_out: bool,
    stateless: bool,
}

impl<C> SearchSession<C> {
    /// Create a session for `world` and seed it with one root node per start.
    ///
    /// Starts sharing a group key share one frontier. A start whose states
    /// its group's frontier already covers gets no root node.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidParams`] if `params` fails validation.
    pub fn new<W>(world: &W, params: &SearchParams) -> Result<Self, SearchError>
    where
        W: SearchWorld<C> + ?Sized,
    {
        params.validate()?;

        let mut destinations: Vec<Position> = Vec::with_capacity(params.destinations.len());
        for &destination in &params.destinations {
            if !destinations.contains(&destination) {
                destinations.push(destination);
            }
        }

        let mut session = Self {
            graph_id: world.world_id().to_string(),
            starts: params.starts.clone(),
            destinations,
            frontiers: Vec::new(),
            queue: NodeQueue::new(),
            next_node_id: 0,
            results: Vec::new(),
            new_results_from: 0,
            recorded: HashSet::new(),
            found: BTreeSet::new(),
            remaining: BTreeSet::new(),
            nodes_popped: 0,
            search_time: Duration::ZERO,
            timed_out: false,
            stateless: params.stateless,
        };

        for start in 0..session.starts.len() {
            for &destination in &session.destinations {
                session.remaining.insert((start, destination));
            }
        }

        let mut named_groups: BTreeMap<&str, usize> = BTreeMap::new();
        let mut roots = Vec::with_capacity(params.starts.len());
        for (index, start) in params.starts.iter().enumerate() {
            let group = match start.group.as_deref() {
                Some(key) => *named_groups.entry(key).or_insert_with(|| {
                    session.frontiers.push(StateFrontier::new());
                    session.frontiers.len() - 1
                }),
                None => {
                    session.frontiers.push(StateFrontier::new());
                    session.frontiers.len() - 1
                }
            };
            let Some(accepted) = session.frontiers[group].try_add(start.position, &start.states)
            else {
                continue;
            };
            roots.push(SearchNode::root(
                session.next_node_id,
                index,
                group,
                start.position,
                accepted,
                start.cost,
            ));
            session.next_node_id += 1;
        }
        for root in roots {
            session.queue.push(root);
        }

        Ok(session)
    }

    #[must_use]
    pub fn graph_id(&self) -> &str {
        &self.graph_id
    }

    #[must_use]
    pub fn starts(&self) -> &[StartPosition] {
        &self.starts
    }

    /// Destinations, deduplicated, in first-seen order.
    #[must_use]
    pub fn destinations(&self) -> &[Position] {
        &self.destinations
    }

    #[must_use]
    pub fn is_destination(&self, position: Position) -> bool {
        self.destinations.contains(&position)
    }

    /// Check that `params` describes the same search this session was
    /// created for.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::SessionMismatch`] if the starts or the
    /// (deduplicated) destinations differ.
    pub fn check_params(&self, params: &SearchParams) -> Result<(), SearchError> {
        if params.starts != self.starts {
            return Err(SearchError::SessionMismatch {
                detail: format!(
                    "session has {} start(s), call passed {} differing start(s)",
                    self.starts.len(),
                    params.starts.len()
                ),
            });
        }
        let same_destinations = params
            .destinations
            .iter()
            .all(|d| self.destinations.contains(d))
            && self
                .destinations
                .iter()
                .all(|d| params.destinations.contains(d));
        if !same_destinations {
            return Err(SearchError::SessionMismatch {
                detail: "destinations differ from the ones the session was created with".into(),
            });
        }
        Ok(())
    }

    pub fn push(&mut self, node: SearchNode<C>) {
        self.queue.push(node);
    }

    pub fn pop(&mut self) -> Option<SearchNode<C>> {
        self.queue.pop()
    }

    #[must_use]
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_queue_empty(&self) -> bool {
        self.queue.is_empty()
    }

    #[must_use]
    pub fn queue_high_water(&self) -> u64 {
        self.queue.high_water()
    }

    /// The frontier shared by the starts of group `group`.
    #[must_use]
    pub fn frontier(&self, group: usize) -> Option<&StateFrontier> {
        self.frontiers.get(group)
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.frontiers.len()
    }

    /// Every destination-reaching node recorded so far, in discovery order.
    #[must_use]
    pub fn results(&self) -> &[SearchNode<C>] {
        &self.results
    }

    /// Results recorded since the last [`SearchSession::reset_for_new_call`].
    #[must_use]
    pub fn new_results(&self) -> &[SearchNode<C>] {
        &self.results[self.new_results_from..]
    }

    #[must_use]
    pub fn is_recorded(&self, node_id: u64) -> bool {
        self.recorded.contains(&node_id)
    }

    /// Pairs reached by at least one result.
    #[must_use]
    pub fn found_pairs(&self) -> &BTreeSet<StartDestination> {
        &self.found
    }

    /// Pairs not yet reached.
    #[must_use]
    pub fn remaining_pairs(&self) -> &BTreeSet<StartDestination> {
        &self.remaining
    }

    #[must_use]
    pub fn is_destination_found(&self, destination: Position) -> bool {
        self.found.iter().any(|&(_, d)| d == destination)
    }

    #[must_use]
    pub fn is_pair_found(&self, pair: StartDestination) -> bool {
        self.found.contains(&pair)
    }

    /// Whether every destination has been reached from some start.
    #[must_use]
    pub fn all_destinations_found(&self) -> bool {
        self.destinations
            .iter()
            .all(|&d| self.is_destination_found(d))
    }

    /// Nodes expanded across all calls.
    #[must_use]
    pub fn nodes_popped(&self) -> u64 {
        self.nodes_popped
    }

    /// Wall-clock time spent inside search calls, summed across calls.
    #[must_use]
    pub fn search_time(&self) -> Duration {
        self.search_time
    }

    /// Whether any call has hit its time limit.
    #[must_use]
    pub fn has_timed_out(&self) -> bool {
        self.timed_out
    }

    /// Whether the session has switched to stateless evaluation. Sticky.
    #[must_use]
    pub fn is_stateless(&self) -> bool {
        self.stateless
    }

    /// Clear the "new since last call" view. Everything else carries over.
    pub fn reset_for_new_call(&mut self) {
        self.new_results_from = self.results.len();
    }

    pub(crate) fn mark_timed_out(&mut self) {
        self.timed_out = true;
    }

    pub(crate) fn switch_to_stateless(&mut self) {
        self.stateless = true;
    }

    pub(crate) fn add_search_time(&mut self, elapsed: Duration) {
        self.search_time += elapsed;
    }

    pub(crate) fn count_pop(&mut self) {
        self.nodes_popped += 1;
    }

    /// Record `node` as a result. Returns `false` if its id is already recorded.
    pub(crate) fn record(&mut self, node: &SearchNode<C>) -> bool {
        if !self.recorded.insert(node.node_id()) {
            return false;
        }
        let pair = (node.start(), node.position());
        self.found.insert(pair);
        self.remaining.remove(&pair);
        self.results.push(node.clone());
        true
    }

    /// Expand `node` through `actions` and queue every child the group
    /// frontier accepts. Returns the number of children queued.
    pub(crate) fn expand(
        &mut self,
        node: &SearchNode<C>,
        ctx: &C,
        actions: &[Arc<Action<C>>],
        rules: TraversalRules,
    ) -> usize {
        let frontier = &mut self.frontiers[node.group()];
        let mut children = 0;
        for action in actions {
            if let Some(child) = node.traverse(action, ctx, frontier, rules, self.next_node_id) {
                self.next_node_id += 1;
                self.queue.push(child);
                children += 1;
            }
        }
        children
    }
}

impl<C> std::fmt::Debug for SearchSession<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchSession")
            .field("graph_id", &self.graph_id)
            .field("queue", &self.queue)
            .field("results", &self.results.len())
            .field("remaining", &self.remaining.len())
            .field("nodes_popped", &self.nodes_popped)
            .field("timed_out", &self.timed_out)
            .field("stateless", &self.stateless)
            .finish_non_exhaustive()
    }
}
