//! Cost-ordered priority queue of pending search nodes.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::node::{NodeKey, SearchNode};

/// A queue entry wrapping a node with its ordering key.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<NodeKey>` to get
/// min-heap behavior (lowest cost first).
struct QueueEntry<C> {
    key: Reverse<NodeKey>,
    node: SearchNode<C>,
}

impl<C> PartialEq for QueueEntry<C> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<C> Eq for QueueEntry<C> {}

impl<C> PartialOrd for QueueEntry<C> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<C> Ord for QueueEntry<C> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Min-cost queue with a size high-water mark.
pub struct NodeQueue<C> {
    heap: BinaryHeap<QueueEntry<C>>,
    high_water: u64,
}

impl<C> NodeQueue<C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            high_water: 0,
        }
    }

    pub fn push(&mut self, node: SearchNode<C>) {
        self.heap.push(QueueEntry {
            key: Reverse(node.key()),
            node,
        });
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Pop the cheapest node.
    pub fn pop(&mut self) -> Option<SearchNode<C>> {
        self.heap.pop().map(|e| e.node)
    }

    /// Key of the node [`NodeQueue::pop`] would return next.
    #[must_use]
    pub fn peek_key(&self) -> Option<NodeKey> {
        self.heap.peek().map(|e| e.key.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// High-water mark of queue size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}

impl<C> Default for NodeQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for NodeQueue<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeQueue")
            .field("len", &self.heap.len())
            .field("high_water", &self.high_water)
            .finish()
    }
}
