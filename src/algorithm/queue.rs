use crate::common::SearchNode;
use crate::error::{MazeError, Result};

use std::cmp::Ordering;
use std::collections::BinaryHeap;

// Heap entry carrying the insertion sequence used to break ties.
#[derive(Debug, Clone, PartialEq, Eq)]
struct QueueEntry {
    node: SearchNode,
    sequence: u64,
}

// Implement ordering for the heap where lower costs are given higher priority.
impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .node
            .f_cost
            .cmp(&self.node.f_cost)
            // Earlier pushes win among equal f costs
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Binary min-heap of search frontier nodes keyed on `f_cost`.
///
/// Nodes with equal `f_cost` come out in the order they were pushed. The same
/// cell may be pushed any number of times; nothing is deduplicated.
#[derive(Debug, Default)]
pub struct PriorityQueue {
    heap: BinaryHeap<QueueEntry>,
    next_sequence: u64,
}

impl PriorityQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        PriorityQueue {
            heap: BinaryHeap::with_capacity(capacity),
            next_sequence: 0,
        }
    }

    pub fn push(&mut self, node: SearchNode) {
        self.heap.push(QueueEntry {
            node,
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;
    }

    pub fn pop(&mut self) -> Result<SearchNode> {
        self.heap
            .pop()
            .map(|entry| entry.node)
            .ok_or(MazeError::EmptyQueue)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
