//! The open set: a min-priority queue over `(f, insertion order)`.
//!
//! Decrease-key is push-again: an improved node gets a fresh entry with
//! its new `f`, and the superseded entry is skipped at pop time because
//! the node's `in_open` flag was already consumed. Ties on `f` pop in
//! insertion (FIFO) order via the sequence number, which makes the search
//! fully deterministic.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A heap entry referencing a node by index.
#[derive(Clone, Copy, PartialEq)]
pub(crate) struct Entry {
    pub(crate) idx: usize,
    pub(crate) f: f64,
    seq: u64,
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest f first;
        // equal f falls through to the smallest sequence number (FIFO).
        // f is never NaN, but a partial_cmp failure also falls through.
        match other.f.partial_cmp(&self.f) {
            Some(Ordering::Equal) | None => other.seq.cmp(&self.seq),
            Some(ord) => ord,
        }
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority collection of discovered, not-yet-closed nodes.
pub(crate) struct OpenSet {
    heap: BinaryHeap<Entry>,
    seq: u64,
}

impl OpenSet {
    pub(crate) fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Enqueue a node with priority `f`.
    pub(crate) fn push(&mut self, idx: usize, f: f64) {
        self.heap.push(Entry {
            idx,
            f,
            seq: self.seq,
        });
        self.seq += 1;
    }

    /// Pop the entry with the smallest `(f, seq)`. May return stale
    /// entries; the caller filters them by the node's `in_open` flag.
    pub(crate) fn pop(&mut self) -> Option<Entry> {
        self.heap.pop()
    }
}
