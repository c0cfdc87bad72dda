//! Collapse candidate queue with lazy invalidation
//!
//! Entries are never updated or removed in place. Each candidate carries the
//! version stamps of its endpoints taken when it was pushed; a popped
//! candidate whose stamps no longer match is stale and gets dropped.

use priority_queue::PriorityQueue;
use std::cmp::Ordering;

/// A queued edge collapse, `v1 < v2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub v1: usize,
    pub v2: usize,
    pub cost: f64,
    pub stamp1: u32,
    pub stamp2: u32,
}

impl Candidate {
    /// Whether both stamps still match the current vertex versions.
    pub fn is_current(&self, versions: &[u32]) -> bool {
        versions[self.v1] == self.stamp1 && versions[self.v2] == self.stamp2
    }
}

/// Heap priority: cheapest first, then lowest `v1`, lowest `v2`, oldest push.
#[derive(Debug, Clone, Copy)]
struct Ranked {
    candidate: Candidate,
    seq: u64,
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap, so every comparison is reversed
        let (a, b) = (&self.candidate, &other.candidate);
        b.cost
            .total_cmp(&a.cost)
            .then_with(|| b.v1.cmp(&a.v1))
            .then_with(|| b.v2.cmp(&a.v2))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-cost queue of collapse candidates.
#[derive(Debug, Default)]
pub struct CandidateQueue {
    heap: PriorityQueue<u64, Ranked>,
    next_seq: u64,
    stale: usize,
}

impl CandidateQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, candidate: Candidate) {
        debug_assert!(candidate.v1 < candidate.v2, "candidate pair must be canonical");
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(seq, Ranked { candidate, seq });
    }

    /// Pop the cheapest candidate whose stamps match `versions`, discarding
    /// stale entries on the way.
    pub fn pop_valid(&mut self, versions: &[u32]) -> Option<Candidate> {
        while let Some((_, ranked)) = self.heap.pop() {
            if ranked.candidate.is_current(versions) {
                return Some(ranked.candidate);
            }
            self.stale += 1;
        }
        None
    }

    /// Entries still in the heap, stale ones included.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of stale candidates discarded so far.
    pub fn stale_discarded(&self) -> usize {
        self.stale
    }
}
