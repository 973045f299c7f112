//! The search frontier: a min-heap of candidate circuits awaiting
//! expansion, keyed on the lexicographic tuple `(priority, tiebreaker)`.
//!
//! `std::collections::BinaryHeap` is a max-heap, so [`FrontierEntry`]'s
//! `Ord` impl is written backwards — smaller priority, and on a tie smaller
//! (earlier) tiebreaker, compares as *greater* — the same inversion
//! `arvak-sched`'s job queue uses to turn "highest priority first" into a
//! max-heap pop.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use synth_ir::GateNode;

/// One candidate circuit sitting in the frontier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontierEntry {
    /// `heuristic(distance, depth)` — the sole ordering key.
    pub priority: f64,
    /// Search-tree depth (root is 0), accumulated from search-layer weights.
    pub depth: f64,
    /// Last-known solver residual for this circuit.
    pub distance: f64,
    /// Strictly increasing insertion counter; breaks priority ties FIFO.
    pub tiebreaker: u64,
    /// The optimizer's last `theta` for this circuit, passed to children as
    /// a warm start.
    pub theta_seed: Vec<f64>,
    /// The circuit itself.
    pub circuit: Arc<GateNode>,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.tiebreaker == other.tiebreaker
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        match other
            .priority
            .partial_cmp(&self.priority)
            .unwrap_or(Ordering::Equal)
        {
            Ordering::Equal => other.tiebreaker.cmp(&self.tiebreaker),
            ord => ord,
        }
    }
}

/// The frontier proper: a binary min-heap plus the insertion counter that
/// feeds every entry's tiebreaker.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    insertion_counter: u64,
}

impl Frontier {
    /// An empty frontier with a fresh tiebreaker counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a frontier from a checkpointed entry list and counter. The
    /// entries are re-heapified; their `tiebreaker`s are preserved exactly
    /// so ordering is unaffected by the save/load round trip.
    pub fn from_parts(entries: Vec<FrontierEntry>, insertion_counter: u64) -> Self {
        Self {
            heap: BinaryHeap::from(entries),
            insertion_counter,
        }
    }

    /// Snapshot every entry currently in the frontier, for checkpointing.
    /// Order is not significant — the heap is rebuilt from this list.
    pub fn snapshot(&self) -> Vec<FrontierEntry> {
        self.heap.iter().cloned().collect()
    }

    /// Current insertion counter, for checkpointing.
    pub fn insertion_counter(&self) -> u64 {
        self.insertion_counter
    }

    /// Push a new candidate, assigning it the next tiebreaker.
    pub fn push(&mut self, priority: f64, depth: f64, distance: f64, theta_seed: Vec<f64>, circuit: Arc<GateNode>) {
        let tiebreaker = self.insertion_counter;
        self.insertion_counter += 1;
        self.heap.push(FrontierEntry {
            priority,
            depth,
            distance,
            tiebreaker,
            theta_seed,
            circuit,
        });
    }

    /// Pop the lowest-`(priority, tiebreaker)` entry.
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }

    /// Pop up to `beam` entries, lowest-priority first.
    pub fn pop_beam(&mut self, beam: usize) -> Vec<FrontierEntry> {
        let mut popped = Vec::with_capacity(beam);
        for _ in 0..beam {
            match self.pop() {
                Some(entry) => popped.push(entry),
                None => break,
            }
        }
        popped
    }

    /// Number of entries currently queued.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True if no entries remain.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Discard every entry (used when the threshold is met).
    pub fn clear(&mut self) {
        self.heap.clear();
    }
}
