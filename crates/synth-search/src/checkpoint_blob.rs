//! The checkpoint blob shape: what gets saved and restored between runs.
//!
//! Opaque to `synth-checkpoint` (which only knows how to durably store
//! *some* serializable `T`); this crate is the only one that knows what the
//! blob actually contains.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use synth_ir::GateNode;

use crate::frontier::FrontierEntry;

/// The best circuit-and-parameters pair found so far.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestPair {
    /// The circuit.
    pub circuit: Arc<GateNode>,
    /// Its solved parameters.
    pub theta: Vec<f64>,
}

/// Everything the driver needs to resume a search exactly where it left
/// off. Version-tagged so a future format change can detect and reject
/// (or migrate) stale checkpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointBlob {
    /// Format version. Bump when the shape changes incompatibly.
    pub version: u32,
    /// Every frontier entry, unordered (re-heapified on load).
    pub frontier: Vec<FrontierEntry>,
    /// Frontier's insertion counter, so newly pushed entries keep getting
    /// strictly increasing tiebreakers after resume.
    pub tiebreaker_counter: u64,
    /// Best depth found so far.
    pub best_depth: f64,
    /// Best residual found so far.
    pub best_distance: f64,
    /// Best circuit-and-parameters pair found so far.
    pub best_pair: BestPair,
    /// Wall-clock seconds accumulated across this and all prior runs.
    pub elapsed_seconds: f64,
}

/// Current checkpoint format version.
pub const CHECKPOINT_VERSION: u32 = 1;
