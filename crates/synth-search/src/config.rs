//! Configuration resolution.
//!
//! The upstream algorithm layers "smart defaults" — callables that resolve
//! themselves on first read and cache the result. Here that collapses into
//! a plain record: every field either is required and stays `Option` until
//! [`crate::synthesize`] checks it, or has a concrete default computed once
//! by [`SynthesisOptions::default`].

use std::sync::Arc;

use synth_dispatch::Dispatcher;
use synth_gateset::{GateSet, QubitGateSet};
use synth_ir::Matrix;
use synth_solver::{distance_up_to_phase, CoordinateDescentSolver, Solver};

/// How many frontier entries to pop per expansion cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Beams {
    /// A caller-fixed beam width.
    Fixed(usize),
    /// `max(1, floor(num_tasks / |search_layers|))`, resolved once the
    /// driver knows how many search layers the gate set offers at the
    /// target's width.
    Auto,
}

/// A distance/error function `(U, V) -> real`, pluggable per §6.
pub type EvalFn = Arc<dyn Fn(&Matrix, &Matrix) -> f64 + Send + Sync>;

/// A heuristic function `(distance, depth) -> priority`, pluggable per §4.7.
pub type HeuristicFn = Arc<dyn Fn(f64, f64) -> f64 + Send + Sync>;

/// All configuration the synthesis entry point needs, resolved once at
/// call time.
#[derive(Clone)]
pub struct SynthesisOptions {
    /// Target unitary. Required — [`crate::synthesize`] rejects `None`
    /// with `SynthError::MissingRequiredOption`.
    pub target: Option<Matrix>,
    /// Gate-set catalog.
    pub gateset: Arc<dyn GateSet>,
    /// Continuous optimizer.
    pub solver: Arc<dyn Solver>,
    /// Parallel job dispatcher.
    pub dispatcher: Arc<dyn Dispatcher>,
    /// Distance/error function.
    pub eval_func: EvalFn,
    /// Priority heuristic.
    pub heuristic: HeuristicFn,
    /// Maximum search-tree depth; `None` is unbounded.
    pub depth: Option<usize>,
    /// Residual below which the target is considered matched.
    pub threshold: f64,
    /// Frontier entries to pop per expansion cycle.
    pub beams: Beams,
    /// Worker pool size for the dispatcher.
    pub num_tasks: usize,
    /// Wall-clock budget for the whole search, if any.
    pub timeout: Option<std::time::Duration>,
    /// Path to the checkpoint file, if checkpointing is enabled.
    pub statefile: Option<std::path::PathBuf>,
    /// Progress verbosity, 0 (warnings only) through 2 (per-node debug).
    pub verbosity: u8,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        let num_tasks = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self {
            target: None,
            gateset: Arc::new(QubitGateSet),
            solver: Arc::new(CoordinateDescentSolver::default()),
            dispatcher: Arc::new(synth_dispatch::RayonDispatcher::new(num_tasks)),
            eval_func: Arc::new(distance_up_to_phase),
            heuristic: Arc::new(|distance, depth| distance + depth),
            depth: None,
            threshold: 0.01,
            beams: Beams::Auto,
            num_tasks,
            timeout: None,
            statefile: None,
            verbosity: 0,
        }
    }
}

impl SynthesisOptions {
    /// Start from the defaults with `target` set — the common entry point
    /// for callers who only want to override a couple of fields.
    pub fn for_target(target: Matrix) -> Self {
        Self {
            target: Some(target),
            ..Self::default()
        }
    }

    /// Resolve `beams` against the number of search layers available at
    /// the target's width.
    pub fn resolve_beam(&self, num_search_layers: usize) -> usize {
        match self.beams {
            Beams::Fixed(n) => n.max(1),
            Beams::Auto => {
                if num_search_layers == 0 {
                    1
                } else {
                    (self.num_tasks / num_search_layers).max(1)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_beam_shrinks_to_one_when_workers_scarce() {
        let mut opts = SynthesisOptions::default();
        opts.num_tasks = 1;
        opts.beams = Beams::Auto;
        assert_eq!(opts.resolve_beam(8), 1);
    }

    #[test]
    fn auto_beam_divides_workers_by_layer_count() {
        let mut opts = SynthesisOptions::default();
        opts.num_tasks = 16;
        opts.beams = Beams::Auto;
        assert_eq!(opts.resolve_beam(4), 4);
    }

    #[test]
    fn fixed_beam_ignores_layer_count() {
        let mut opts = SynthesisOptions::default();
        opts.beams = Beams::Fixed(7);
        assert_eq!(opts.resolve_beam(100), 7);
    }
}
