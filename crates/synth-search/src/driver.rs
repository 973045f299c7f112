//! The search driver: frontier maintenance, beam expansion, the literal
//! acceptance rule, checkpointing, and the three termination states.

use std::sync::Arc;
use std::time::Instant;

use synth_dispatch::{CancellationToken, Job};
use synth_ir::GateNode;
use tracing::{debug, info, instrument, warn};

use crate::checkpoint_blob::{BestPair, CheckpointBlob, CHECKPOINT_VERSION};
use crate::config::SynthesisOptions;
use crate::error::{SynthError, SynthResult};
use crate::frontier::Frontier;

/// The result of a completed (or terminated) synthesis run.
#[derive(Debug, Clone)]
pub struct SynthesisOutput {
    /// The best circuit found.
    pub structure: Arc<GateNode>,
    /// Its solved parameters.
    pub vector: Vec<f64>,
    /// The residual distance it achieved.
    pub best_distance: f64,
    /// Its depth in the search tree.
    pub best_depth: f64,
}

/// Find `n` such that `d^n == dimension`, or report `IncompatibleTarget`.
fn qudit_count(dimension: usize, d: usize) -> Result<usize, SynthError> {
    if d < 2 {
        return Err(SynthError::IncompatibleTarget { dimension, d });
    }
    let mut power = 1usize;
    for n in 0..=64 {
        if power == dimension {
            return Ok(n);
        }
        match power.checked_mul(d) {
            Some(next) => power = next,
            None => break,
        }
    }
    Err(SynthError::IncompatibleTarget { dimension, d })
}

/// Run the synthesizer to completion (or until a termination state is hit)
/// and return the best circuit-and-parameters pair.
#[instrument(level = "info", skip(options))]
pub fn synthesize(options: &SynthesisOptions) -> SynthResult<SynthesisOutput> {
    let target = options
        .target
        .as_ref()
        .ok_or(SynthError::MissingRequiredOption("target"))?;

    let d = options.gateset.d();
    let n = qudit_count(target.dim().0, d)?;

    let start = Instant::now();
    let checkpoint_store = options
        .statefile
        .as_ref()
        .map(|path| synth_checkpoint::JsonCheckpointStore::new(path.clone()));

    let loaded: Option<CheckpointBlob> = match &checkpoint_store {
        Some(store) => match synth_checkpoint::CheckpointStore::load(store) {
            Ok(blob) => blob,
            Err(e) => {
                warn!(error = %e, "checkpoint read failed, starting fresh");
                None
            }
        },
        None => None,
    };

    let (mut frontier, mut best_distance, mut best_depth, mut best_pair, elapsed_base) =
        match loaded {
            Some(blob) => {
                info!(best_depth = blob.best_depth, best_distance = blob.best_distance, "resumed from checkpoint");
                (
                    Frontier::from_parts(blob.frontier, blob.tiebreaker_counter),
                    blob.best_distance,
                    blob.best_depth,
                    blob.best_pair,
                    blob.elapsed_seconds,
                )
            }
            None => {
                let mut frontier = Frontier::new();
                let initial_layer = options.gateset.initial_layer(n);
                let root = Arc::new(
                    GateNode::product(vec![initial_layer]).expect("single-child Product is always valid"),
                );
                let solved = options
                    .solver
                    .solve_for_unitary(&root, target, None)
                    .map_err(SynthError::Solver)?;
                let distance = (options.eval_func)(target, &solved.matrix);
                let priority = (options.heuristic)(distance, 0.0);
                frontier.push(priority, 0.0, distance, solved.theta.clone(), Arc::clone(&root));
                let best_pair = BestPair {
                    circuit: Arc::clone(&root),
                    theta: solved.theta,
                };
                (frontier, distance, 0.0, best_pair, 0.0)
            }
        };

    if options.depth == Some(0) {
        return Ok(SynthesisOutput {
            structure: best_pair.circuit,
            vector: best_pair.theta,
            best_distance,
            best_depth,
        });
    }

    let search_layers = options.gateset.search_layers(n);
    if search_layers.is_empty() {
        debug!("gate set has no branching at this width, returning initial layer");
        return Ok(SynthesisOutput {
            structure: best_pair.circuit,
            vector: best_pair.theta,
            best_distance,
            best_depth,
        });
    }

    let beam = options.resolve_beam(search_layers.len());
    let cancel = CancellationToken::new();

    while !frontier.is_empty() {
        let elapsed = elapsed_base + start.elapsed().as_secs_f64();
        if let Some(timeout) = options.timeout {
            if elapsed > timeout.as_secs_f64() {
                info!(elapsed, "timeout reached");
                break;
            }
        }
        if best_distance < options.threshold {
            info!(best_distance, "threshold met");
            frontier.clear();
            cancel.cancel();
            break;
        }

        let popped = frontier.pop_beam(beam);
        if popped.is_empty() {
            break;
        }

        let mut jobs = Vec::with_capacity(popped.len() * search_layers.len());
        for entry in &popped {
            for layer in &search_layers {
                let child = match entry.circuit.appending(Arc::clone(&layer.gate)) {
                    Ok(child) => Arc::new(child),
                    Err(e) => {
                        warn!(error = %e, "skipping layer incompatible with this circuit's width");
                        continue;
                    }
                };
                let new_depth = entry.depth + layer.weight;
                let mut theta_seed = entry.theta_seed.clone();
                theta_seed.resize(child.arity(), 0.0);
                jobs.push(Job {
                    circuit: child,
                    depth: new_depth,
                    theta_seed: Some(theta_seed),
                });
            }
        }

        let results = options
            .dispatcher
            .solve_all(jobs, target, options.solver.as_ref(), &cancel)
            .map_err(SynthError::Dispatch)?;

        for result in results {
            let new_depth = result.depth;
            let current_value = (options.eval_func)(target, &result_matrix(&result));

            let clause_a = current_value < best_distance
                && (best_distance >= options.threshold || new_depth <= best_depth);
            let clause_b = current_value < options.threshold && new_depth < best_depth;
            if clause_a || clause_b {
                best_distance = current_value;
                best_depth = new_depth;
                best_pair = BestPair {
                    circuit: Arc::clone(&result.circuit),
                    theta: result.theta.clone(),
                };
                debug!(best_distance, best_depth, "new best");
            }

            let should_push = options.depth.is_none_or(|target_depth| new_depth < target_depth as f64);
            if should_push {
                let priority = (options.heuristic)(current_value, new_depth);
                frontier.push(priority, new_depth, current_value, result.theta, result.circuit);
            }
        }

        if let Some(store) = &checkpoint_store {
            let blob = CheckpointBlob {
                version: CHECKPOINT_VERSION,
                frontier: frontier.snapshot(),
                tiebreaker_counter: frontier.insertion_counter(),
                best_depth,
                best_distance,
                best_pair: best_pair.clone(),
                elapsed_seconds: elapsed_base + start.elapsed().as_secs_f64(),
            };
            if let Err(e) = synth_checkpoint::CheckpointStore::save(store, &blob) {
                warn!(error = %e, "checkpoint write failed, continuing without it");
            }
        }
    }

    Ok(SynthesisOutput {
        structure: best_pair.circuit,
        vector: best_pair.theta,
        best_distance,
        best_depth,
    })
}

/// Re-evaluate a job result's matrix from its circuit and theta. The
/// dispatcher only carries the solver's own residual, which may use a
/// different metric than the caller's `eval_func`; the driver always
/// re-derives `current_value` from `eval_func` to honor §6's pluggability.
fn result_matrix(result: &synth_dispatch::JobResult) -> synth_ir::Matrix {
    synth_ir::circuit_matrix(&result.circuit, &result.theta).expect("theta length matches arity by construction")
}
