//! Cross-crate end-to-end scenarios: a target unitary goes in, a solved
//! circuit comes out. These exercise the whole stack — gate set, solver,
//! dispatcher, and driver — the way `arvak-sched`'s integration tests drive
//! a full scheduling round trip rather than one component in isolation.

use std::sync::Arc;
use std::time::Duration;

use synth_checkpoint::{CheckpointStore, JsonCheckpointStore};
use synth_dispatch::RayonDispatcher;
use synth_gateset::{GateSet, QubitGateSet};
use synth_ir::{assemble, gate, matrix, AssembledRecord, GateNode, Matrix};
use synth_search::{BestPair, Beams, CheckpointBlob, FrontierEntry, SynthesisOptions, CHECKPOINT_VERSION};
use synth_solver::{CoordinateDescentSolver, Solver};

fn count_gate_named(record: &AssembledRecord, name: &str) -> usize {
    match record {
        AssembledRecord::Gate { name: n, .. } => usize::from(*n == name),
        AssembledRecord::Sequential(children) | AssembledRecord::Parallel(children) => {
            children.iter().map(|c| count_gate_named(c, name)).sum()
        }
    }
}

fn swap_matrix() -> Matrix {
    use num_complex::Complex64;
    let c = |re: f64| Complex64::new(re, 0.0);
    Matrix::from_shape_vec(
        (4, 4),
        vec![
            c(1.0), c(0.0), c(0.0), c(0.0),
            c(0.0), c(0.0), c(1.0), c(0.0),
            c(0.0), c(1.0), c(0.0), c(0.0),
            c(0.0), c(0.0), c(0.0), c(1.0),
        ],
    )
    .expect("4x4 shape")
}

/// A fixed, reproducible 4-qubit unitary entangling every qubit pair,
/// deep enough that the default gate set cannot match it quickly — used to
/// force the search to keep running until the timeout fires rather than
/// converge on the first cycle.
fn scrambled_four_qubit_target() -> Matrix {
    let n = 4;
    let rotations: Vec<Matrix> = [0.11_f64, 0.37, 0.59, 0.83]
        .iter()
        .map(|&a| gate::zxzxz(&[a, a * 0.5, a * 1.5]))
        .collect();
    let dressing = matrix::kron_all(&rotations);
    let c01 = gate::nonadjacent_cnot(n, 0, 1);
    let c12 = gate::nonadjacent_cnot(n, 1, 2);
    let c23 = gate::nonadjacent_cnot(n, 2, 3);
    let c30 = gate::nonadjacent_cnot(n, 3, 0);
    matrix::matmul_all(&[c01, c12, c23, c30, dressing])
}

#[test]
fn identity_synthesis_converges_at_depth_zero() {
    let target = Matrix::eye(4);
    let mut options = SynthesisOptions::for_target(target);
    options.depth = Some(0);
    options.threshold = 1e-6;

    let output = synth_search::synthesize(&options).unwrap();

    assert_eq!(output.best_depth, 0.0);
    assert!(output.best_distance < 1e-4, "distance was {}", output.best_distance);
}

#[test]
fn cnot_synthesis_finds_a_single_cnot() {
    let target = gate::cnot();
    let mut options = SynthesisOptions::for_target(target);
    options.threshold = 1e-3;
    options.depth = None;

    let output = synth_search::synthesize(&options).unwrap();

    assert!(output.best_distance < 1e-3, "distance was {}", output.best_distance);
    let record = assemble(&output.structure, &output.vector, 0).unwrap();
    assert_eq!(count_gate_named(&record, "CNOT"), 1);
}

#[test]
fn swap_synthesis_within_three_layers() {
    let mut options = SynthesisOptions::for_target(swap_matrix());
    options.depth = Some(3);
    options.threshold = 1e-2;
    options.beams = Beams::Fixed(2);

    let output = synth_search::synthesize(&options).unwrap();

    assert!(output.best_depth <= 3.0, "depth was {}", output.best_depth);
    assert!(output.best_distance < 1e-2, "distance was {}", output.best_distance);
}

#[test]
fn timeout_is_respected_on_a_hard_target() {
    let mut options = SynthesisOptions::for_target(scrambled_four_qubit_target());
    options.threshold = 1e-9;
    options.depth = None;
    options.timeout = Some(Duration::from_secs(2));
    options.dispatcher = Arc::new(RayonDispatcher::new(2));
    options.num_tasks = 2;

    let started = std::time::Instant::now();
    let output = synth_search::synthesize(&options).unwrap();
    let elapsed = started.elapsed();

    assert!(elapsed < Duration::from_secs(10), "search ran for {elapsed:?} past its 2s budget");
    assert_eq!(output.vector.len(), output.structure.arity());
    assert!(output.best_distance.is_finite());
}

#[test]
fn resume_from_checkpoint_preserves_already_converged_result() {
    let dir = tempfile::tempdir().unwrap();
    let statefile = dir.path().join("cnot.json");

    let target = gate::cnot();
    let gateset = QubitGateSet;
    let solver = CoordinateDescentSolver::default();

    // Reconstruct, by hand, the frontier/best state a real run would have
    // checkpointed after its first expansion cycle: the root (both qubits
    // dressed with an as-yet-unsolved single-qubit rotation) already
    // expanded into the two CNOT orientations `QubitGateSet::search_layers`
    // offers at width 2.
    let root = Arc::new(GateNode::product(vec![gateset.initial_layer(2)]).unwrap());
    let root_solved = solver.solve_for_unitary(&root, &target, None).unwrap();

    let layers = gateset.search_layers(2);
    assert_eq!(layers.len(), 2);

    let good_child = Arc::new(root.appending(Arc::clone(&layers[0].gate)).unwrap());
    let mut good_seed = root_solved.theta.clone();
    good_seed.resize(good_child.arity(), 0.0);
    let good_solved = solver
        .solve_for_unitary(&good_child, &target, Some(&good_seed))
        .unwrap();
    assert!(good_solved.residual < 1e-3, "residual was {}", good_solved.residual);

    let other_child = Arc::new(root.appending(Arc::clone(&layers[1].gate)).unwrap());
    let mut other_seed = root_solved.theta.clone();
    other_seed.resize(other_child.arity(), 0.0);
    let other_solved = solver
        .solve_for_unitary(&other_child, &target, Some(&other_seed))
        .unwrap();

    let blob = CheckpointBlob {
        version: CHECKPOINT_VERSION,
        frontier: vec![
            FrontierEntry {
                priority: good_solved.residual + 1.0,
                depth: 1.0,
                distance: good_solved.residual,
                tiebreaker: 0,
                theta_seed: good_solved.theta.clone(),
                circuit: Arc::clone(&good_child),
            },
            FrontierEntry {
                priority: other_solved.residual + 1.0,
                depth: 1.0,
                distance: other_solved.residual,
                tiebreaker: 1,
                theta_seed: other_solved.theta.clone(),
                circuit: Arc::clone(&other_child),
            },
        ],
        tiebreaker_counter: 2,
        best_depth: 1.0,
        best_distance: good_solved.residual,
        best_pair: BestPair {
            circuit: Arc::clone(&good_child),
            theta: good_solved.theta.clone(),
        },
        elapsed_seconds: 0.2,
    };

    let store = JsonCheckpointStore::new(statefile.clone());
    store.save(&blob).unwrap();

    let mut options = SynthesisOptions::for_target(target);
    options.threshold = 1e-3;
    options.statefile = Some(statefile);

    let output = synth_search::synthesize(&options).unwrap();

    // Resuming from an already-below-threshold checkpoint must return that
    // result intact rather than discarding it and starting over.
    assert!(output.best_distance <= good_solved.residual + 1e-12);
    let record = assemble(&output.structure, &output.vector, 0).unwrap();
    assert_eq!(count_gate_named(&record, "CNOT"), 1);
}

#[test]
fn synthesis_is_deterministic_for_a_fixed_target() {
    let mut first = SynthesisOptions::for_target(gate::cnot());
    first.threshold = 1e-3;
    first.dispatcher = Arc::new(RayonDispatcher::new(4));
    first.num_tasks = 4;

    let mut second = SynthesisOptions::for_target(gate::cnot());
    second.threshold = 1e-3;
    second.dispatcher = Arc::new(RayonDispatcher::new(4));
    second.num_tasks = 4;

    let out1 = synth_search::synthesize(&first).unwrap();
    let out2 = synth_search::synthesize(&second).unwrap();

    assert_eq!(out1.best_distance, out2.best_distance);
    assert_eq!(out1.vector, out2.vector);
    assert_eq!(format!("{:?}", out1.structure), format!("{:?}", out2.structure));
}
