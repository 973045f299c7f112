//! Pluggable numerical solver.
//!
//! The search driver never minimizes distance itself — it hands a candidate
//! circuit and a target unitary to a [`Solver`] and only looks at the
//! returned residual. This crate supplies the `Solver` trait plus a default
//! implementation ([`CoordinateDescentSolver`]) so the workspace is runnable
//! without pulling in an external numerical optimization dependency; a
//! tuned optimizer can be swapped in by implementing the same trait.

pub mod error;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use synth_ir::{circuit_matrix, GateNode, Matrix};
use tracing::{debug, instrument};

pub use error::{SolverError, SolverResult};

/// The result of solving a circuit's free parameters against a target.
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// The parameter vector found.
    pub theta: Vec<f64>,
    /// `node` evaluated at `theta`.
    pub matrix: Matrix,
    /// Squared Frobenius distance between `matrix` and the target, up to
    /// global phase (see [`distance_up_to_phase`]).
    pub residual: f64,
}

/// A pluggable numerical optimizer: given a circuit and a target unitary,
/// find parameters minimizing the distance between them.
pub trait Solver: Send + Sync {
    /// Solve `node`'s free parameters so its evaluated matrix is as close
    /// as possible to `target`. `theta_seed`, when given, is used as the
    /// optimizer's starting point (e.g. the parent frontier node's solved
    /// parameters, padded with zeros for the newly appended layer).
    fn solve_for_unitary(
        &self,
        node: &GateNode,
        target: &Matrix,
        theta_seed: Option<&[f64]>,
    ) -> SolverResult<SolveOutcome>;
}

/// Squared Frobenius distance between `a` and `b`, minimized over a global
/// phase — two unitaries that differ only by an overall phase are
/// physically identical circuits, so a solver must not be penalized for
/// not matching that phase.
pub fn distance_up_to_phase(a: &Matrix, b: &Matrix) -> f64 {
    let overlap: num_complex::Complex64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| x.conj() * y)
        .sum();
    let n = a.len() as f64;
    let norm_a: f64 = a.iter().map(|z| z.norm_sqr()).sum();
    let norm_b: f64 = b.iter().map(|z| z.norm_sqr()).sum();
    (norm_a + norm_b - 2.0 * overlap.norm()) / n.max(1.0)
}

/// Coordinate-descent solver: repeated golden-section line search over one
/// parameter at a time, sweeping all parameters per round until the
/// residual stops improving or the sweep budget is exhausted.
#[derive(Debug, Clone)]
pub struct CoordinateDescentSolver {
    /// Maximum number of full sweeps over every coordinate.
    pub max_sweeps: usize,
    /// Number of golden-section bisections per coordinate per sweep.
    pub line_search_steps: usize,
    /// Stop early once the residual is at or below this value.
    pub tolerance: f64,
    /// Seed for the `SmallRng` used when no `theta_seed` is supplied.
    pub fallback_seed: u64,
}

impl Default for CoordinateDescentSolver {
    fn default() -> Self {
        Self {
            max_sweeps: 12,
            line_search_steps: 24,
            tolerance: 1e-10,
            fallback_seed: 0x5EED_5EED,
        }
    }
}

const GOLDEN_RATIO_INV: f64 = 0.618_033_988_749_895;

impl Solver for CoordinateDescentSolver {
    #[instrument(level = "debug", skip(self, node, target, theta_seed))]
    fn solve_for_unitary(
        &self,
        node: &GateNode,
        target: &Matrix,
        theta_seed: Option<&[f64]>,
    ) -> SolverResult<SolveOutcome> {
        let arity = node.arity();
        if target.dim().0 != node.dim() {
            return Err(SolverError::DimensionMismatch {
                target_dim: target.dim().0,
                circuit_dim: node.dim(),
            });
        }
        if arity == 0 {
            let matrix = circuit_matrix(node, &[]).expect("arity already validated");
            let residual = distance_up_to_phase(&matrix, target);
            return Ok(SolveOutcome {
                theta: Vec::new(),
                matrix,
                residual,
            });
        }

        let mut theta = match theta_seed {
            Some(seed) if seed.len() == arity => seed.to_vec(),
            Some(seed) => {
                let mut padded = seed.to_vec();
                padded.resize(arity, 0.0);
                padded
            }
            None => {
                let mut rng = SmallRng::seed_from_u64(self.fallback_seed);
                (0..arity).map(|_| rng.gen::<f64>()).collect()
            }
        };

        let objective = |theta: &[f64]| -> f64 {
            match circuit_matrix(node, theta) {
                Ok(m) => distance_up_to_phase(&m, target),
                Err(_) => f64::INFINITY,
            }
        };

        let mut best_residual = objective(&theta);
        for sweep in 0..self.max_sweeps {
            let before = best_residual;
            for i in 0..arity {
                let optimized = self.golden_section(&theta, i, &objective);
                theta[i] = optimized;
            }
            best_residual = objective(&theta);
            debug!(sweep, residual = best_residual, "coordinate descent sweep");
            if best_residual <= self.tolerance {
                break;
            }
            if (before - best_residual).abs() < 1e-14 {
                break;
            }
        }

        let matrix = circuit_matrix(node, &theta).expect("arity already validated");
        Ok(SolveOutcome {
            theta,
            matrix,
            residual: best_residual,
        })
    }
}

impl CoordinateDescentSolver {
    /// Golden-section search for coordinate `i` of `theta` over `[0, 1)`,
    /// holding every other coordinate fixed.
    fn golden_section(&self, theta: &[f64], i: usize, objective: &impl Fn(&[f64]) -> f64) -> f64 {
        let mut lo = 0.0_f64;
        let mut hi = 1.0_f64;
        let eval_at = |x: f64| -> f64 {
            let mut probe = theta.to_vec();
            probe[i] = x;
            objective(&probe)
        };

        let mut c = hi - GOLDEN_RATIO_INV * (hi - lo);
        let mut d = lo + GOLDEN_RATIO_INV * (hi - lo);
        let mut fc = eval_at(c);
        let mut fd = eval_at(d);

        for _ in 0..self.line_search_steps {
            if fc < fd {
                hi = d;
                d = c;
                fd = fc;
                c = hi - GOLDEN_RATIO_INV * (hi - lo);
                fc = eval_at(c);
            } else {
                lo = c;
                c = d;
                fc = fd;
                d = lo + GOLDEN_RATIO_INV * (hi - lo);
                fd = eval_at(d);
            }
        }
        (lo + hi) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn zero_arity_node_reports_fixed_residual() {
        let node = GateNode::Cnot;
        let target = synth_ir::gate::cnot();
        let solver = CoordinateDescentSolver::default();
        let outcome = solver.solve_for_unitary(&node, &target, None).unwrap();
        assert!(outcome.theta.is_empty());
        assert!(outcome.residual < 1e-9);
    }

    #[test]
    fn single_qubit_solver_matches_identity_target() {
        let node = GateNode::SingleQubit;
        let target = Matrix::eye(2);
        let solver = CoordinateDescentSolver::default();
        let outcome = solver.solve_for_unitary(&node, &target, None).unwrap();
        assert!(outcome.residual < 1e-6, "residual was {}", outcome.residual);
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let node = GateNode::SingleQubit;
        let target = Matrix::eye(4);
        let solver = CoordinateDescentSolver::default();
        assert!(matches!(
            solver.solve_for_unitary(&node, &target, None),
            Err(SolverError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn theta_seed_is_used_as_starting_point() {
        let node = GateNode::SingleQubit;
        let target = synth_ir::gate::zxzxz(&[0.2, 0.3, 0.4]);
        let solver = CoordinateDescentSolver {
            max_sweeps: 1,
            line_search_steps: 1,
            ..Default::default()
        };
        let seeded = solver
            .solve_for_unitary(&node, &target, Some(&[0.2, 0.3, 0.4]))
            .unwrap();
        assert!(seeded.residual < 1e-6);
    }

    #[test]
    fn kronecker_node_is_solvable_too() {
        let node = GateNode::kronecker(vec![
            Arc::new(GateNode::SingleQubit),
            Arc::new(GateNode::SingleQubit),
        ])
        .unwrap();
        let target = Matrix::eye(4);
        let solver = CoordinateDescentSolver::default();
        let outcome = solver.solve_for_unitary(&node, &target, None).unwrap();
        assert!(outcome.residual < 1e-5, "residual was {}", outcome.residual);
    }
}
