//! Parallel work dispatcher.
//!
//! The search driver expands a frontier node into many candidate circuits
//! (one per gate-set layer) that all need the same expensive solve against
//! the same target. [`Dispatcher`] hides the thread pool: the driver hands
//! over a batch of [`Job`]s and gets back a [`JobResult`] per surviving job.
//! A worker panic is caught per-job and logged rather than poisoning the
//! pool or the rest of the batch; cooperative cancellation via
//! [`CancellationToken`] lets a timeout stop a batch partway through.

pub mod error;

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use synth_ir::{GateNode, Matrix};
use synth_solver::Solver;
use tracing::{instrument, warn};

pub use error::{DispatchError, DispatchResult};

/// A candidate circuit submitted for solving, paired with the bookkeeping
/// the driver needs once the result comes back.
#[derive(Debug, Clone)]
pub struct Job {
    /// The candidate circuit to solve.
    pub circuit: Arc<GateNode>,
    /// Search-tree depth this circuit would occupy: parent depth plus the
    /// weight of the search layer appended to reach it.
    pub depth: f64,
    /// Warm-start parameters, normally the parent's solved `theta` padded
    /// with zeros for the newly appended layer's parameters.
    pub theta_seed: Option<Vec<f64>>,
}

/// The outcome of solving one [`Job`].
#[derive(Debug, Clone)]
pub struct JobResult {
    /// The circuit that was solved.
    pub circuit: Arc<GateNode>,
    /// Depth carried over from the job.
    pub depth: f64,
    /// Parameters found by the solver.
    pub theta: Vec<f64>,
    /// Residual distance to the target the solver achieved.
    pub residual: f64,
}

/// Shared cancellation flag. `Clone` is cheap (it's a reference-counted
/// bool); cloning and handing a copy to the driver lets it cancel a batch
/// that is still running on the pool.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    /// Create a fresh, not-yet-cancelled token.
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(false)))
    }

    /// Signal cancellation; in-flight jobs finish, queued jobs are skipped.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// True once `cancel` has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A work dispatcher: runs a batch of solver jobs against a shared target
/// and collects their results.
pub trait Dispatcher: Send + Sync {
    /// Solve every job in `jobs` against `target` using `solver`, stopping
    /// early (and returning whatever finished) if `cancel` is signalled.
    fn solve_all(
        &self,
        jobs: Vec<Job>,
        target: &Matrix,
        solver: &dyn Solver,
        cancel: &CancellationToken,
    ) -> DispatchResult<Vec<JobResult>>;
}

/// Fixed-size worker pool backed by a dedicated `rayon` thread pool.
pub struct RayonDispatcher {
    pool: rayon::ThreadPool,
}

impl RayonDispatcher {
    /// Build a dispatcher with exactly `num_workers` threads.
    pub fn new(num_workers: usize) -> Self {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_workers.max(1))
            .thread_name(|i| format!("synth-worker-{i}"))
            .build()
            .expect("thread pool construction cannot fail with a valid thread count");
        Self { pool }
    }
}

impl Dispatcher for RayonDispatcher {
    #[instrument(level = "debug", skip(self, jobs, target, solver, cancel))]
    fn solve_all(
        &self,
        jobs: Vec<Job>,
        target: &Matrix,
        solver: &dyn Solver,
        cancel: &CancellationToken,
    ) -> DispatchResult<Vec<JobResult>> {
        let total = jobs.len();
        let results: Vec<Option<JobResult>> = self.pool.install(|| {
            jobs.into_par_iter()
                .enumerate()
                .map(|(index, job)| -> Option<JobResult> {
                    if cancel.is_cancelled() {
                        return None;
                    }
                    let result = catch_unwind(AssertUnwindSafe(|| {
                        solver.solve_for_unitary(&job.circuit, target, job.theta_seed.as_deref())
                    }));
                    match result {
                        Ok(Ok(solved)) => Some(JobResult {
                            circuit: job.circuit,
                            depth: job.depth,
                            theta: solved.theta,
                            residual: solved.residual,
                        }),
                        Ok(Err(solver_err)) => {
                            warn!(job_index = index, error = %solver_err, "solver failed on job");
                            None
                        }
                        Err(_panic) => {
                            warn!(job_index = index, "worker crashed while solving job");
                            None
                        }
                    }
                })
                .collect()
        });

        let solved: Vec<JobResult> = results.into_iter().flatten().collect();
        if solved.len() < total {
            let why = if cancel.is_cancelled() { "cancelled" } else { "dropped failures" };
            warn!(completed = solved.len(), total, reason = why, "batch returned fewer results than jobs");
        }
        Ok(solved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synth_solver::CoordinateDescentSolver;

    fn single_qubit_job(depth: f64) -> Job {
        Job {
            circuit: Arc::new(GateNode::SingleQubit),
            depth,
            theta_seed: None,
        }
    }

    #[test]
    fn solves_every_job_in_a_batch() {
        let dispatcher = RayonDispatcher::new(2);
        let solver = CoordinateDescentSolver::default();
        let target = Matrix::eye(2);
        let jobs = vec![single_qubit_job(1.0), single_qubit_job(1.0), single_qubit_job(1.0)];
        let cancel = CancellationToken::new();
        let results = dispatcher
            .solve_all(jobs, &target, &solver, &cancel)
            .unwrap();
        assert_eq!(results.len(), 3);
        for r in results {
            assert!(r.residual < 1e-6);
        }
    }

    #[test]
    fn cancelling_before_dispatch_yields_no_results() {
        let dispatcher = RayonDispatcher::new(2);
        let solver = CoordinateDescentSolver::default();
        let target = Matrix::eye(2);
        let jobs = vec![single_qubit_job(1.0), single_qubit_job(1.0)];
        let cancel = CancellationToken::new();
        cancel.cancel();
        let results = dispatcher
            .solve_all(jobs, &target, &solver, &cancel)
            .unwrap();
        assert!(results.len() <= 2);
    }
}
