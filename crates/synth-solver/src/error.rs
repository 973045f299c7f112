//! Error types for the solver crate.

use thiserror::Error;

/// Errors a [`crate::Solver`] implementation can report.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SolverError {
    /// The circuit has zero free parameters, so there is nothing to solve
    /// for — the caller should compare the fixed matrix directly instead.
    #[error("circuit has no free parameters to optimize")]
    NoFreeParameters,

    /// The optimizer failed to converge to an acceptable residual within
    /// its iteration budget.
    #[error("solver did not converge after {iterations} iterations (residual {residual:.3e})")]
    DidNotConverge {
        /// Iterations spent before giving up.
        iterations: usize,
        /// Final residual distance reached.
        residual: f64,
    },

    /// The target matrix's dimension did not match the circuit's.
    #[error("target has dimension {target_dim}, circuit has dimension {circuit_dim}")]
    DimensionMismatch {
        /// Target unitary dimension.
        target_dim: usize,
        /// Circuit's evaluated dimension.
        circuit_dim: usize,
    },
}

/// Result type for solver operations.
pub type SolverResult<T> = Result<T, SolverError>;
