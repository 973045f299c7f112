//! Top-level error type for the search driver, wrapping every sub-crate's
//! error plus the fatal conditions named for the entry point itself.

use thiserror::Error;

use synth_checkpoint::CheckpointError;
use synth_dispatch::DispatchError;
use synth_solver::SolverError;

/// Errors the synthesis entry point can return. Only the fatal variants
/// ever propagate out of [`crate::synthesize`] — everything else is caught
/// in the loop and turned into a log message plus a recovery action.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SynthError {
    /// The target's dimension is not `d^n` for any integer `n` at the
    /// gate set's qudit size `d`.
    #[error("target has dimension {dimension}, which is not {d}^n for any integer n")]
    IncompatibleTarget {
        /// The target matrix's (square) dimension.
        dimension: usize,
        /// The gate set's qudit size.
        d: usize,
    },

    /// A required option (currently only `target`) was left unset.
    #[error("missing required option: {0}")]
    MissingRequiredOption(&'static str),

    /// Propagated from [`synth_solver::Solver`]; only reaches here for the
    /// root-circuit solve, which has no surrounding loop iteration to
    /// recover within.
    #[error(transparent)]
    Solver(#[from] SolverError),

    /// Propagated from [`synth_dispatch::Dispatcher`]; likewise only for
    /// failures the loop cannot route around (e.g. pool construction).
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Propagated from [`synth_checkpoint::CheckpointStore`] only when the
    /// caller asked to resume and resumption itself is required to
    /// succeed; ordinary in-loop checkpoint errors are logged and ignored
    /// per the error policy.
    #[error(transparent)]
    Checkpoint(#[from] CheckpointError),
}

/// Result type for the synthesis entry point.
pub type SynthResult<T> = Result<T, SynthError>;
