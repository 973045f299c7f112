//! Error types for the work dispatcher crate.

use thiserror::Error;

/// Errors the dispatcher can report back to the search driver.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DispatchError {
    /// A worker thread panicked while solving a job. The job's index in the
    /// submitted batch is recorded so the driver can identify which
    /// candidate circuit triggered it.
    #[error("worker crashed while solving job {job_index}")]
    WorkerCrash {
        /// Index of the job that crashed, within the batch passed to
        /// `solve_all`.
        job_index: usize,
    },

    /// The batch was cancelled before every job finished; the dispatcher
    /// returns whatever results it had already collected rather than this
    /// error, so callers normally observe a short `Vec`, not this variant —
    /// it is reserved for dispatchers that cannot produce partial results.
    #[error("job batch was cancelled")]
    Cancelled,
}

/// Result type for dispatcher operations.
pub type DispatchResult<T> = Result<T, DispatchError>;
