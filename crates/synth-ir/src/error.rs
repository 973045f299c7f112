//! Error types for the circuit algebra crate.

use thiserror::Error;

/// Errors that can occur while evaluating or assembling a circuit tree.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// The parameter vector handed to `matrix`/`assemble` does not match
    /// the node's declared arity.
    #[error("parameter count mismatch: node expects {expected} params, got {got}")]
    ArityMismatch {
        /// Number of parameters the node actually consumes.
        expected: usize,
        /// Number of parameters supplied by the caller.
        got: usize,
    },

    /// A `Product` node was built with children of differing `width`.
    #[error("Product node requires all children to share width, got {first} and {other}")]
    WidthMismatch {
        /// Width of the first child.
        first: usize,
        /// Width of a later child that disagreed.
        other: usize,
    },

    /// A `ConstantGate` or custom matrix did not have the expected dimension.
    #[error("matrix has dimension {got}, expected {expected}")]
    DimensionMismatch {
        /// Expected (square) matrix dimension.
        expected: usize,
        /// Actual matrix dimension supplied.
        got: usize,
    },

    /// A compositional node (`Product`/`Kronecker`) was built with no children.
    #[error("{0} node must have at least one child")]
    EmptyComposition(&'static str),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
