//! Circuit algebra for the quantum-circuit synthesizer.
//!
//! This crate owns the gate/circuit data model end to end: primitive gate
//! matrices ([`gate`]), the closed [`node::GateNode`] tree that composes
//! them via `Product`/`Kronecker`/`Controlled`/`Invert`/`Remap`, a recursive
//! evaluator ([`eval`]) that turns a tree plus a flat parameter vector into
//! a dense unitary, and an assembler ([`assemble`]) that turns the same pair
//! into a flat, qudit-indexed record suitable for external consumption.
//!
//! Nothing in here knows about search, solving, or dispatch — those are
//! downstream crates built on top of [`node::GateNode`] as a plain value.

pub mod assemble;
pub mod error;
pub mod eval;
pub mod gate;
pub mod matrix;
pub mod node;

pub use assemble::{assemble, AssembledRecord};
pub use error::{IrError, IrResult};
pub use eval::matrix as circuit_matrix;
pub use matrix::Matrix;
pub use node::{random_cpi_phases, GateNode};

/// Shared-ownership handle to a circuit tree, used wherever a circuit is
/// passed between frontier entries, solver jobs, or checkpoints without
/// needing to be copied.
pub type CircuitTree = std::sync::Arc<GateNode>;
