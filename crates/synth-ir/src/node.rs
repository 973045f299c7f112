//! The circuit tree: [`GateNode`], a closed enumeration of gate primitives
//! and the compositional wrappers (`Product`, `Kronecker`, `Controlled`,
//! `Invert`, `Remap`) that combine them.
//!
//! Per §9 of the spec the tree is a pure value — every node owns its
//! children through `Arc` so that `appending` can build a new parent without
//! deep-copying the shared prefix, and a circuit can be handed to many
//! frontier entries at once without back-references.

use std::sync::Arc;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::matrix::Matrix;

/// A node in the circuit tree: a closed set of gate primitives plus the
/// compositional wrappers that combine them. Serializable so a frontier
/// entry can round-trip through a checkpoint file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GateNode {
    /// The n×n identity. 0 params, 1 qudit wide.
    Identity {
        /// Matrix dimension (qudit size `d`, not necessarily 2).
        dim: usize,
    },
    /// ZXZXZ-parameterized single-qubit gate. 3 params, 1 qudit.
    SingleQubit,
    /// Arbitrary SU(3) rotation from 8 Euler-like angles. 8 params, 1 qudit.
    SingleQutrit,
    /// Qiskit-style U3(θ,φ,λ). 3 params, 1 qudit.
    U3,
    /// A fixed matrix. 0 params.
    ConstantGate {
        /// The fixed unitary.
        matrix: Arc<Matrix>,
        /// Optional human-readable label, used by `assemble`.
        label: Option<String>,
        /// Number of qudits this gate spans.
        width: usize,
    },
    /// Fixed 2-qudit CNOT.
    Cnot,
    /// Fixed 2-qudit square-root-of-CNOT.
    CnotRoot,
    /// Fixed qutrit CSUM gate.
    Csum,
    /// Fixed qutrit CPI gate.
    Cpi,
    /// Qutrit CPI-phase gate: CPI times a diagonal of phases fixed at
    /// construction (recorded here so runs are reproducible).
    CpiPhase {
        /// The five random phases drawn at construction time.
        phases: [Complex64; 5],
    },
    /// CNOT between non-adjacent qubits in an `n`-qubit register.
    NonadjacentCnot {
        /// Register size.
        n: usize,
        /// Control qubit index.
        control: usize,
        /// Target qubit index.
        target: usize,
    },
    /// Tensor product of children, side by side.
    Kronecker(Vec<Arc<GateNode>>),
    /// Sequential composition (matrix product), left to right.
    Product(Vec<Arc<GateNode>>),
    /// Block-diagonal embedding of `inner` as a controlled gate.
    Controlled {
        /// The inner (controlled-upon) gate.
        inner: Arc<GateNode>,
        /// Whether the active block is the first half instead of the second.
        flipped: bool,
    },
    /// Conjugate-transposed wrapper.
    Invert(Arc<GateNode>),
    /// Re-targets `inner` (originally acting on qudits `[0, inner.width())`)
    /// onto `source..target` within a `dits`-qudit register of qudit size `d`.
    Remap {
        /// The wrapped gate.
        inner: Arc<GateNode>,
        /// Total qudits in the surrounding register.
        dits: usize,
        /// Source qudit index `inner` originally occupied.
        source: usize,
        /// Target qudit index `inner` is remapped onto.
        target: usize,
        /// Qudit dimension of the surrounding register.
        d: usize,
    },
}

impl GateNode {
    /// Number of real parameters this node consumes.
    pub fn arity(&self) -> usize {
        match self {
            GateNode::Identity { .. }
            | GateNode::ConstantGate { .. }
            | GateNode::Cnot
            | GateNode::CnotRoot
            | GateNode::Csum
            | GateNode::Cpi
            | GateNode::CpiPhase { .. }
            | GateNode::NonadjacentCnot { .. } => 0,
            GateNode::SingleQubit | GateNode::U3 => 3,
            GateNode::SingleQutrit => 8,
            GateNode::Kronecker(children) | GateNode::Product(children) => {
                children.iter().map(|c| c.arity()).sum()
            }
            GateNode::Controlled { inner, .. }
            | GateNode::Invert(inner)
            | GateNode::Remap { inner, .. } => inner.arity(),
        }
    }

    /// Number of qudits this node spans.
    pub fn width(&self) -> usize {
        match self {
            GateNode::Identity { .. }
            | GateNode::SingleQubit
            | GateNode::SingleQutrit
            | GateNode::U3 => 1,
            GateNode::ConstantGate { width, .. } => *width,
            GateNode::Cnot | GateNode::CnotRoot | GateNode::Csum | GateNode::Cpi => 2,
            GateNode::CpiPhase { .. } => 2,
            GateNode::NonadjacentCnot { n, .. } => *n,
            GateNode::Kronecker(children) => children.iter().map(|c| c.width()).sum(),
            GateNode::Product(children) => children.first().map_or(0, |c| c.width()),
            GateNode::Controlled { inner, .. } => inner.width() + 1,
            GateNode::Invert(inner) => inner.width(),
            GateNode::Remap { dits, .. } => *dits,
        }
    }

    /// Matrix dimension (`d^width` if every leaf shares a qudit size `d`).
    pub fn dim(&self) -> usize {
        match self {
            GateNode::Identity { dim } => *dim,
            GateNode::SingleQubit | GateNode::U3 => 2,
            GateNode::SingleQutrit => 3,
            GateNode::ConstantGate { matrix, .. } => matrix.dim().0,
            GateNode::Cnot | GateNode::CnotRoot => 4,
            GateNode::Csum | GateNode::Cpi | GateNode::CpiPhase { .. } => 9,
            GateNode::NonadjacentCnot { n, .. } => 1 << n,
            GateNode::Kronecker(children) => children.iter().map(|c| c.dim()).product(),
            GateNode::Product(children) => children.first().map_or(1, |c| c.dim()),
            GateNode::Controlled { inner, .. } => 2 * inner.dim(),
            GateNode::Invert(inner) => inner.dim(),
            GateNode::Remap { inner, d, dits, .. } => {
                let _ = inner;
                d.pow(*dits as u32)
            }
        }
    }

    /// Name used in `assemble`'s gate records.
    pub fn name(&self) -> &'static str {
        match self {
            GateNode::Identity { .. } => "I",
            GateNode::SingleQubit => "U",
            GateNode::SingleQutrit => "qutrit",
            GateNode::U3 => "qiskit-u3",
            GateNode::ConstantGate { .. } => "const",
            GateNode::Cnot => "CNOT",
            GateNode::CnotRoot => "sqrt(CNOT)",
            GateNode::Csum => "CSUM",
            GateNode::Cpi => "CPI",
            GateNode::CpiPhase { .. } => "CPI-",
            GateNode::NonadjacentCnot { .. } => "CNOT",
            GateNode::Kronecker(_) => "kron",
            GateNode::Product(_) => "product",
            GateNode::Controlled { .. } => "ctrl",
            GateNode::Invert(_) => "inv",
            GateNode::Remap { .. } => "remap",
        }
    }

    /// Build a fresh `Product` with `child` appended. Does not mutate
    /// `self`; shares the existing children via `Arc::clone`.
    pub fn appending(self: &Arc<Self>, child: Arc<GateNode>) -> IrResult<GateNode> {
        match self.as_ref() {
            GateNode::Product(children) => {
                if let Some(first) = children.first() {
                    if first.width() != child.width() {
                        return Err(IrError::WidthMismatch {
                            first: first.width(),
                            other: child.width(),
                        });
                    }
                }
                let mut next = children.clone();
                next.push(child);
                Ok(GateNode::Product(next))
            }
            _ => {
                if self.width() != child.width() {
                    return Err(IrError::WidthMismatch {
                        first: self.width(),
                        other: child.width(),
                    });
                }
                Ok(GateNode::Product(vec![Arc::clone(self), child]))
            }
        }
    }

    /// Build a fresh `Kronecker` with `child` appended (side by side).
    pub fn appending_parallel(self: &Arc<Self>, child: Arc<GateNode>) -> GateNode {
        match self.as_ref() {
            GateNode::Kronecker(children) => {
                let mut next = children.clone();
                next.push(child);
                GateNode::Kronecker(next)
            }
            _ => GateNode::Kronecker(vec![Arc::clone(self), child]),
        }
    }

    /// Construct a `Product` node, requiring a non-empty, width-consistent
    /// child list per §3's invariants.
    pub fn product(children: Vec<Arc<GateNode>>) -> IrResult<GateNode> {
        if children.is_empty() {
            return Err(IrError::EmptyComposition("Product"));
        }
        let first_width = children[0].width();
        for child in &children[1..] {
            if child.width() != first_width {
                return Err(IrError::WidthMismatch {
                    first: first_width,
                    other: child.width(),
                });
            }
        }
        Ok(GateNode::Product(children))
    }

    /// Construct a `Kronecker` node, requiring a non-empty child list.
    pub fn kronecker(children: Vec<Arc<GateNode>>) -> IrResult<GateNode> {
        if children.is_empty() {
            return Err(IrError::EmptyComposition("Kronecker"));
        }
        Ok(GateNode::Kronecker(children))
    }
}

/// Draw the five phases `CpiPhase` multiplies its fixed permutation by,
/// from the given RNG — kept separate from `GateNode` construction so
/// callers can pass a seeded RNG for reproducible search runs.
pub fn random_cpi_phases(rng: &mut impl rand::Rng) -> [Complex64; 5] {
    use std::f64::consts::PI;
    std::array::from_fn(|_| Complex64::from_polar(1.0, 2.0 * rng.gen::<f64>() * PI))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arity_and_width_of_leaves() {
        assert_eq!(GateNode::SingleQubit.arity(), 3);
        assert_eq!(GateNode::SingleQubit.width(), 1);
        assert_eq!(GateNode::SingleQutrit.arity(), 8);
        assert_eq!(GateNode::Cnot.arity(), 0);
        assert_eq!(GateNode::Cnot.width(), 2);
        assert_eq!(GateNode::Cnot.dim(), 4);
    }

    #[test]
    fn product_arity_is_sum_of_children() {
        let a = Arc::new(GateNode::SingleQubit);
        let b = Arc::new(GateNode::SingleQubit);
        let p = GateNode::product(vec![a, b]).unwrap();
        assert_eq!(p.arity(), 6);
        assert_eq!(p.width(), 1);
    }

    #[test]
    fn kronecker_width_is_sum_of_children() {
        let a = Arc::new(GateNode::SingleQubit);
        let b = Arc::new(GateNode::Cnot);
        let k = GateNode::kronecker(vec![a, b]).unwrap();
        assert_eq!(k.width(), 3);
        assert_eq!(k.dim(), 8);
    }

    #[test]
    fn product_rejects_width_mismatch() {
        let a = Arc::new(GateNode::SingleQubit);
        let b = Arc::new(GateNode::Cnot);
        assert!(GateNode::product(vec![a, b]).is_err());
    }

    #[test]
    fn appending_shares_prefix_via_arc() {
        let root = Arc::new(GateNode::product(vec![Arc::new(GateNode::SingleQubit)]).unwrap());
        let child = Arc::new(GateNode::SingleQubit);
        let grown = root.appending(child).unwrap();
        assert_eq!(grown.arity(), 6);
        // original root is untouched
        assert_eq!(root.arity(), 3);
    }

    #[test]
    fn controlled_doubles_dim_and_adds_width() {
        let inner = Arc::new(GateNode::SingleQubit);
        let ctrl = GateNode::Controlled {
            inner: Arc::clone(&inner),
            flipped: false,
        };
        assert_eq!(ctrl.width(), 2);
        assert_eq!(ctrl.dim(), 4);
        assert_eq!(ctrl.arity(), 3);
    }
}
