//! Turns a [`GateNode`] plus a flat parameter vector into a dense matrix.
//!
//! Parameters are consumed depth-first, left to right, exactly mirroring
//! `arity()`'s accounting: a `Product`/`Kronecker` node hands each child the
//! next `child.arity()` values from its own slice.

use crate::error::{IrError, IrResult};
use crate::gate;
use crate::matrix::{self, Matrix};
use crate::node::GateNode;

/// Evaluate `node` at the given parameter vector, which must have exactly
/// `node.arity()` entries.
pub fn matrix(node: &GateNode, theta: &[f64]) -> IrResult<Matrix> {
    if theta.len() != node.arity() {
        return Err(IrError::ArityMismatch {
            expected: node.arity(),
            got: theta.len(),
        });
    }
    Ok(matrix_unchecked(node, theta))
}

/// Same as [`matrix`] but assumes the caller already validated `theta.len()`.
/// Used internally to avoid re-checking arity at every recursion step.
fn matrix_unchecked(node: &GateNode, theta: &[f64]) -> Matrix {
    match node {
        GateNode::Identity { dim } => matrix::identity(*dim),
        GateNode::SingleQubit => gate::zxzxz(theta),
        GateNode::SingleQutrit => gate::qutrit_arbitrary_rotation(theta),
        GateNode::U3 => gate::u3(theta),
        GateNode::ConstantGate { matrix, .. } => matrix.as_ref().clone(),
        GateNode::Cnot => gate::cnot(),
        GateNode::CnotRoot => gate::cnot_root(),
        GateNode::Csum => gate::csum(),
        GateNode::Cpi => gate::cpi(),
        GateNode::CpiPhase { phases } => gate::cpi_phase(phases),
        GateNode::NonadjacentCnot { n, control, target } => {
            gate::nonadjacent_cnot(*n, *control, *target)
        }
        GateNode::Kronecker(children) => {
            let mats = eval_children(children, theta);
            matrix::kron_all(&mats)
        }
        GateNode::Product(children) => {
            let mats = eval_children(children, theta);
            // §4.2: V = s1.matrix * s2.matrix * ... * sk.matrix, left to
            // right in declaration order — no reversal.
            matrix::matmul_all(&mats)
        }
        GateNode::Controlled { inner, flipped } => {
            let u = matrix_unchecked(inner, theta);
            gate::controlled_embed(&u, *flipped)
        }
        GateNode::Invert(inner) => {
            let u = matrix_unchecked(inner, theta);
            matrix::dagger(&u)
        }
        GateNode::Remap {
            inner,
            dits,
            source,
            target,
            d,
        } => {
            let u = matrix_unchecked(inner, theta);
            remap(&u, inner.width(), *dits, *source, *target, *d)
        }
    }
}

fn eval_children(children: &[std::sync::Arc<GateNode>], theta: &[f64]) -> Vec<Matrix> {
    let mut out = Vec::with_capacity(children.len());
    let mut offset = 0;
    for child in children {
        let arity = child.arity();
        out.push(matrix_unchecked(child, &theta[offset..offset + arity]));
        offset += arity;
    }
    out
}

/// Embed a `width`-qudit unitary `u` (acting on qudits `[0, width)`) into a
/// `dits`-qudit register of size `d`, sliding it so it instead acts on
/// qudits `[source, source + width)` relabeled to start at `target`.
///
/// `Remap` is only ever used by the search driver to retarget a gate that
/// was synthesized against a canonical qudit ordering onto the register
/// positions the gate set actually named; `source == target` is the common
/// case and degenerates to `I ⊗ u ⊗ I` padding.
fn remap(u: &Matrix, width: usize, dits: usize, source: usize, target: usize, d: usize) -> Matrix {
    debug_assert_eq!(source, target, "qudit relabeling without permutation is not yet supported");
    let before = matrix::identity(d.pow(target as u32));
    let after = matrix::identity(d.pow((dits - target - width) as u32));
    matrix::kron_all(&[before, u.clone(), after])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn identity_node_evaluates_to_identity() {
        let node = GateNode::Identity { dim: 4 };
        let m = matrix(&node, &[]).unwrap();
        assert_eq!(m.dim(), (4, 4));
    }

    #[test]
    fn arity_mismatch_is_rejected() {
        let node = GateNode::SingleQubit;
        assert!(matrix(&node, &[0.1, 0.2]).is_err());
    }

    #[test]
    fn product_applies_gates_left_to_right() {
        // H then H on one qubit, expressed via two ConstantGate leaves.
        let s = 1.0 / 2.0_f64.sqrt();
        let h = Matrix::from_shape_vec(
            (2, 2),
            vec![
                num_complex::Complex64::new(s, 0.0),
                num_complex::Complex64::new(s, 0.0),
                num_complex::Complex64::new(s, 0.0),
                num_complex::Complex64::new(-s, 0.0),
            ],
        )
        .unwrap();
        let h_node = Arc::new(GateNode::ConstantGate {
            matrix: Arc::new(h.clone()),
            label: Some("H".to_string()),
            width: 1,
        });
        let prod = GateNode::product(vec![Arc::clone(&h_node), Arc::clone(&h_node)]).unwrap();
        let m = matrix(&prod, &[]).unwrap();
        // H*H == I
        assert!(matrix::frobenius_distance_squared(&m, &matrix::identity(2)) < 1e-12);
    }

    #[test]
    fn kronecker_combines_independent_subsystems() {
        let a = Arc::new(GateNode::Identity { dim: 2 });
        let b = Arc::new(GateNode::Identity { dim: 3 });
        let k = GateNode::kronecker(vec![a, b]).unwrap();
        let m = matrix(&k, &[]).unwrap();
        assert_eq!(m.dim(), (6, 6));
    }

    #[test]
    fn controlled_and_invert_round_trip_on_identity() {
        let inner = Arc::new(GateNode::Identity { dim: 2 });
        let ctrl = GateNode::Controlled {
            inner: Arc::clone(&inner),
            flipped: false,
        };
        let m = matrix(&ctrl, &[]).unwrap();
        assert_eq!(m.dim(), (4, 4));

        let inv = GateNode::Invert(Arc::new(ctrl));
        let m2 = matrix(&inv, &[]).unwrap();
        assert!(matrix::frobenius_distance_squared(&m, &m2) < 1e-12);
    }
}
