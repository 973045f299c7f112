//! Property-based tests for the circuit algebra's universally-quantified
//! invariants: every primitive gate's matrix is unitary for any parameter
//! vector in its domain, and Product/Kronecker composition is associative.

use proptest::prelude::*;
use synth_ir::gate;
use synth_ir::matrix::{self, Matrix};

fn arb_angle() -> impl Strategy<Value = f64> {
    -2.0..2.0
}

proptest! {
    /// Every ZXZXZ single-qubit gate is unitary for any angle triple.
    #[test]
    fn zxzxz_is_always_unitary(a in arb_angle(), b in arb_angle(), c in arb_angle()) {
        let m = gate::zxzxz(&[a, b, c]);
        prop_assert!(matrix::is_unitary(&m, 1e-8));
    }

    /// Every Qiskit-U3 gate is unitary for any angle triple.
    #[test]
    fn u3_is_always_unitary(a in arb_angle(), b in arb_angle(), c in arb_angle()) {
        let m = gate::u3(&[a, b, c]);
        prop_assert!(matrix::is_unitary(&m, 1e-8));
    }

    /// Every qutrit rotation is unitary for any 8-angle vector.
    #[test]
    fn qutrit_rotation_is_always_unitary(
        angles in prop::collection::vec(arb_angle(), 8..=8)
    ) {
        let m = gate::qutrit_arbitrary_rotation(&angles);
        prop_assert!(matrix::is_unitary(&m, 1e-8));
    }

    /// Kronecker product is associative up to floating-point slack, for any
    /// three single-qubit unitaries.
    #[test]
    fn kronecker_is_associative(
        a in arb_angle(), b in arb_angle(), c in arb_angle(),
        d in arb_angle(), e in arb_angle(), f in arb_angle(),
        g in arb_angle(), h in arb_angle(), i in arb_angle(),
    ) {
        let x = gate::zxzxz(&[a, b, c]);
        let y = gate::zxzxz(&[d, e, f]);
        let z = gate::zxzxz(&[g, h, i]);

        let left: Matrix = matrix::kron(&matrix::kron(&x, &y), &z);
        let right: Matrix = matrix::kron(&x, &matrix::kron(&y, &z));
        prop_assert!(matrix::frobenius_distance_squared(&left, &right) < 1e-18);
    }

    /// Matrix product is associative up to floating-point slack, for any
    /// three single-qubit unitaries.
    #[test]
    fn matmul_is_associative(
        a in arb_angle(), b in arb_angle(), c in arb_angle(),
        d in arb_angle(), e in arb_angle(), f in arb_angle(),
        g in arb_angle(), h in arb_angle(), i in arb_angle(),
    ) {
        let x = gate::zxzxz(&[a, b, c]);
        let y = gate::zxzxz(&[d, e, f]);
        let z = gate::zxzxz(&[g, h, i]);

        let left: Matrix = matrix::matmul(&matrix::matmul(&x, &y), &z);
        let right: Matrix = matrix::matmul(&x, &matrix::matmul(&y, &z));
        prop_assert!(matrix::frobenius_distance_squared(&left, &right) < 1e-18);
    }
}
