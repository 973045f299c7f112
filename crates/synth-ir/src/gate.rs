//! Primitive gate matrices.
//!
//! Every function here is a pure map from a parameter slice (possibly empty)
//! to a dense unitary. [`crate::node::GateNode`] wraps these as leaves of the
//! circuit tree; the angle convention throughout is "units of 2π" as fixed by
//! §4.1 — `theta == 1.0` is a full turn.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::matrix::Matrix;

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// `R_z(angle)`, the single-qubit phase rotation `diag(e^{-iθ/2}, e^{iθ/2})`.
pub fn rot_z(angle: f64) -> Matrix {
    let half = angle / 2.0;
    Matrix::from_shape_vec(
        (2, 2),
        vec![
            Complex64::from_polar(1.0, -half),
            c(0.0, 0.0),
            c(0.0, 0.0),
            Complex64::from_polar(1.0, half),
        ],
    )
    .expect("2x2 shape")
}

/// `R_x(angle)`.
pub fn rot_x(angle: f64) -> Matrix {
    let half = angle / 2.0;
    let (cs, sn) = (half.cos(), half.sin());
    Matrix::from_shape_vec(
        (2, 2),
        vec![c(cs, 0.0), c(0.0, -sn), c(0.0, -sn), c(cs, 0.0)],
    )
    .expect("2x2 shape")
}

/// ZXZXZ parameterization (§4.1):
/// `M(θ) = R_z(2πθ₂ − π) · X90 · R_z(2πθ₁ + π) · X90 · R_z(2πθ₀)`.
pub fn zxzxz(theta: &[f64]) -> Matrix {
    debug_assert_eq!(theta.len(), 3);
    let x90 = rot_x(PI / 2.0);
    let z0 = rot_z(theta[0] * PI * 2.0);
    let z1 = rot_z(theta[1] * PI * 2.0 + PI);
    let z2 = rot_z(theta[2] * PI * 2.0 - PI);
    crate::matrix::matmul_all(&[z2, x90.clone(), z1, x90, z0])
}

/// Qiskit-style U3(θ₀, θ₁, θ₂), closed form from §4.1.
pub fn u3(theta: &[f64]) -> Matrix {
    debug_assert_eq!(theta.len(), 3);
    let ct = (PI * theta[0]).cos();
    let st = (PI * theta[0]).sin();
    let cp = (2.0 * PI * theta[1]).cos();
    let sp = (2.0 * PI * theta[1]).sin();
    let cl = (2.0 * PI * theta[2]).cos();
    let sl = (2.0 * PI * theta[2]).sin();

    let a = c(ct, 0.0);
    let b = -c(st, 0.0) * c(cl, sl);
    let cc = c(st, 0.0) * c(cp, sp);
    let d = c(ct, 0.0) * c(cl * cp - sl * sp, cl * sp + sl * cp);
    Matrix::from_shape_vec((2, 2), vec![a, b, cc, d]).expect("2x2 shape")
}

/// Arbitrary SU(3) rotation from 8 Euler-like angles (§4.1).
///
/// Built as three two-level (Givens) rotations over the (0,1), (1,2) and
/// (0,2) subspaces — each parameterized by a mixing angle and a phase — plus
/// two free relative phases, giving 3*2 + 2 = 8 real parameters. This is a
/// standard generalized-Euler decomposition of SU(3); the spec leaves the
/// exact parameterization open, only fixing the parameter count and that the
/// result is an arbitrary SU(3) element.
pub fn qutrit_arbitrary_rotation(theta: &[f64]) -> Matrix {
    debug_assert_eq!(theta.len(), 8);
    let two_level = |dim: usize, i: usize, j: usize, angle: f64, phase: f64| -> Matrix {
        let mut m = Matrix::eye(dim);
        let (cs, sn) = (angle.cos(), angle.sin());
        let ph = Complex64::from_polar(1.0, phase);
        m[[i, i]] = c(cs, 0.0);
        m[[j, j]] = c(cs, 0.0);
        m[[i, j]] = -sn * ph.conj();
        m[[j, i]] = c(sn, 0.0) * ph;
        m
    };

    let r01 = two_level(3, 0, 1, theta[0] * PI, theta[1] * 2.0 * PI);
    let r12 = two_level(3, 1, 2, theta[2] * PI, theta[3] * 2.0 * PI);
    let r02 = two_level(3, 0, 2, theta[4] * PI, theta[5] * 2.0 * PI);
    let phases = Matrix::from_diag(&ndarray::arr1(&[
        Complex64::from_polar(1.0, theta[6] * 2.0 * PI),
        Complex64::from_polar(1.0, theta[7] * 2.0 * PI),
        c(1.0, 0.0),
    ]));
    crate::matrix::matmul_all(&[r01, r12, r02, phases])
}

/// CNOT (control qubit 0, target qubit 1 in the 2-qubit register).
pub fn cnot() -> Matrix {
    Matrix::from_shape_vec(
        (4, 4),
        vec![
            c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.0, 0.0),
            c(0.0, 0.0), c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0),
            c(0.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(1.0, 0.0),
            c(0.0, 0.0), c(0.0, 0.0), c(1.0, 0.0), c(0.0, 0.0),
        ],
    )
    .expect("4x4 shape")
}

/// Square root of CNOT.
pub fn cnot_root() -> Matrix {
    let h = c(0.5, 0.5);
    let hc = c(0.5, -0.5);
    Matrix::from_shape_vec(
        (4, 4),
        vec![
            c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0), c(0.0, 0.0),
            c(0.0, 0.0), c(1.0, 0.0), c(0.0, 0.0), c(0.0, 0.0),
            c(0.0, 0.0), c(0.0, 0.0), h, hc,
            c(0.0, 0.0), c(0.0, 0.0), hc, h,
        ],
    )
    .expect("4x4 shape")
}

/// Qutrit CSUM gate (a 9×9 permutation), from the published qsearch table.
pub fn csum() -> Matrix {
    let perm = [0, 1, 2, 5, 3, 4, 7, 8, 6];
    permutation_matrix(9, &perm)
}

/// Qutrit CPI gate (a 9×9 permutation).
pub fn cpi() -> Matrix {
    let perm = [0, 1, 2, 4, 3, 5, 6, 7, 8];
    permutation_matrix(9, &perm)
}

/// Qutrit CPI-phase gate: the CPI permutation with one sign flip fixed, times
/// a diagonal of phases drawn at construction time (nondeterministic unless a
/// seed is supplied — callers must record `phases` for reproducibility).
pub fn cpi_phase(phases: &[Complex64; 5]) -> Matrix {
    let mut m = cpi();
    m[[3, 4]] = -m[[3, 4]];
    let diag = Matrix::from_diag(&ndarray::arr1(&[
        c(1.0, 0.0),
        c(1.0, 0.0),
        c(1.0, 0.0),
        c(1.0, 0.0),
        phases[0],
        phases[1],
        phases[2],
        phases[3],
        phases[4],
    ]));
    crate::matrix::matmul(&m, &diag)
}

fn permutation_matrix(dim: usize, perm: &[usize]) -> Matrix {
    let mut m = Matrix::zeros((dim, dim));
    for (row, &col) in perm.iter().enumerate() {
        m[[row, col]] = c(1.0, 0.0);
    }
    m
}

/// Permutation matrix implementing CNOT with `control` and `target` in an
/// `n`-qubit register (qubit 0 is the most significant bit of the basis
/// index).
pub fn nonadjacent_cnot(n: usize, control: usize, target: usize) -> Matrix {
    let dim = 1usize << n;
    let mut m = Matrix::zeros((dim, dim));
    for i in 0..dim {
        let control_bit = (i >> (n - 1 - control)) & 1;
        let j = if control_bit == 1 {
            i ^ (1 << (n - 1 - target))
        } else {
            i
        };
        m[[j, i]] = c(1.0, 0.0);
    }
    m
}

/// Block-diagonal embedding of `u` as a controlled gate: dimension `2*dim(u)`.
/// If `flipped` the active block is the first half instead of the second.
pub fn controlled_embed(u: &Matrix, flipped: bool) -> Matrix {
    let n = u.dim().0;
    let mut m = Matrix::eye(2 * n);
    let (r0, r1) = if flipped { (0, n) } else { (n, 0) };
    for i in 0..n {
        for j in 0..n {
            m[[r0 + i, r0 + j]] = u[[i, j]];
        }
    }
    let _ = r1;
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::is_unitary;

    #[test]
    fn zxzxz_is_unitary_for_random_angles() {
        for theta in [[0.1, 0.2, 0.3], [0.0, 0.0, 0.0], [0.73, -0.5, 1.2]] {
            assert!(is_unitary(&zxzxz(&theta), 1e-9));
        }
    }

    #[test]
    fn u3_is_unitary_for_random_angles() {
        for theta in [[0.1, 0.2, 0.3], [0.5, 0.5, 0.5], [0.0, 0.25, 0.75]] {
            assert!(is_unitary(&u3(&theta), 1e-9));
        }
    }

    #[test]
    fn u3_identity_at_zero() {
        let m = u3(&[0.0, 0.0, 0.0]);
        assert!(crate::matrix::frobenius_distance_squared(&m, &Matrix::eye(2)) < 1e-12);
    }

    #[test]
    fn qutrit_rotation_is_unitary() {
        let theta = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8];
        assert!(is_unitary(&qutrit_arbitrary_rotation(&theta), 1e-9));
    }

    #[test]
    fn cnot_is_involution() {
        let m = cnot();
        let squared = crate::matrix::matmul(&m, &m);
        assert!(crate::matrix::frobenius_distance_squared(&squared, &Matrix::eye(4)) < 1e-12);
    }

    #[test]
    fn nonadjacent_cnot_matches_adjacent_case() {
        let m = nonadjacent_cnot(2, 0, 1);
        assert!(crate::matrix::frobenius_distance_squared(&m, &cnot()) < 1e-12);
    }

    #[test]
    fn nonadjacent_cnot_is_permutation_and_unitary() {
        let m = nonadjacent_cnot(3, 0, 2);
        assert!(is_unitary(&m, 1e-9));
    }

    #[test]
    fn controlled_embed_doubles_dimension() {
        let u = rot_x(0.3);
        let embedded = controlled_embed(&u, false);
        assert_eq!(embedded.dim(), (4, 4));
        assert!(is_unitary(&embedded, 1e-9));
    }
}
