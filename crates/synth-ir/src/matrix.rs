//! Dense complex matrix algebra shared by every gate node.
//!
//! All composition operations the circuit tree needs — matrix product,
//! Kronecker product, conjugate transpose — live here so `node.rs` stays
//! about circuit *shape* rather than linear algebra.

use ndarray::Array2;
use num_complex::Complex64;

/// A dense D×D complex matrix, row-major via `ndarray`.
pub type Matrix = Array2<Complex64>;

/// The n×n identity matrix.
pub fn identity(n: usize) -> Matrix {
    Matrix::eye(n)
}

/// Kronecker (tensor) product `a ⊗ b`.
pub fn kron(a: &Matrix, b: &Matrix) -> Matrix {
    let (ra, ca) = a.dim();
    let (rb, cb) = b.dim();
    let mut out = Matrix::zeros((ra * rb, ca * cb));
    for i in 0..ra {
        for j in 0..ca {
            let block = &a[[i, j]] * b;
            out.slice_mut(ndarray::s![i * rb..(i + 1) * rb, j * cb..(j + 1) * cb])
                .assign(&block);
        }
    }
    out
}

/// Iterated Kronecker product of a non-empty slice of matrices, left to right.
pub fn kron_all(mats: &[Matrix]) -> Matrix {
    let mut iter = mats.iter();
    let first = iter.next().expect("kron_all requires at least one matrix");
    let mut acc = first.clone();
    for m in iter {
        acc = kron(&acc, m);
    }
    acc
}

/// Ordinary matrix product `a · b`.
pub fn matmul(a: &Matrix, b: &Matrix) -> Matrix {
    a.dot(b)
}

/// Left-to-right chained matrix product of a non-empty slice of matrices.
pub fn matmul_all(mats: &[Matrix]) -> Matrix {
    let mut iter = mats.iter();
    let first = iter.next().expect("matmul_all requires at least one matrix");
    let mut acc = first.clone();
    for m in iter {
        acc = matmul(&acc, m);
    }
    acc
}

/// Conjugate transpose (`†`).
pub fn dagger(a: &Matrix) -> Matrix {
    a.t().mapv(|z| z.conj())
}

/// Squared Frobenius norm of `a - b`, used by tests and by the default
/// `eval_func` implementations.
pub fn frobenius_distance_squared(a: &Matrix, b: &Matrix) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).norm_sqr())
        .sum()
}

/// True if `m · m† ≈ I` within `eps` (Frobenius norm).
pub fn is_unitary(m: &Matrix, eps: f64) -> bool {
    let (n, k) = m.dim();
    if n != k {
        return false;
    }
    let prod = matmul(m, &dagger(m));
    frobenius_distance_squared(&prod, &identity(n)).sqrt() < eps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kron_of_identities_is_identity() {
        let i2 = identity(2);
        let i3 = identity(3);
        let combined = kron(&i2, &i3);
        assert_eq!(combined.dim(), (6, 6));
        assert!(is_unitary(&combined, 1e-9));
    }

    #[test]
    fn matmul_all_chains_in_order() {
        let x = Matrix::from_shape_vec(
            (2, 2),
            vec![
                Complex64::new(0.0, 0.0),
                Complex64::new(1.0, 0.0),
                Complex64::new(1.0, 0.0),
                Complex64::new(0.0, 0.0),
            ],
        )
        .unwrap();
        let result = matmul_all(&[x.clone(), x.clone(), x.clone()]);
        // X*X*X == X
        assert!(frobenius_distance_squared(&result, &x) < 1e-12);
    }

    #[test]
    fn dagger_of_hadamard_is_itself() {
        let s = 1.0 / 2.0_f64.sqrt();
        let h = Matrix::from_shape_vec(
            (2, 2),
            vec![
                Complex64::new(s, 0.0),
                Complex64::new(s, 0.0),
                Complex64::new(s, 0.0),
                Complex64::new(-s, 0.0),
            ],
        )
        .unwrap();
        let hd = dagger(&h);
        assert!(frobenius_distance_squared(&h, &hd) < 1e-12);
        assert!(is_unitary(&h, 1e-9));
    }
}
