//! Small dense-matrix helpers shared by observables and the simulator.

use ndarray::{Array2, array};
use num_complex::Complex64;

/// Tolerance used when comparing matrix entries.
pub const ATOL: f64 = 1e-8;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// 2×2 identity.
pub fn identity() -> Array2<Complex64> {
    array![[ONE, ZERO], [ZERO, ONE]]
}

/// Pauli-X.
pub fn pauli_x() -> Array2<Complex64> {
    array![[ZERO, ONE], [ONE, ZERO]]
}

/// Pauli-Y.
pub fn pauli_y() -> Array2<Complex64> {
    array![[ZERO, -I], [I, ZERO]]
}

/// Pauli-Z.
pub fn pauli_z() -> Array2<Complex64> {
    array![[ONE, ZERO], [ZERO, -ONE]]
}

/// Hadamard.
pub fn hadamard() -> Array2<Complex64> {
    let h = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
    array![[h, h], [h, -h]]
}

/// Kronecker product `a ⊗ b`.
pub fn kron(a: &Array2<Complex64>, b: &Array2<Complex64>) -> Array2<Complex64> {
    let (ar, ac) = a.dim();
    let (br, bc) = b.dim();
    Array2::from_shape_fn((ar * br, ac * bc), |(i, j)| {
        a[[i / br, j / bc]] * b[[i % br, j % bc]]
    })
}

/// True if `m` equals its conjugate transpose within [`ATOL`].
pub fn is_hermitian(m: &Array2<Complex64>) -> bool {
    let (r, c) = m.dim();
    if r != c {
        return false;
    }
    (0..r).all(|i| (0..c).all(|j| (m[[i, j]] - m[[j, i]].conj()).norm() < ATOL))
}

/// True if every off-diagonal entry of `m` is zero within [`ATOL`].
pub fn is_diagonal(m: &Array2<Complex64>) -> bool {
    m.indexed_iter()
        .all(|((i, j), v)| i == j || v.norm() < ATOL)
}

/// Entry-wise comparison within [`ATOL`].
pub fn approx_eq(a: &Array2<Complex64>, b: &Array2<Complex64>) -> bool {
    a.dim() == b.dim() && a.iter().zip(b.iter()).all(|(x, y)| (x - y).norm() < ATOL)
}

/// `log2(dim)` if `dim` is a power of two.
pub fn num_wires_for_dim(dim: usize) -> Option<usize> {
    if dim == 0 || !dim.is_power_of_two() {
        None
    } else {
        Some(dim.trailing_zeros() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kron_dimensions() {
        let m = kron(&pauli_x(), &pauli_z());
        assert_eq!(m.dim(), (4, 4));
        // X ⊗ Z: |00⟩ -> |10⟩ with +1
        assert_eq!(m[[2, 0]], ONE);
        assert_eq!(m[[3, 1]], -ONE);
    }

    #[test]
    fn test_hermitian_checks() {
        assert!(is_hermitian(&pauli_y()));
        assert!(is_diagonal(&pauli_z()));
        assert!(!is_diagonal(&pauli_x()));
        let not_h = array![[ONE, I], [I, ONE]];
        assert!(!is_hermitian(&not_h));
    }

    #[test]
    fn test_num_wires_for_dim() {
        assert_eq!(num_wires_for_dim(8), Some(3));
        assert_eq!(num_wires_for_dim(6), None);
        assert_eq!(num_wires_for_dim(0), None);
    }
}
