//! Hamiltonian data structures.
//!
//! A Hamiltonian is a weighted sum of observable terms:
//!
//!   H = Σ_k  c_k · O_k
//!
//! where each `O_k` is a [`Tensor`] of single-wire Paulis, Hadamards or
//! multi-wire Hermitian matrices and `c_k ∈ ℝ`. Coefficients and terms are
//! paired positionally.
//!
//! # Example
//!
//! ```rust
//! use qvar_ir::{Hamiltonian, Observable};
//!
//! // H = 0.5·Z₀Z₁ - 1.0·X₀
//! let h = Hamiltonian::new(
//!     vec![0.5, -1.0],
//!     vec![
//!         Observable::pauli_z(0).tensor(Observable::pauli_z(1)).unwrap(),
//!         Observable::pauli_x(0).into(),
//!     ],
//! )
//! .unwrap();
//! assert_eq!(h.len(), 2);
//! assert!(!h.is_diagonal().unwrap());
//! ```

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Neg, Sub};

use crate::decompose::pauli_decompose;
use crate::error::{IrError, IrResult};
use crate::matrix::{self, ATOL};
use crate::observable::{Observable, ObservableKind, Tensor};
use crate::wires::{WireMap, Wires, wire_map};

/// A weighted sum of observable terms.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "HamiltonianRaw")]
pub struct Hamiltonian {
    coeffs: Vec<f64>,
    ops: Vec<Tensor>,
}

#[derive(Deserialize)]
struct HamiltonianRaw {
    coeffs: Vec<f64>,
    ops: Vec<Tensor>,
}

impl TryFrom<HamiltonianRaw> for Hamiltonian {
    type Error = IrError;

    fn try_from(raw: HamiltonianRaw) -> IrResult<Self> {
        Hamiltonian::new(raw.coeffs, raw.ops)
    }
}

impl Hamiltonian {
    /// Create a Hamiltonian from parallel coefficient and term lists.
    pub fn new(coeffs: Vec<f64>, ops: Vec<Tensor>) -> IrResult<Self> {
        if coeffs.len() != ops.len() {
            return Err(IrError::TermCountMismatch {
                coeffs: coeffs.len(),
                ops: ops.len(),
            });
        }
        Ok(Self { coeffs, ops })
    }

    /// Create a Hamiltonian from complex coefficients, which must all be real.
    pub fn from_complex(coeffs: &[Complex64], ops: Vec<Tensor>) -> IrResult<Self> {
        let real = coeffs
            .iter()
            .enumerate()
            .map(|(index, c)| {
                if c.im.abs() > ATOL {
                    Err(IrError::NonRealCoefficient {
                        index,
                        value: c.to_string(),
                    })
                } else {
                    Ok(c.re)
                }
            })
            .collect::<IrResult<Vec<_>>>()?;
        Self::new(real, ops)
    }

    /// A Hamiltonian with a single term.
    pub fn term(coeff: f64, op: impl Into<Tensor>) -> Self {
        Self {
            coeffs: vec![coeff],
            ops: vec![op.into()],
        }
    }

    /// Append a term.
    pub fn push(&mut self, coeff: f64, op: impl Into<Tensor>) {
        self.coeffs.push(coeff);
        self.ops.push(op.into());
    }

    /// The coefficients.
    pub fn coeffs(&self) -> &[f64] {
        &self.coeffs
    }

    /// The observable terms.
    pub fn ops(&self) -> &[Tensor] {
        &self.ops
    }

    /// `(coeff, term)` pairs.
    pub fn terms(&self) -> impl Iterator<Item = (f64, &Tensor)> + '_ {
        self.coeffs.iter().copied().zip(self.ops.iter())
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// True if there are no terms.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Union of the term wires, in term order.
    pub fn wires(&self) -> Wires {
        self.ops
            .iter()
            .fold(Wires::empty(), |acc, op| acc.union(&op.wires()))
    }

    /// Relabel the wires of every term. Wires missing from `map` are kept.
    pub fn map_wires(&self, map: &WireMap) -> IrResult<Hamiltonian> {
        let ops = self
            .ops
            .iter()
            .map(|op| op.map_wires(map))
            .collect::<IrResult<Vec<_>>>()?;
        Ok(Self {
            coeffs: self.coeffs.clone(),
            ops,
        })
    }

    /// Rewrite every Hermitian factor as a sum of Pauli words.
    ///
    /// A term with several Hermitian factors expands into the Cartesian
    /// product of their decompositions. Terms without Hermitian factors are
    /// carried over unchanged.
    pub fn decompose(&self) -> IrResult<Hamiltonian> {
        let mut out = Hamiltonian::default();
        for (coeff, op) in self.terms() {
            let mut partial: Vec<(f64, Vec<Observable>)> = vec![(coeff, Vec::new())];
            for factor in op.factors() {
                let options = decompose_factor(factor)?;
                partial = partial
                    .iter()
                    .flat_map(|(c, obs)| {
                        options.iter().map(move |(oc, word)| {
                            let mut obs = obs.clone();
                            obs.extend(word.factors().iter().cloned());
                            (c * oc, obs)
                        })
                    })
                    .collect();
            }
            for (c, obs) in partial {
                out.push(c, Tensor::new(obs)?);
            }
        }
        tracing::debug!(
            terms_in = self.len(),
            terms_out = out.len(),
            "decomposed Hamiltonian into Pauli words"
        );
        Ok(out)
    }

    /// True if the Hamiltonian is diagonal in the computational basis.
    ///
    /// Off-diagonal Pauli words may still cancel once like terms are summed,
    /// so coefficients of identical off-diagonal words are accumulated before
    /// testing.
    pub fn is_diagonal(&self) -> IrResult<bool> {
        let decomposed = self.decompose()?;
        let mut buckets: Vec<(Tensor, f64)> = Vec::new();
        for (coeff, op) in decomposed.terms() {
            let pruned = op.prune();
            if matrix::is_diagonal(&pruned.matrix()) {
                continue;
            }
            let key = pruned.canonical();
            match buckets.iter_mut().find(|(k, _)| *k == key) {
                Some((_, sum)) => *sum += coeff,
                None => buckets.push((key, coeff)),
            }
        }
        Ok(buckets.iter().all(|(_, sum)| sum.abs() < ATOL))
    }

    /// Prune identities, merge like terms and drop vanishing coefficients.
    ///
    /// Merged terms keep the position of their first occurrence.
    pub fn simplify(&self) -> Hamiltonian {
        let mut keys: Vec<Tensor> = Vec::new();
        let mut merged: Vec<(f64, Tensor)> = Vec::new();
        for (coeff, op) in self.terms() {
            let pruned = op.prune();
            let key = pruned.canonical();
            match keys.iter().position(|k| *k == key) {
                Some(i) => merged[i].0 += coeff,
                None => {
                    keys.push(key);
                    merged.push((coeff, pruned));
                }
            }
        }
        let (coeffs, ops) = merged
            .into_iter()
            .filter(|(c, _)| c.abs() >= ATOL)
            .unzip();
        Self { coeffs, ops }
    }

    /// Dense matrix on the given wire order. The first wire is the most
    /// significant bit of the row index.
    pub fn matrix(&self, wires: &Wires) -> IrResult<Array2<Complex64>> {
        let n = wires.len();
        let dim = 1usize << n;
        let mut out = Array2::<Complex64>::zeros((dim, dim));
        for (coeff, op) in self.terms() {
            let term_wires = op.wires();
            let positions = term_wires
                .iter()
                .map(|w| wires.index_of(w).ok_or(IrError::UnknownWire(w)))
                .collect::<IrResult<Vec<_>>>()?;
            let local = op.matrix();
            let mask: usize = positions.iter().map(|p| 1usize << (n - 1 - p)).sum();
            let sub = |idx: usize| {
                positions
                    .iter()
                    .fold(0usize, |acc, p| (acc << 1) | ((idx >> (n - 1 - p)) & 1))
            };
            for r in 0..dim {
                for c in 0..dim {
                    if r & !mask != c & !mask {
                        continue;
                    }
                    out[[r, c]] += local[[sub(r), sub(c)]] * coeff;
                }
            }
        }
        Ok(out)
    }
}

/// Pauli expansion of a single factor, with the words placed on the factor's wires.
fn decompose_factor(factor: &Observable) -> IrResult<Vec<(f64, Tensor)>> {
    match factor.kind() {
        ObservableKind::Hermitian(m) => {
            let (coeffs, words) = pauli_decompose(m)?;
            let map = wire_map(factor.wires().iter().enumerate());
            coeffs
                .into_iter()
                .zip(words)
                .map(|(c, w)| Ok((c, w.map_wires(&map)?)))
                .collect()
        }
        _ => Ok(vec![(1.0, Tensor::from(factor.clone()))]),
    }
}

impl From<Tensor> for Hamiltonian {
    fn from(op: Tensor) -> Self {
        Hamiltonian::term(1.0, op)
    }
}

impl From<Observable> for Hamiltonian {
    fn from(op: Observable) -> Self {
        Hamiltonian::term(1.0, op)
    }
}

impl Add for Hamiltonian {
    type Output = Hamiltonian;

    fn add(mut self, rhs: Hamiltonian) -> Hamiltonian {
        self.coeffs.extend(rhs.coeffs);
        self.ops.extend(rhs.ops);
        self
    }
}

impl Sub for Hamiltonian {
    type Output = Hamiltonian;

    fn sub(self, rhs: Hamiltonian) -> Hamiltonian {
        self + (-rhs)
    }
}

impl Neg for Hamiltonian {
    type Output = Hamiltonian;

    fn neg(self) -> Hamiltonian {
        self * -1.0
    }
}

impl Mul<f64> for Hamiltonian {
    type Output = Hamiltonian;

    fn mul(mut self, rhs: f64) -> Hamiltonian {
        for c in &mut self.coeffs {
            *c *= rhs;
        }
        self
    }
}

impl Mul<Hamiltonian> for f64 {
    type Output = Hamiltonian;

    fn mul(self, rhs: Hamiltonian) -> Hamiltonian {
        rhs * self
    }
}

impl Mul<Tensor> for f64 {
    type Output = Hamiltonian;

    fn mul(self, rhs: Tensor) -> Hamiltonian {
        Hamiltonian::term(self, rhs)
    }
}

impl Mul<Observable> for f64 {
    type Output = Hamiltonian;

    fn mul(self, rhs: Observable) -> Hamiltonian {
        Hamiltonian::term(self, rhs)
    }
}

impl Sum for Hamiltonian {
    fn sum<I: Iterator<Item = Hamiltonian>>(iter: I) -> Self {
        iter.fold(Hamiltonian::default(), Add::add)
    }
}

impl fmt::Display for Hamiltonian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (coeff, op)) in self.terms().enumerate() {
            if i > 0 {
                write!(f, "\n+ ")?;
            }
            write!(f, "({coeff:?}) [{op}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn zz(a: u32, b: u32) -> Tensor {
        Observable::pauli_z(a)
            .tensor(Observable::pauli_z(b))
            .unwrap()
    }

    #[test]
    fn test_length_mismatch() {
        let err = Hamiltonian::new(vec![1.0, 2.0], vec![zz(0, 1)]);
        assert!(matches!(
            err,
            Err(IrError::TermCountMismatch { coeffs: 2, ops: 1 })
        ));
    }

    #[test]
    fn test_complex_coefficients() {
        let ok = Hamiltonian::from_complex(&[Complex64::new(0.5, 0.0)], vec![zz(0, 1)]);
        assert_eq!(ok.unwrap().coeffs(), &[0.5]);
        let err = Hamiltonian::from_complex(&[Complex64::new(0.5, 0.1)], vec![zz(0, 1)]);
        assert!(matches!(err, Err(IrError::NonRealCoefficient { index: 0, .. })));
    }

    #[test]
    fn test_display() {
        let h = Hamiltonian::new(
            vec![0.5, -1.0],
            vec![zz(0, 1), Observable::hadamard(2).into()],
        )
        .unwrap();
        assert_eq!(h.to_string(), "(0.5) [Z0 Z1]\n+ (-1.0) [H2]");
    }

    #[test]
    fn test_simplify_merges_and_drops() {
        let h = Hamiltonian::new(
            vec![1.0, 2.0, 0.5, -0.5],
            vec![
                Observable::pauli_x(0)
                    .tensor(Observable::identity(1))
                    .unwrap(),
                Observable::pauli_x(0).into(),
                Observable::pauli_z(1).into(),
                Observable::pauli_z(1).into(),
            ],
        )
        .unwrap();
        let s = h.simplify();
        assert_eq!(s.coeffs(), &[3.0]);
        assert_eq!(s.ops()[0].to_string(), "X0");
    }

    #[test]
    fn test_decompose_hermitian() {
        let h = Hamiltonian::term(
            2.0,
            Observable::hermitian_real(array![[1.0, 1.0], [1.0, 1.0]], [3]).unwrap(),
        );
        let d = h.decompose().unwrap();
        assert_eq!(d.coeffs(), &[2.0, 2.0]);
        assert_eq!(d.ops()[0].to_string(), "I3");
        assert_eq!(d.ops()[1].to_string(), "X3");
    }

    #[test]
    fn test_is_diagonal_with_cancellation() {
        let h = Hamiltonian::new(
            vec![1.0, -1.0, 0.3],
            vec![
                Observable::pauli_x(0).into(),
                Observable::pauli_x(0).into(),
                Observable::pauli_z(1).into(),
            ],
        )
        .unwrap();
        assert!(h.is_diagonal().unwrap());
    }

    #[test]
    fn test_matrix_embeds_terms() {
        let h = Hamiltonian::term(1.0, Observable::pauli_z(1));
        let m = h.matrix(&Wires::range(2)).unwrap();
        let diag: Vec<f64> = (0..4).map(|i| m[[i, i]].re).collect();
        assert_eq!(diag, vec![1.0, -1.0, 1.0, -1.0]);
        assert!(h.matrix(&Wires::range(1)).is_err());
    }

    #[test]
    fn test_arithmetic() {
        let a = 0.5 * zz(0, 1);
        let b = 2.0 * Observable::pauli_x(0);
        let h = a.clone() + b.clone();
        assert_eq!(h.coeffs(), &[0.5, 2.0]);
        let d = a - b;
        assert_eq!(d.coeffs(), &[0.5, -2.0]);
        let s: Hamiltonian = (0..3).map(|i| Hamiltonian::term(1.0, Observable::pauli_z(i))).sum();
        assert_eq!(s.len(), 3);
        assert_eq!(s.wires(), Wires::range(3));
    }
}
