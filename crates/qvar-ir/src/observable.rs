//! Observables and their tensor products.
//!
//! An [`Observable`] is a single Hermitian operator attached to wires. The
//! named kinds (Identity, the Paulis, Hadamard) act on exactly one wire; a
//! [`ObservableKind::Hermitian`] carries an explicit `2^k × 2^k` matrix for
//! `k` wires. A [`Tensor`] is an ordered product of observables on disjoint
//! wires and is the unit a [`Hamiltonian`](crate::Hamiltonian) is made of.
//!
//! ```rust
//! use qvar_ir::{Observable, Tensor};
//!
//! let zz = Observable::pauli_z(0).tensor(Observable::pauli_z(1)).unwrap();
//! assert_eq!(zz.to_string(), "Z0 Z1");
//! assert_eq!(zz.pauli_word().as_deref(), Some("ZZ"));
//! ```

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::matrix;
use crate::wires::{Wire, WireMap, Wires};

/// The operator an [`Observable`] represents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ObservableKind {
    /// Identity.
    Identity,
    /// Pauli-X.
    PauliX,
    /// Pauli-Y.
    PauliY,
    /// Pauli-Z.
    PauliZ,
    /// Hadamard.
    Hadamard,
    /// Arbitrary Hermitian matrix.
    Hermitian(Array2<Complex64>),
}

impl ObservableKind {
    /// Full name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            ObservableKind::Identity => "Identity",
            ObservableKind::PauliX => "PauliX",
            ObservableKind::PauliY => "PauliY",
            ObservableKind::PauliZ => "PauliZ",
            ObservableKind::Hadamard => "Hadamard",
            ObservableKind::Hermitian(_) => "Hermitian",
        }
    }

    /// Letter used in Pauli words and printed Hamiltonians.
    pub fn short_name(&self) -> &'static str {
        match self {
            ObservableKind::Identity => "I",
            ObservableKind::PauliX => "X",
            ObservableKind::PauliY => "Y",
            ObservableKind::PauliZ => "Z",
            ObservableKind::Hadamard => "H",
            ObservableKind::Hermitian(_) => "Herm",
        }
    }

    /// Parse a single Pauli letter.
    pub fn from_pauli_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(ObservableKind::Identity),
            'X' => Some(ObservableKind::PauliX),
            'Y' => Some(ObservableKind::PauliY),
            'Z' => Some(ObservableKind::PauliZ),
            _ => None,
        }
    }

    /// True for Identity and the three Paulis.
    pub fn is_pauli(&self) -> bool {
        matches!(
            self,
            ObservableKind::Identity
                | ObservableKind::PauliX
                | ObservableKind::PauliY
                | ObservableKind::PauliZ
        )
    }
}

/// A single observable on one or more wires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ObservableRaw")]
pub struct Observable {
    kind: ObservableKind,
    wires: Wires,
}

/// Unvalidated wire form of [`Observable`].
#[derive(Deserialize)]
struct ObservableRaw {
    kind: ObservableKind,
    wires: Wires,
}

impl TryFrom<ObservableRaw> for Observable {
    type Error = IrError;

    fn try_from(raw: ObservableRaw) -> IrResult<Self> {
        Observable::new(raw.kind, raw.wires)
    }
}

impl Observable {
    /// Create an observable, validating the wire count and, for Hermitian
    /// kinds, the matrix.
    pub fn new(kind: ObservableKind, wires: Wires) -> IrResult<Self> {
        match &kind {
            ObservableKind::Hermitian(m) => {
                let (rows, cols) = m.dim();
                if rows != cols {
                    return Err(IrError::InvalidMatrix(format!(
                        "expected a square matrix, got {rows}x{cols}"
                    )));
                }
                let n = matrix::num_wires_for_dim(rows).ok_or_else(|| {
                    IrError::InvalidMatrix(format!("dimension {rows} is not a power of two"))
                })?;
                if n == 0 {
                    return Err(IrError::InvalidMatrix("matrix must act on at least one wire".into()));
                }
                if n != wires.len() {
                    return Err(IrError::WireCountMismatch {
                        name: kind.name().into(),
                        expected: n,
                        got: wires.len(),
                    });
                }
                if !matrix::is_hermitian(m) {
                    return Err(IrError::NotHermitian);
                }
            }
            _ => {
                if wires.len() != 1 {
                    return Err(IrError::WireCountMismatch {
                        name: kind.name().into(),
                        expected: 1,
                        got: wires.len(),
                    });
                }
            }
        }
        Ok(Self { kind, wires })
    }

    fn single(kind: ObservableKind, wire: impl Into<Wire>) -> Self {
        Self {
            kind,
            wires: Wires::single(wire),
        }
    }

    /// Identity on `wire`.
    pub fn identity(wire: impl Into<Wire>) -> Self {
        Self::single(ObservableKind::Identity, wire)
    }

    /// Pauli-X on `wire`.
    pub fn pauli_x(wire: impl Into<Wire>) -> Self {
        Self::single(ObservableKind::PauliX, wire)
    }

    /// Pauli-Y on `wire`.
    pub fn pauli_y(wire: impl Into<Wire>) -> Self {
        Self::single(ObservableKind::PauliY, wire)
    }

    /// Pauli-Z on `wire`.
    pub fn pauli_z(wire: impl Into<Wire>) -> Self {
        Self::single(ObservableKind::PauliZ, wire)
    }

    /// Hadamard on `wire`.
    pub fn hadamard(wire: impl Into<Wire>) -> Self {
        Self::single(ObservableKind::Hadamard, wire)
    }

    /// Hermitian matrix on `wires`.
    pub fn hermitian<W: Into<Wire>>(
        matrix: Array2<Complex64>,
        wires: impl IntoIterator<Item = W>,
    ) -> IrResult<Self> {
        Self::new(ObservableKind::Hermitian(matrix), Wires::new(wires)?)
    }

    /// Hermitian matrix given with real entries.
    pub fn hermitian_real<W: Into<Wire>>(
        matrix: Array2<f64>,
        wires: impl IntoIterator<Item = W>,
    ) -> IrResult<Self> {
        Self::hermitian(matrix.mapv(|x| Complex64::new(x, 0.0)), wires)
    }

    /// Single Pauli from its letter.
    pub fn pauli(c: char, wire: impl Into<Wire>) -> Option<Self> {
        ObservableKind::from_pauli_char(c).map(|k| Self::single(k, wire))
    }

    /// The operator kind.
    pub fn kind(&self) -> &ObservableKind {
        &self.kind
    }

    /// The wires acted on.
    pub fn wires(&self) -> &Wires {
        &self.wires
    }

    /// Full name, e.g. `PauliZ`.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// True for Identity.
    pub fn is_identity(&self) -> bool {
        self.kind == ObservableKind::Identity
    }

    /// True for Identity and the Paulis.
    pub fn is_pauli(&self) -> bool {
        self.kind.is_pauli()
    }

    /// True for Identity and PauliZ, the kinds diagonal in the computational basis.
    pub fn is_diagonal_kind(&self) -> bool {
        matches!(self.kind, ObservableKind::Identity | ObservableKind::PauliZ)
    }

    /// Eigenvalues of the named single-wire kinds.
    pub fn eigvals(&self) -> Option<[f64; 2]> {
        match self.kind {
            ObservableKind::Identity => Some([1.0, 1.0]),
            ObservableKind::Hermitian(_) => None,
            _ => Some([1.0, -1.0]),
        }
    }

    /// Matrix in the computational basis of [`Self::wires`].
    pub fn matrix(&self) -> Array2<Complex64> {
        match &self.kind {
            ObservableKind::Identity => matrix::identity(),
            ObservableKind::PauliX => matrix::pauli_x(),
            ObservableKind::PauliY => matrix::pauli_y(),
            ObservableKind::PauliZ => matrix::pauli_z(),
            ObservableKind::Hadamard => matrix::hadamard(),
            ObservableKind::Hermitian(m) => m.clone(),
        }
    }

    /// Relabel wires according to `map`.
    pub fn map_wires(&self, map: &WireMap) -> IrResult<Self> {
        Ok(Self {
            kind: self.kind.clone(),
            wires: self.wires.map(map)?,
        })
    }

    /// Tensor product with another observable or tensor.
    pub fn tensor(self, other: impl Into<Tensor>) -> IrResult<Tensor> {
        Tensor::from(self).tensor(other)
    }
}

impl fmt::Display for Observable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind.short_name())?;
        for (i, w) in self.wires.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{w}")?;
        }
        Ok(())
    }
}

/// A tensor product of observables acting on disjoint wires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TensorRaw")]
pub struct Tensor {
    factors: Vec<Observable>,
}

#[derive(Deserialize)]
struct TensorRaw {
    factors: Vec<Observable>,
}

impl TryFrom<TensorRaw> for Tensor {
    type Error = IrError;

    fn try_from(raw: TensorRaw) -> IrResult<Self> {
        Tensor::new(raw.factors)
    }
}

impl Tensor {
    /// Create a tensor product. Factors must be non-empty and must not share wires.
    pub fn new(factors: Vec<Observable>) -> IrResult<Self> {
        if factors.is_empty() {
            return Err(IrError::EmptyTensor);
        }
        let mut seen = Wires::empty();
        for f in &factors {
            for w in f.wires() {
                if seen.contains(w) {
                    return Err(IrError::OverlappingTensor(w));
                }
            }
            seen = seen.union(f.wires());
        }
        Ok(Self { factors })
    }

    /// Build a Pauli word tensor, e.g. `("XZ", [0, 2])`.
    pub fn from_pauli_word<W: Into<Wire>>(
        word: &str,
        wires: impl IntoIterator<Item = W>,
    ) -> IrResult<Self> {
        let wires = Wires::new(wires)?;
        let invalid = || IrError::InvalidPauliWord {
            word: word.to_string(),
            wires: wires.len(),
        };
        if word.chars().count() != wires.len() {
            return Err(invalid());
        }
        let factors = word
            .chars()
            .zip(wires.iter())
            .map(|(c, w)| Observable::pauli(c, w).ok_or_else(invalid))
            .collect::<IrResult<Vec<_>>>()?;
        Self::new(factors)
    }

    /// The factors in order.
    pub fn factors(&self) -> &[Observable] {
        &self.factors
    }

    /// Number of factors.
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    /// Always false; a tensor has at least one factor.
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// All wires acted on, in factor order.
    pub fn wires(&self) -> Wires {
        self.factors
            .iter()
            .fold(Wires::empty(), |acc, f| acc.union(f.wires()))
    }

    /// Names of the factors.
    pub fn names(&self) -> Vec<&'static str> {
        self.factors.iter().map(Observable::name).collect()
    }

    /// Tensor product with another observable or tensor.
    pub fn tensor(mut self, other: impl Into<Tensor>) -> IrResult<Tensor> {
        self.factors.extend(other.into().factors);
        Self::new(self.factors)
    }

    /// Drop identity factors. A product of identities keeps a single identity
    /// on its first wire.
    pub fn prune(&self) -> Tensor {
        let kept: Vec<Observable> = self
            .factors
            .iter()
            .filter(|f| !f.is_identity())
            .cloned()
            .collect();
        if kept.is_empty() {
            let first = self.factors[0].wires().as_slice()[0];
            Tensor {
                factors: vec![Observable::identity(first)],
            }
        } else {
            Tensor { factors: kept }
        }
    }

    /// Pruned form with factors sorted by their first wire; two tensors
    /// describe the same operator iff their canonical forms are equal.
    pub fn canonical(&self) -> Tensor {
        let mut pruned = self.prune();
        pruned.factors.sort_by_key(|f| f.wires().as_slice()[0]);
        pruned
    }

    /// True if all factors are identities.
    pub fn is_identity(&self) -> bool {
        self.factors.iter().all(Observable::is_identity)
    }

    /// True if every factor is Identity or a Pauli.
    pub fn is_pauli_word(&self) -> bool {
        self.factors.iter().all(Observable::is_pauli)
    }

    /// True if every factor is Identity or PauliZ.
    pub fn is_z_word(&self) -> bool {
        self.factors.iter().all(Observable::is_diagonal_kind)
    }

    /// The Pauli word over [`Self::wires`], or `None` if a factor is not a Pauli.
    pub fn pauli_word(&self) -> Option<String> {
        if !self.is_pauli_word() {
            return None;
        }
        Some(self.factors.iter().map(|f| f.kind().short_name()).collect())
    }

    /// Matrix over [`Self::wires`] (Kronecker product in factor order).
    pub fn matrix(&self) -> Array2<Complex64> {
        let mut iter = self.factors.iter();
        let first = iter.next().map(Observable::matrix).unwrap_or_else(matrix::identity);
        iter.fold(first, |acc, f| matrix::kron(&acc, &f.matrix()))
    }

    /// Relabel wires according to `map`.
    pub fn map_wires(&self, map: &WireMap) -> IrResult<Tensor> {
        let factors = self
            .factors
            .iter()
            .map(|f| f.map_wires(map))
            .collect::<IrResult<Vec<_>>>()?;
        Tensor::new(factors)
    }
}

impl From<Observable> for Tensor {
    fn from(obs: Observable) -> Self {
        Tensor { factors: vec![obs] }
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, obs) in self.factors.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{obs}")?;
        }
        Ok(())
    }
}
