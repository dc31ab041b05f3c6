//! Quantum gate types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::wires::Wires;

/// Gates with known semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    // Single-wire Clifford gates
    /// Hadamard gate.
    Hadamard,
    /// Pauli-X gate.
    PauliX,
    /// Pauli-Y gate.
    PauliY,
    /// Pauli-Z gate.
    PauliZ,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,
    /// T gate (fourth root of Z).
    T,

    // Single-wire rotations
    /// Rotation around X.
    RX(f64),
    /// Rotation around Y.
    RY(f64),
    /// Rotation around Z.
    RZ(f64),
    /// Phase shift `diag(1, e^{iφ})`.
    PhaseShift(f64),
    /// General rotation `RZ(ω) RY(θ) RZ(φ)`.
    Rot(f64, f64, f64),

    // Two-wire gates
    /// Controlled-X.
    CNOT,
    /// Controlled-Z.
    CZ,
    /// SWAP.
    SWAP,
    /// Controlled RX.
    CRX(f64),
    /// Controlled RY.
    CRY(f64),
    /// Controlled RZ.
    CRZ(f64),

    // Any number of wires
    /// `exp(-i θ/2 Z⊗…⊗Z)`.
    MultiRZ(f64),
    /// `exp(-i θ/2 P)` for a Pauli word `P`.
    PauliRot {
        /// Rotation angle.
        theta: f64,
        /// Pauli word, one letter per wire.
        word: String,
    },
    /// Prepare a computational basis state from `|0…0⟩`.
    BasisState(Vec<u8>),
}

impl GateKind {
    /// Name of the gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            GateKind::Hadamard => "Hadamard",
            GateKind::PauliX => "PauliX",
            GateKind::PauliY => "PauliY",
            GateKind::PauliZ => "PauliZ",
            GateKind::S => "S",
            GateKind::Sdg => "Sdg",
            GateKind::T => "T",
            GateKind::RX(_) => "RX",
            GateKind::RY(_) => "RY",
            GateKind::RZ(_) => "RZ",
            GateKind::PhaseShift(_) => "PhaseShift",
            GateKind::Rot(..) => "Rot",
            GateKind::CNOT => "CNOT",
            GateKind::CZ => "CZ",
            GateKind::SWAP => "SWAP",
            GateKind::CRX(_) => "CRX",
            GateKind::CRY(_) => "CRY",
            GateKind::CRZ(_) => "CRZ",
            GateKind::MultiRZ(_) => "MultiRZ",
            GateKind::PauliRot { .. } => "PauliRot",
            GateKind::BasisState(_) => "BasisState",
        }
    }

    /// Fixed number of wires, or `None` when the gate takes any number.
    #[inline]
    pub fn num_wires(&self) -> Option<usize> {
        match self {
            GateKind::Hadamard
            | GateKind::PauliX
            | GateKind::PauliY
            | GateKind::PauliZ
            | GateKind::S
            | GateKind::Sdg
            | GateKind::T
            | GateKind::RX(_)
            | GateKind::RY(_)
            | GateKind::RZ(_)
            | GateKind::PhaseShift(_)
            | GateKind::Rot(..) => Some(1),
            GateKind::CNOT
            | GateKind::CZ
            | GateKind::SWAP
            | GateKind::CRX(_)
            | GateKind::CRY(_)
            | GateKind::CRZ(_) => Some(2),
            GateKind::PauliRot { word, .. } => Some(word.chars().count()),
            GateKind::BasisState(bits) => Some(bits.len()),
            GateKind::MultiRZ(_) => None,
        }
    }

    /// Trainable parameters, in order.
    pub fn params(&self) -> Vec<f64> {
        match self {
            GateKind::RX(t)
            | GateKind::RY(t)
            | GateKind::RZ(t)
            | GateKind::PhaseShift(t)
            | GateKind::CRX(t)
            | GateKind::CRY(t)
            | GateKind::CRZ(t)
            | GateKind::MultiRZ(t) => vec![*t],
            GateKind::PauliRot { theta, .. } => vec![*theta],
            GateKind::Rot(a, b, c) => vec![*a, *b, *c],
            _ => vec![],
        }
    }
}

/// A gate applied to wires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OperationRaw")]
pub struct Operation {
    kind: GateKind,
    wires: Wires,
}

#[derive(Deserialize)]
struct OperationRaw {
    kind: GateKind,
    wires: Wires,
}

impl TryFrom<OperationRaw> for Operation {
    type Error = IrError;

    fn try_from(raw: OperationRaw) -> IrResult<Self> {
        Operation::new(raw.kind, raw.wires)
    }
}

impl Operation {
    /// Create an operation, checking the wire count and gate-specific arguments.
    pub fn new(kind: GateKind, wires: Wires) -> IrResult<Self> {
        match &kind {
            GateKind::PauliRot { word, .. } => {
                if word.chars().count() != wires.len()
                    || !word.chars().all(|c| matches!(c, 'I' | 'X' | 'Y' | 'Z'))
                {
                    return Err(IrError::InvalidPauliWord {
                        word: word.clone(),
                        wires: wires.len(),
                    });
                }
            }
            GateKind::BasisState(bits) if bits.iter().any(|b| *b > 1) => {
                return Err(IrError::InvalidBasisState(bits.clone()));
            }
            _ => {}
        }
        let expected = kind.num_wires();
        let valid = match expected {
            Some(n) => n == wires.len(),
            None => !wires.is_empty(),
        };
        if !valid {
            return Err(IrError::WireCountMismatch {
                name: kind.name().into(),
                expected: expected.unwrap_or(1),
                got: wires.len(),
            });
        }
        Ok(Self { kind, wires })
    }

    /// The gate.
    pub fn kind(&self) -> &GateKind {
        &self.kind
    }

    /// The wires acted on.
    pub fn wires(&self) -> &Wires {
        &self.wires
    }

    /// Name of the gate.
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Parameters of the gate.
    pub fn params(&self) -> Vec<f64> {
        self.kind.params()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())?;
        let params = self.params();
        if !params.is_empty() {
            let p: Vec<String> = params.iter().map(|p| format!("{p:.4}")).collect();
            write!(f, "({})", p.join(", "))?;
        }
        if let GateKind::PauliRot { word, .. } = &self.kind {
            write!(f, "[{word}]")?;
        }
        write!(f, " {}", self.wires)
    }
}
