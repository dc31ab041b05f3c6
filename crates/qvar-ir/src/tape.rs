//! Quantum tapes: recorded operations followed by measurements.
//!
//! A [`QuantumTape`] is what a device executes. It is built with a fluent
//! API whose methods validate their arguments and return
//! `IrResult<&mut Self>`:
//!
//! ```rust
//! use qvar_ir::{Observable, QuantumTape};
//!
//! let mut tape = QuantumTape::new();
//! tape.h(0).unwrap().cnot(0, 1).unwrap().rx(0.5, 1).unwrap();
//! tape.expval(Observable::pauli_z(0).tensor(Observable::pauli_z(1)).unwrap());
//! assert_eq!(tape.operations().len(), 3);
//! assert_eq!(tape.num_params(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::IrResult;
use crate::hamiltonian::Hamiltonian;
use crate::observable::Tensor;
use crate::operation::{GateKind, Operation};
use crate::wires::{Wire, Wires};

/// A measurement process at the end of a tape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Measurement {
    /// Expectation value of an observable.
    Expval(Tensor),
    /// Expectation value of a Hamiltonian.
    ExpvalHamiltonian(Hamiltonian),
    /// Variance of an observable.
    Var(Tensor),
    /// Computational-basis probabilities; empty wires means all device wires.
    Probs(Wires),
}

impl Measurement {
    /// Wires the measurement acts on.
    pub fn wires(&self) -> Wires {
        match self {
            Measurement::Expval(t) | Measurement::Var(t) => t.wires(),
            Measurement::ExpvalHamiltonian(h) => h.wires(),
            Measurement::Probs(w) => w.clone(),
        }
    }

    /// Number of values the measurement contributes to a flattened result.
    pub fn num_outputs(&self, device_wires: &Wires) -> usize {
        match self {
            Measurement::Probs(w) if w.is_empty() => 1 << device_wires.len(),
            Measurement::Probs(w) => 1 << w.len(),
            _ => 1,
        }
    }

    fn label(&self) -> String {
        match self {
            Measurement::Expval(t) => format!("⟨{t}⟩"),
            Measurement::ExpvalHamiltonian(_) => "⟨𝓗⟩".into(),
            Measurement::Var(t) => format!("Var[{t}]"),
            Measurement::Probs(_) => "Probs".into(),
        }
    }
}

/// A recorded sequence of operations and the measurements made afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuantumTape {
    operations: Vec<Operation>,
    measurements: Vec<Measurement>,
}

impl QuantumTape {
    /// Create an empty tape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tape from parts.
    pub fn from_parts(operations: Vec<Operation>, measurements: Vec<Measurement>) -> Self {
        Self {
            operations,
            measurements,
        }
    }

    /// Copy of this tape's operations with a different set of measurements.
    pub fn with_measurements(&self, measurements: Vec<Measurement>) -> Self {
        Self {
            operations: self.operations.clone(),
            measurements,
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Append a validated operation.
    pub fn push(&mut self, op: Operation) -> &mut Self {
        self.operations.push(op);
        self
    }

    /// Append a gate on the given wires.
    pub fn apply<W: Into<Wire>>(
        &mut self,
        kind: GateKind,
        wires: impl IntoIterator<Item = W>,
    ) -> IrResult<&mut Self> {
        let op = Operation::new(kind, Wires::new(wires)?)?;
        Ok(self.push(op))
    }

    /// Append a Hadamard gate.
    pub fn h(&mut self, wire: impl Into<Wire>) -> IrResult<&mut Self> {
        self.apply(GateKind::Hadamard, [wire.into()])
    }

    /// Append a Pauli-X gate.
    pub fn x(&mut self, wire: impl Into<Wire>) -> IrResult<&mut Self> {
        self.apply(GateKind::PauliX, [wire.into()])
    }

    /// Append a Pauli-Y gate.
    pub fn y(&mut self, wire: impl Into<Wire>) -> IrResult<&mut Self> {
        self.apply(GateKind::PauliY, [wire.into()])
    }

    /// Append a Pauli-Z gate.
    pub fn z(&mut self, wire: impl Into<Wire>) -> IrResult<&mut Self> {
        self.apply(GateKind::PauliZ, [wire.into()])
    }

    /// Append an RX rotation.
    pub fn rx(&mut self, theta: f64, wire: impl Into<Wire>) -> IrResult<&mut Self> {
        self.apply(GateKind::RX(theta), [wire.into()])
    }

    /// Append an RY rotation.
    pub fn ry(&mut self, theta: f64, wire: impl Into<Wire>) -> IrResult<&mut Self> {
        self.apply(GateKind::RY(theta), [wire.into()])
    }

    /// Append an RZ rotation.
    pub fn rz(&mut self, theta: f64, wire: impl Into<Wire>) -> IrResult<&mut Self> {
        self.apply(GateKind::RZ(theta), [wire.into()])
    }

    /// Append a general `Rot(φ, θ, ω)` rotation.
    pub fn rot(&mut self, phi: f64, theta: f64, omega: f64, wire: impl Into<Wire>) -> IrResult<&mut Self> {
        self.apply(GateKind::Rot(phi, theta, omega), [wire.into()])
    }

    /// Append a CNOT gate.
    pub fn cnot(&mut self, control: impl Into<Wire>, target: impl Into<Wire>) -> IrResult<&mut Self> {
        self.apply(GateKind::CNOT, [control.into(), target.into()])
    }

    /// Append a CZ gate.
    pub fn cz(&mut self, control: impl Into<Wire>, target: impl Into<Wire>) -> IrResult<&mut Self> {
        self.apply(GateKind::CZ, [control.into(), target.into()])
    }

    /// Append a Pauli rotation `exp(-i θ/2 P)`.
    pub fn pauli_rot<W: Into<Wire>>(
        &mut self,
        theta: f64,
        word: impl Into<String>,
        wires: impl IntoIterator<Item = W>,
    ) -> IrResult<&mut Self> {
        self.apply(
            GateKind::PauliRot {
                theta,
                word: word.into(),
            },
            wires,
        )
    }

    /// Prepare a computational basis state.
    pub fn basis_state<W: Into<Wire>>(
        &mut self,
        bits: Vec<u8>,
        wires: impl IntoIterator<Item = W>,
    ) -> IrResult<&mut Self> {
        self.apply(GateKind::BasisState(bits), wires)
    }

    // =========================================================================
    // Measurements
    // =========================================================================

    /// Measure the expectation value of an observable.
    pub fn expval(&mut self, obs: impl Into<Tensor>) -> &mut Self {
        self.measurements.push(Measurement::Expval(obs.into()));
        self
    }

    /// Measure the expectation value of a Hamiltonian.
    pub fn expval_hamiltonian(&mut self, h: Hamiltonian) -> &mut Self {
        self.measurements.push(Measurement::ExpvalHamiltonian(h));
        self
    }

    /// Measure the variance of an observable.
    pub fn var(&mut self, obs: impl Into<Tensor>) -> &mut Self {
        self.measurements.push(Measurement::Var(obs.into()));
        self
    }

    /// Measure computational-basis probabilities.
    pub fn probs<W: Into<Wire>>(&mut self, wires: impl IntoIterator<Item = W>) -> IrResult<&mut Self> {
        self.measurements.push(Measurement::Probs(Wires::new(wires)?));
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Recorded operations.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Recorded measurements.
    pub fn measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    /// Every wire touched by an operation or measurement, in first-use order.
    pub fn wires(&self) -> Wires {
        let ops = self
            .operations
            .iter()
            .fold(Wires::empty(), |acc, op| acc.union(op.wires()));
        self.measurements
            .iter()
            .fold(ops, |acc, m| acc.union(&m.wires()))
    }

    /// Total number of gate parameters.
    pub fn num_params(&self) -> usize {
        self.operations.iter().map(|op| op.params().len()).sum()
    }

    /// Text drawing, one line per wire, operations left to right.
    pub fn draw(&self) -> String {
        let mut wires: Vec<Wire> = self.wires().iter().collect();
        wires.sort();
        let mut rows: Vec<String> = wires.iter().map(|w| format!("{w:>2}: ")).collect();

        for op in &self.operations {
            let cells: Vec<String> = wires.iter().map(|w| cell_label(op, *w)).collect();
            let width = cells.iter().map(|c| c.chars().count()).max().unwrap_or(0);
            for (row, cell) in rows.iter_mut().zip(cells) {
                let pad = width - cell.chars().count();
                row.push_str("──");
                row.push_str(&cell);
                row.push_str(&"─".repeat(pad));
            }
        }

        for (row, w) in rows.iter_mut().zip(&wires) {
            row.push_str("──┤");
            let labels: Vec<String> = self
                .measurements
                .iter()
                .filter(|m| match m {
                    Measurement::Probs(ws) if ws.is_empty() => true,
                    m => m.wires().contains(*w),
                })
                .map(Measurement::label)
                .collect();
            if !labels.is_empty() {
                row.push(' ');
                row.push_str(&labels.join(" "));
            }
        }
        rows.join("\n")
    }
}

fn cell_label(op: &Operation, wire: Wire) -> String {
    let Some(pos) = op.wires().index_of(wire) else {
        return String::new();
    };
    match op.kind() {
        GateKind::CNOT if pos == 0 => "●".into(),
        GateKind::CNOT => "X".into(),
        GateKind::CZ => "●".into(),
        GateKind::SWAP => "×".into(),
        GateKind::CRX(t) | GateKind::CRY(t) | GateKind::CRZ(t) if pos == 1 => {
            format!("{}({t:.2})", &op.name()[1..])
        }
        GateKind::CRX(_) | GateKind::CRY(_) | GateKind::CRZ(_) => "●".into(),
        GateKind::PauliRot { theta, word } => {
            let letter: String = word.chars().skip(pos).take(1).collect();
            format!("R{letter}({theta:.2})")
        }
        GateKind::BasisState(bits) => format!("|{}⟩", bits[pos]),
        GateKind::Hadamard => "H".into(),
        GateKind::PauliX => "X".into(),
        GateKind::PauliY => "Y".into(),
        GateKind::PauliZ => "Z".into(),
        kind => {
            let params = kind.params();
            if params.is_empty() {
                kind.name().to_string()
            } else {
                let p: Vec<String> = params.iter().map(|p| format!("{p:.2}")).collect();
                format!("{}({})", kind.name(), p.join(","))
            }
        }
    }
}
