//! The `default.qubit` device.

use std::cell::{Cell, RefCell};
use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, trace};

use qvar_ir::{GateKind, Measurement, QuantumTape, Tensor, Wires};

use crate::error::{DeviceError, DeviceResult};
use crate::statevector::{Statevector, marginalize};

/// Largest register the dense simulator accepts.
pub const MAX_WIRES: usize = 24;

/// Something that can execute quantum tapes.
///
/// Results are flattened: one value per expectation value or variance and
/// `2^k` values per `probs` measurement on `k` wires, in measurement order.
pub trait Device {
    /// Device name.
    fn name(&self) -> &str;

    /// Wires the device provides.
    fn wires(&self) -> &Wires;

    /// Finite shots, or `None` for exact results.
    fn shots(&self) -> Option<u32>;

    /// Execute a single tape.
    fn execute(&self, tape: &QuantumTape) -> DeviceResult<Vec<f64>>;

    /// Execute several tapes in order.
    fn batch_execute(&self, tapes: &[QuantumTape]) -> DeviceResult<Vec<Vec<f64>>> {
        tapes.iter().map(|t| self.execute(t)).collect()
    }

    /// Number of tapes executed so far.
    fn num_executions(&self) -> usize;
}

/// Dense statevector device.
///
/// Wire labels are mapped to positions in the device wire list; the first
/// device wire is the most significant bit of a basis-state index.
#[derive(Debug)]
pub struct DefaultQubit {
    wires: Wires,
    shots: Option<u32>,
    rng: RefCell<StdRng>,
    executions: Cell<usize>,
}

impl DefaultQubit {
    /// Create an analytic device on `wires`.
    pub fn new(wires: Wires) -> DeviceResult<Self> {
        if wires.len() > MAX_WIRES {
            return Err(DeviceError::TooManyWires {
                max: MAX_WIRES,
                got: wires.len(),
            });
        }
        Ok(Self {
            wires,
            shots: None,
            rng: RefCell::new(StdRng::from_entropy()),
            executions: Cell::new(0),
        })
    }

    /// Create an analytic device on wires `0..n`.
    pub fn with_num_wires(n: usize) -> DeviceResult<Self> {
        Self::new(Wires::range(n))
    }

    /// Estimate results from `shots` samples; `None` gives exact results.
    pub fn with_shots(mut self, shots: Option<u32>) -> DeviceResult<Self> {
        if shots == Some(0) {
            return Err(DeviceError::InvalidShots);
        }
        self.shots = shots;
        Ok(self)
    }

    /// Seed the sampling RNG.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        self.rng.replace(StdRng::seed_from_u64(seed));
        self
    }

    fn positions(&self, wires: &Wires) -> DeviceResult<Vec<usize>> {
        wires
            .iter()
            .map(|w| self.wires.index_of(w).ok_or(DeviceError::UnknownWire(w)))
            .collect()
    }

    /// Run the tape's operations from `|0…0⟩`.
    pub fn run(&self, tape: &QuantumTape) -> DeviceResult<Statevector> {
        let mut sv = Statevector::new(self.wires.len());
        for (i, op) in tape.operations().iter().enumerate() {
            if matches!(op.kind(), GateKind::BasisState(_)) && i > 0 {
                return Err(DeviceError::UnsupportedOperation(format!(
                    "{} after other operations",
                    op.name()
                )));
            }
            let qubits = self.positions(op.wires())?;
            sv.apply_gate(op.kind(), &qubits);
        }
        Ok(sv)
    }

    fn expval(&self, sv: &Statevector, obs: &Tensor) -> DeviceResult<f64> {
        match self.shots {
            None => {
                let qubits = self.positions(&obs.wires())?;
                Ok(sv.expectation(&obs.matrix(), &qubits))
            }
            Some(shots) => {
                let eigvals = self.sample_pauli_word(sv, obs, shots)?;
                Ok(eigvals.iter().sum::<f64>() / f64::from(shots))
            }
        }
    }

    fn var(&self, sv: &Statevector, obs: &Tensor) -> DeviceResult<f64> {
        match self.shots {
            None => {
                let qubits = self.positions(&obs.wires())?;
                let m = obs.matrix();
                let squared = m.dot(&m);
                let mean = sv.expectation(&m, &qubits);
                Ok(sv.expectation(&squared, &qubits) - mean * mean)
            }
            Some(shots) => {
                let eigvals = self.sample_pauli_word(sv, obs, shots)?;
                let n = f64::from(shots);
                let mean = eigvals.iter().sum::<f64>() / n;
                let mean_sq = eigvals.iter().map(|e| e * e).sum::<f64>() / n;
                Ok(mean_sq - mean * mean)
            }
        }
    }

    /// Sample ±1 eigenvalues of a Pauli word.
    fn sample_pauli_word(
        &self,
        sv: &Statevector,
        obs: &Tensor,
        shots: u32,
    ) -> DeviceResult<Vec<f64>> {
        let word = obs
            .pauli_word()
            .ok_or_else(|| DeviceError::SamplingUnsupported(obs.to_string()))?;
        let qubits = self.positions(&obs.wires())?;
        let mut rotated = sv.clone();
        rotated.diagonalize_pauli_word(&qubits, &word);

        let active: Vec<usize> = qubits
            .iter()
            .zip(word.chars())
            .filter(|(_, c)| *c != 'I')
            .map(|(q, _)| *q)
            .collect();
        let samples = rotated.sample(shots, &mut *self.rng.borrow_mut())?;
        Ok(samples
            .into_iter()
            .map(|s| {
                let parity = rotated
                    .outcome_bits(s, &active)
                    .iter()
                    .filter(|b| **b == 1)
                    .count();
                if parity % 2 == 0 { 1.0 } else { -1.0 }
            })
            .collect())
    }

    fn probs(&self, sv: &Statevector, wires: &Wires) -> DeviceResult<Vec<f64>> {
        let wires = if wires.is_empty() { &self.wires } else { wires };
        let qubits = self.positions(wires)?;
        match self.shots {
            None => Ok(sv.marginal_probabilities(&qubits)),
            Some(shots) => {
                let samples = sv.sample(shots, &mut *self.rng.borrow_mut())?;
                let mut counts = vec![0.0; 1 << self.wires.len()];
                for s in samples {
                    counts[s] += 1.0;
                }
                let freq: Vec<f64> = counts.iter().map(|c| c / f64::from(shots)).collect();
                Ok(marginalize(&freq, self.wires.len(), &qubits))
            }
        }
    }
}

impl Device for DefaultQubit {
    fn name(&self) -> &str {
        "default.qubit"
    }

    fn wires(&self) -> &Wires {
        &self.wires
    }

    fn shots(&self) -> Option<u32> {
        self.shots
    }

    fn execute(&self, tape: &QuantumTape) -> DeviceResult<Vec<f64>> {
        let start = Instant::now();
        let sv = self.run(tape)?;

        let mut results = Vec::new();
        for m in tape.measurements() {
            match m {
                Measurement::Expval(obs) => results.push(self.expval(&sv, obs)?),
                Measurement::Var(obs) => results.push(self.var(&sv, obs)?),
                Measurement::ExpvalHamiltonian(h) => {
                    let mut total = 0.0;
                    for (coeff, op) in h.terms() {
                        total += coeff * self.expval(&sv, op)?;
                    }
                    results.push(total);
                }
                Measurement::Probs(wires) => results.extend(self.probs(&sv, wires)?),
            }
        }

        self.executions.set(self.executions.get() + 1);
        trace!(
            n_ops = tape.operations().len(),
            n_results = results.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "executed tape"
        );
        Ok(results)
    }

    fn batch_execute(&self, tapes: &[QuantumTape]) -> DeviceResult<Vec<Vec<f64>>> {
        debug!(n_tapes = tapes.len(), shots = ?self.shots, "batch execute");
        tapes.iter().map(|t| self.execute(t)).collect()
    }

    fn num_executions(&self) -> usize {
        self.executions.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qvar_ir::{Hamiltonian, Observable};

    #[test]
    fn test_unknown_wire() {
        let dev = DefaultQubit::with_num_wires(2).unwrap();
        let mut tape = QuantumTape::new();
        tape.h(5).unwrap();
        assert!(matches!(dev.execute(&tape), Err(DeviceError::UnknownWire(_))));
    }

    #[test]
    fn test_expval_and_var() {
        let dev = DefaultQubit::with_num_wires(1).unwrap();
        let mut tape = QuantumTape::new();
        tape.h(0).unwrap();
        tape.expval(Observable::pauli_x(0));
        tape.var(Observable::pauli_z(0));
        let res = dev.execute(&tape).unwrap();
        assert!((res[0] - 1.0).abs() < 1e-12);
        assert!((res[1] - 1.0).abs() < 1e-12);
        assert_eq!(dev.num_executions(), 1);
    }

    #[test]
    fn test_hamiltonian_expval() {
        let dev = DefaultQubit::with_num_wires(2).unwrap();
        let mut tape = QuantumTape::new();
        tape.x(1).unwrap();
        tape.expval_hamiltonian(
            Hamiltonian::term(2.0, Observable::pauli_z(0))
                + Hamiltonian::term(0.5, Observable::pauli_z(1)),
        );
        let res = dev.execute(&tape).unwrap();
        assert!((res[0] - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_probs_flattened() {
        let dev = DefaultQubit::with_num_wires(2).unwrap();
        let mut tape = QuantumTape::new();
        tape.x(0).unwrap();
        tape.probs(Vec::<u32>::new()).unwrap();
        tape.probs([0u32]).unwrap();
        let res = dev.execute(&tape).unwrap();
        assert_eq!(res, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_sampling_rejects_hermitian() {
        let dev = DefaultQubit::with_num_wires(1)
            .unwrap()
            .with_shots(Some(10))
            .unwrap();
        let mut tape = QuantumTape::new();
        tape.expval(Observable::hadamard(0));
        assert!(matches!(
            dev.execute(&tape),
            Err(DeviceError::SamplingUnsupported(_))
        ));
    }

    #[test]
    fn test_sampling_nan_state_is_an_error() {
        let dev = DefaultQubit::with_num_wires(1)
            .unwrap()
            .with_shots(Some(100))
            .unwrap()
            .with_seed(1);
        let mut tape = QuantumTape::new();
        tape.rx(f64::NAN, 0).unwrap();
        tape.expval(Observable::pauli_z(0));
        assert!(matches!(dev.execute(&tape), Err(DeviceError::InvalidState(_))));

        let mut tape = QuantumTape::new();
        tape.rx(f64::NAN, 0).unwrap();
        tape.probs([0u32]).unwrap();
        assert!(matches!(dev.execute(&tape), Err(DeviceError::InvalidState(_))));
    }

    #[test]
    fn test_zero_shots_rejected() {
        let dev = DefaultQubit::with_num_wires(1).unwrap();
        assert!(matches!(dev.with_shots(Some(0)), Err(DeviceError::InvalidShots)));
    }

    #[test]
    fn test_basis_state_must_come_first() {
        let dev = DefaultQubit::with_num_wires(2).unwrap();
        let mut tape = QuantumTape::new();
        tape.h(0).unwrap().basis_state(vec![1, 0], [0, 1]).unwrap();
        assert!(matches!(
            dev.execute(&tape),
            Err(DeviceError::UnsupportedOperation(_))
        ));
    }
}
