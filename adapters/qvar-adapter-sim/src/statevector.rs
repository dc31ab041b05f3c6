//! Statevector simulation engine.
//!
//! Qubit `q` is the `q`-th device wire and corresponds to bit `n - 1 - q` of
//! an amplitude index, so the first device wire is the most significant bit.

use ndarray::Array2;
use num_complex::Complex64;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use std::f64::consts::PI;

use qvar_ir::GateKind;

use crate::error::{DeviceError, DeviceResult};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// A statevector representing a quantum state.
#[derive(Debug, Clone)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![ZERO; size];
        amplitudes[0] = ONE;
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    #[inline]
    fn mask(&self, qubit: usize) -> usize {
        1 << (self.num_qubits - 1 - qubit)
    }

    /// Apply a gate to the given qubit positions.
    pub fn apply_gate(&mut self, gate: &GateKind, qubits: &[usize]) {
        match gate {
            // Single-qubit gates
            GateKind::PauliX => self.apply_x(qubits[0]),
            GateKind::PauliY => self.apply_y(qubits[0]),
            GateKind::PauliZ => self.apply_z(qubits[0]),
            GateKind::Hadamard => self.apply_h(qubits[0]),
            GateKind::S => self.apply_phase(qubits[0], PI / 2.0),
            GateKind::Sdg => self.apply_phase(qubits[0], -PI / 2.0),
            GateKind::T => self.apply_phase(qubits[0], PI / 4.0),
            GateKind::RX(t) => self.apply_rx(qubits[0], *t),
            GateKind::RY(t) => self.apply_ry(qubits[0], *t),
            GateKind::RZ(t) => self.apply_rz(qubits[0], *t),
            GateKind::PhaseShift(t) => self.apply_phase(qubits[0], *t),
            GateKind::Rot(phi, theta, omega) => {
                // Rot(φ, θ, ω) = RZ(ω) · RY(θ) · RZ(φ)
                self.apply_rz(qubits[0], *phi);
                self.apply_ry(qubits[0], *theta);
                self.apply_rz(qubits[0], *omega);
            }

            // Two-qubit gates
            GateKind::CNOT => self.apply_cx(qubits[0], qubits[1]),
            GateKind::CZ => self.apply_cz(qubits[0], qubits[1]),
            GateKind::SWAP => self.apply_swap(qubits[0], qubits[1]),
            GateKind::CRX(t) => self.apply_controlled(qubits[0], qubits[1], rx_matrix(*t)),
            GateKind::CRY(t) => self.apply_controlled(qubits[0], qubits[1], ry_matrix(*t)),
            GateKind::CRZ(t) => self.apply_controlled(qubits[0], qubits[1], rz_matrix(*t)),

            // Multi-qubit gates
            GateKind::MultiRZ(t) => self.apply_multi_rz(qubits, *t),
            GateKind::PauliRot { theta, word } => self.apply_pauli_rot(qubits, *theta, word),
            GateKind::BasisState(bits) => self.prepare_basis_state(qubits, bits),
        }
    }

    // =========================================================================
    // Single-qubit gate implementations
    // =========================================================================

    fn apply_x(&mut self, qubit: usize) {
        let mask = self.mask(qubit);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_y(&mut self, qubit: usize) {
        let mask = self.mask(qubit);
        let i_val = Complex64::new(0.0, 1.0);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -i_val * self.amplitudes[j];
                self.amplitudes[j] = i_val * tmp;
            }
        }
    }

    fn apply_z(&mut self, qubit: usize) {
        let mask = self.mask(qubit);
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = self.mask(qubit);
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_phase(&mut self, qubit: usize, theta: f64) {
        let mask = self.mask(qubit);
        let phase = Complex64::from_polar(1.0, theta);
        for i in 0..(1 << self.num_qubits) {
            if i & mask != 0 {
                self.amplitudes[i] *= phase;
            }
        }
    }

    fn apply_rx(&mut self, qubit: usize, theta: f64) {
        self.apply_single(qubit, rx_matrix(theta));
    }

    fn apply_ry(&mut self, qubit: usize, theta: f64) {
        self.apply_single(qubit, ry_matrix(theta));
    }

    fn apply_rz(&mut self, qubit: usize, theta: f64) {
        let mask = self.mask(qubit);
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                self.amplitudes[i] *= phase_0;
            } else {
                self.amplitudes[i] *= phase_1;
            }
        }
    }

    /// Apply a 2×2 matrix `[[a, b], [c, d]]` to one qubit.
    fn apply_single(&mut self, qubit: usize, m: [Complex64; 4]) {
        let mask = self.mask(qubit);
        for i in 0..(1 << self.num_qubits) {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m[0] * a + m[1] * b;
                self.amplitudes[j] = m[2] * a + m[3] * b;
            }
        }
    }

    // =========================================================================
    // Two-qubit gate implementations
    // =========================================================================

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = self.mask(control);
        let tgt_mask = self.mask(target);
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    fn apply_cz(&mut self, control: usize, target: usize) {
        let ctrl_mask = self.mask(control);
        let tgt_mask = self.mask(target);
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask != 0) {
                self.amplitudes[i] = -self.amplitudes[i];
            }
        }
    }

    fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = self.mask(q1);
        let mask2 = self.mask(q2);
        for i in 0..(1 << self.num_qubits) {
            let b1 = (i & mask1) != 0;
            let b2 = (i & mask2) != 0;
            if b1 && !b2 {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// Apply a 2×2 matrix to `target` when `control` is set.
    fn apply_controlled(&mut self, control: usize, target: usize, m: [Complex64; 4]) {
        let ctrl_mask = self.mask(control);
        let tgt_mask = self.mask(target);
        for i in 0..(1 << self.num_qubits) {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m[0] * a + m[1] * b;
                self.amplitudes[j] = m[2] * a + m[3] * b;
            }
        }
    }

    // =========================================================================
    // Multi-qubit gate implementations
    // =========================================================================

    fn apply_multi_rz(&mut self, qubits: &[usize], theta: f64) {
        let mask: usize = qubits.iter().map(|q| self.mask(*q)).sum();
        let even = Complex64::from_polar(1.0, -theta / 2.0);
        let odd = Complex64::from_polar(1.0, theta / 2.0);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i & mask).count_ones() % 2 == 0 {
                *amp *= even;
            } else {
                *amp *= odd;
            }
        }
    }

    /// `exp(-i θ/2 P) ψ = cos(θ/2) ψ - i sin(θ/2) P ψ`.
    fn apply_pauli_rot(&mut self, qubits: &[usize], theta: f64, word: &str) {
        let mut rotated = self.clone();
        rotated.apply_pauli_word(qubits, word);
        let c = (theta / 2.0).cos();
        let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());
        for (amp, p) in self.amplitudes.iter_mut().zip(&rotated.amplitudes) {
            *amp = c * *amp + neg_i_s * p;
        }
    }

    /// Apply the Pauli word `word` (one letter per qubit) as an operator.
    pub fn apply_pauli_word(&mut self, qubits: &[usize], word: &str) {
        for (q, letter) in qubits.iter().zip(word.chars()) {
            match letter {
                'X' => self.apply_x(*q),
                'Y' => self.apply_y(*q),
                'Z' => self.apply_z(*q),
                _ => {}
            }
        }
    }

    /// Rotate so that measuring in the computational basis measures `word`.
    pub fn diagonalize_pauli_word(&mut self, qubits: &[usize], word: &str) {
        for (q, letter) in qubits.iter().zip(word.chars()) {
            match letter {
                'X' => self.apply_h(*q),
                'Y' => {
                    self.apply_phase(*q, -PI / 2.0);
                    self.apply_h(*q);
                }
                _ => {}
            }
        }
    }

    fn prepare_basis_state(&mut self, qubits: &[usize], bits: &[u8]) {
        let index = qubits
            .iter()
            .zip(bits)
            .filter(|(_, b)| **b == 1)
            .map(|(q, _)| self.mask(*q))
            .sum::<usize>();
        self.amplitudes.fill(ZERO);
        self.amplitudes[index] = ONE;
    }

    /// Apply a `2^k × 2^k` matrix to `k` qubits; the first qubit is the most
    /// significant bit of the matrix index.
    pub fn apply_matrix(&mut self, m: &Array2<Complex64>, qubits: &[usize]) {
        let k = qubits.len();
        let masks: Vec<usize> = qubits.iter().map(|q| self.mask(*q)).collect();
        let all: usize = masks.iter().sum();
        let offset = |sub: usize| -> usize {
            masks
                .iter()
                .enumerate()
                .filter(|(pos, _)| (sub >> (k - 1 - pos)) & 1 == 1)
                .map(|(_, m)| *m)
                .sum()
        };
        let offsets: Vec<usize> = (0..1 << k).map(offset).collect();
        let mut local = vec![ZERO; 1 << k];
        for base in 0..(1 << self.num_qubits) {
            if base & all != 0 {
                continue;
            }
            for (slot, off) in local.iter_mut().zip(&offsets) {
                *slot = self.amplitudes[base | off];
            }
            for (r, off) in offsets.iter().enumerate() {
                self.amplitudes[base | off] = local
                    .iter()
                    .enumerate()
                    .map(|(c, a)| m[[r, c]] * a)
                    .sum();
            }
        }
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// `⟨ψ|φ⟩`.
    pub fn inner(&self, other: &Statevector) -> Complex64 {
        self.amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| a.conj() * b)
            .sum()
    }

    /// `⟨ψ|M|ψ⟩` for a matrix on the given qubits.
    pub fn expectation(&self, m: &Array2<Complex64>, qubits: &[usize]) -> f64 {
        let mut applied = self.clone();
        applied.apply_matrix(m, qubits);
        self.inner(&applied).re
    }

    /// Full probability distribution over basis states.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Marginal probabilities on `qubits`; the first qubit is the most
    /// significant bit of the result index.
    pub fn marginal_probabilities(&self, qubits: &[usize]) -> Vec<f64> {
        marginalize(&self.probabilities(), self.num_qubits, qubits)
    }

    /// Draw `shots` basis-state indices.
    ///
    /// Fails if the probabilities are not a valid distribution, e.g. after a
    /// gate with a NaN angle.
    pub fn sample<R: Rng + ?Sized>(&self, shots: u32, rng: &mut R) -> DeviceResult<Vec<usize>> {
        let dist = WeightedIndex::new(self.probabilities())
            .map_err(|e| DeviceError::InvalidState(e.to_string()))?;
        Ok((0..shots).map(|_| dist.sample(rng)).collect())
    }

    /// Convert a sampled index to its bits on `qubits`.
    pub fn outcome_bits(&self, outcome: usize, qubits: &[usize]) -> Vec<u8> {
        qubits
            .iter()
            .map(|q| u8::from(outcome & self.mask(*q) != 0))
            .collect()
    }
}

/// Sum a full distribution down to the given qubits.
pub fn marginalize(probs: &[f64], num_qubits: usize, qubits: &[usize]) -> Vec<f64> {
    let k = qubits.len();
    let mut out = vec![0.0; 1 << k];
    for (i, p) in probs.iter().enumerate() {
        let sub = qubits.iter().fold(0usize, |acc, q| {
            (acc << 1) | ((i >> (num_qubits - 1 - q)) & 1)
        });
        out[sub] += p;
    }
    out
}

fn rx_matrix(theta: f64) -> [Complex64; 4] {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let neg_i_s = Complex64::new(0.0, -(theta / 2.0).sin());
    [c, neg_i_s, neg_i_s, c]
}

fn ry_matrix(theta: f64) -> [Complex64; 4] {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new((theta / 2.0).sin(), 0.0);
    [c, -s, s, c]
}

fn rz_matrix(theta: f64) -> [Complex64; 4] {
    [
        Complex64::from_polar(1.0, -theta / 2.0),
        ZERO,
        ZERO,
        Complex64::from_polar(1.0, theta / 2.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use qvar_ir::matrix;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitudes[0], ONE));
        assert!(sv.amplitudes[1..].iter().all(|a| approx_eq(*a, ZERO)));
    }

    #[test]
    fn test_first_qubit_is_most_significant() {
        let mut sv = Statevector::new(2);
        sv.apply_x(0);
        assert!(approx_eq(sv.amplitudes[2], ONE));
    }

    #[test]
    fn test_bell_state() {
        let mut sv = Statevector::new(2);
        sv.apply_h(0);
        sv.apply_cx(0, 1);

        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        assert!(approx_eq(sv.amplitudes[0], Complex64::new(sqrt2_inv, 0.0)));
        assert!(approx_eq(sv.amplitudes[1], ZERO));
        assert!(approx_eq(sv.amplitudes[2], ZERO));
        assert!(approx_eq(sv.amplitudes[3], Complex64::new(sqrt2_inv, 0.0)));
    }

    #[test]
    fn test_pauli_rot_matches_rx() {
        let mut a = Statevector::new(1);
        let mut b = Statevector::new(1);
        a.apply_gate(&GateKind::PauliRot { theta: 0.7, word: "X".into() }, &[0]);
        b.apply_rx(0, 0.7);
        for (x, y) in a.amplitudes.iter().zip(&b.amplitudes) {
            assert!(approx_eq(*x, *y));
        }
    }

    #[test]
    fn test_multi_rz_matches_pauli_rot() {
        let mut a = Statevector::new(3);
        a.apply_h(0);
        a.apply_h(2);
        let mut b = a.clone();
        a.apply_multi_rz(&[0, 2], 1.1);
        b.apply_pauli_rot(&[0, 2], 1.1, "ZZ");
        for (x, y) in a.amplitudes.iter().zip(&b.amplitudes) {
            assert!(approx_eq(*x, *y));
        }
    }

    #[test]
    fn test_apply_matrix_matches_kernel() {
        let mut a = Statevector::new(3);
        a.apply_h(1);
        let mut b = a.clone();
        a.apply_matrix(&matrix::pauli_x(), &[2]);
        b.apply_x(2);
        assert_eq!(a.amplitudes, b.amplitudes);
    }

    #[test]
    fn test_expectation_and_marginals() {
        let mut sv = Statevector::new(2);
        sv.apply_x(1);
        assert!((sv.expectation(&matrix::pauli_z(), &[1]) + 1.0).abs() < 1e-12);
        assert!((sv.expectation(&matrix::pauli_z(), &[0]) - 1.0).abs() < 1e-12);
        assert_eq!(sv.marginal_probabilities(&[1]), vec![0.0, 1.0]);
        assert_eq!(sv.marginal_probabilities(&[1, 0]), vec![0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_sample_deterministic() {
        let mut sv = Statevector::new(1);
        sv.apply_x(0);
        let mut rng = StdRng::seed_from_u64(7);
        assert!(sv.sample(100, &mut rng).unwrap().iter().all(|s| *s == 1));
    }

    #[test]
    fn test_sample_rejects_nan_state() {
        let mut sv = Statevector::new(1);
        sv.apply_gate(&GateKind::RX(f64::NAN), &[0]);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            sv.sample(10, &mut rng),
            Err(DeviceError::InvalidState(_))
        ));
    }
}
