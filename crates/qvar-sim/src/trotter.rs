//! Trotter-Suzuki product-formula time evolution.
//!
//! Approximates `exp(-i H t)` by splitting the evolution into `n` slices,
//! each evolved exactly under each term in sequence.
//!
//! # First-order Trotter (Lie-Trotter)
//!
//!   exp(-i H t) ≈ [∏_k exp(-i c_k P_k t/n)]^n
//!
//! Each factor is a `PauliRot(θ_k, P_k)` with `θ_k = 2·t·c_k/n`, since
//! `PauliRot(θ, P) = exp(-i θ/2 P)`. Error: O(t² / n).
//!
//! # Second-order Trotter (Suzuki-Trotter)
//!
//!   exp(-i H t) ≈ [S₂(t/n)]^n
//!   S₂(τ) = [∏_k exp(-i c_k P_k τ/2)] · [∏_k exp(-i c_{n-k} P_{n-k} τ/2)]
//!
//! Error: O(t³ / n²).

use qvar_ir::{Hamiltonian, QuantumTape, Wire, Wires};
use tracing::debug;

use crate::error::{SimError, SimResult};

/// One Pauli rotation of a Trotter slice.
#[derive(Debug, Clone, PartialEq)]
pub struct PauliRotation {
    /// Rotation angle for a full slice.
    pub theta: f64,
    /// Pauli word, one letter per wire.
    pub word: String,
    /// Wires the word acts on.
    pub wires: Wires,
}

/// Approximate time evolution under a Pauli-word Hamiltonian.
#[derive(Debug, Clone)]
pub struct ApproxTimeEvolution {
    hamiltonian: Hamiltonian,
    /// Total evolution time t.
    time: f64,
    /// Number of Trotter slices.
    n: usize,
    /// Template wires; term wire `i` is placed on `wires[i]`.
    wires: Option<Wires>,
}

impl ApproxTimeEvolution {
    /// Construct a time-evolution template.
    ///
    /// # Arguments
    /// * `hamiltonian` — the Hamiltonian H = Σ c_k P_k, every term a Pauli word
    /// * `time`        — total evolution time
    /// * `n`           — number of Trotter slices (higher → more accurate)
    pub fn new(hamiltonian: Hamiltonian, time: f64, n: usize) -> Self {
        Self {
            hamiltonian,
            time,
            n,
            wires: None,
        }
    }

    /// Place the template on explicit wires.
    ///
    /// Term wires are then read as positions into `wires`. By default term
    /// wires are used as they are.
    #[must_use]
    pub fn with_wires(mut self, wires: Wires) -> Self {
        self.wires = Some(wires);
        self
    }

    /// The Hamiltonian being evolved under.
    pub fn hamiltonian(&self) -> &Hamiltonian {
        &self.hamiltonian
    }

    /// The rotations making up one Trotter slice, in term order.
    ///
    /// All-identity terms contribute only a global phase and are skipped.
    pub fn rotations(&self) -> SimResult<Vec<PauliRotation>> {
        self.validate()?;
        let slice = self.n as f64;
        let mut out = Vec::with_capacity(self.hamiltonian.len());
        for (coeff, term) in self.hamiltonian.terms() {
            let word = term
                .pauli_word()
                .ok_or_else(|| SimError::NonPauliTerm(term.names().join(" @ ")))?;
            if word.chars().all(|c| c == 'I') {
                continue;
            }
            out.push(PauliRotation {
                theta: 2.0 * self.time * coeff / slice,
                word,
                wires: self.place(&term.wires())?,
            });
        }
        Ok(out)
    }

    /// Append `n` first-order Trotter slices to `tape`.
    pub fn apply(&self, tape: &mut QuantumTape) -> SimResult<()> {
        let rotations = self.rotations()?;
        debug!(
            n_terms = self.hamiltonian.len(),
            n_rotations = rotations.len(),
            n_steps = self.n,
            "applying first-order Trotter evolution"
        );
        for _ in 0..self.n {
            for rot in &rotations {
                tape.pauli_rot(rot.theta, rot.word.as_str(), &rot.wires)?;
            }
        }
        Ok(())
    }

    /// Append `n` symmetric second-order slices to `tape`.
    ///
    /// Each slice is a forward half-step followed by a reverse half-step.
    pub fn apply_second_order(&self, tape: &mut QuantumTape) -> SimResult<()> {
        let rotations = self.rotations()?;
        debug!(
            n_terms = self.hamiltonian.len(),
            n_rotations = rotations.len(),
            n_steps = self.n,
            "applying second-order Trotter evolution"
        );
        for _ in 0..self.n {
            for rot in rotations.iter().chain(rotations.iter().rev()) {
                tape.pauli_rot(rot.theta / 2.0, rot.word.as_str(), &rot.wires)?;
            }
        }
        Ok(())
    }

    /// A fresh tape holding the first-order evolution.
    pub fn first_order(&self) -> SimResult<QuantumTape> {
        let mut tape = QuantumTape::new();
        self.apply(&mut tape)?;
        Ok(tape)
    }

    /// A fresh tape holding the second-order evolution.
    pub fn second_order(&self) -> SimResult<QuantumTape> {
        let mut tape = QuantumTape::new();
        self.apply_second_order(&mut tape)?;
        Ok(tape)
    }

    fn validate(&self) -> SimResult<()> {
        if self.hamiltonian.is_empty() {
            return Err(SimError::EmptyHamiltonian);
        }
        if self.n == 0 {
            return Err(SimError::InvalidSteps(0));
        }
        Ok(())
    }

    fn place(&self, term_wires: &Wires) -> SimResult<Wires> {
        let Some(wires) = &self.wires else {
            return Ok(term_wires.clone());
        };
        let placed = term_wires
            .iter()
            .map(|w: Wire| {
                wires.get(w.0 as usize).ok_or(SimError::WireOutOfRange {
                    wire: w,
                    n_wires: wires.len(),
                })
            })
            .collect::<SimResult<Vec<_>>>()?;
        Ok(Wires::new(placed)?)
    }
}
