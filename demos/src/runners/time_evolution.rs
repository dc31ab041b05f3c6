//! Trotterised time-evolution runner.

use anyhow::Result;
use ndarray::array;
use qvar_adapter_sim::Device;
use qvar_ir::{Hamiltonian, Observable, Tensor, Wires};
use qvar_sim::ApproxTimeEvolution;
use tracing::info;

use crate::config::DemoConfig;

/// Result of a time-evolution run.
#[derive(Debug, Clone)]
pub struct TimeEvolutionResult {
    /// The Hamiltonian after decomposition into Pauli words.
    pub decomposed: Hamiltonian,
    /// `⟨Z_i⟩` for every wire.
    pub expvals: Vec<f64>,
    /// Text drawing of the circuit.
    pub drawing: String,
}

/// Evolves `|0…0⟩` under a Hamiltonian and measures `Z` on every wire.
#[derive(Debug, Clone)]
pub struct TimeEvolutionRunner {
    hamiltonian: Hamiltonian,
    time: f64,
    steps: usize,
    n_wires: usize,
}

impl TimeEvolutionRunner {
    /// Create a runner.
    pub fn new(hamiltonian: Hamiltonian, time: f64, steps: usize, n_wires: usize) -> Self {
        Self {
            hamiltonian,
            time,
            steps,
            n_wires,
        }
    }

    /// `H = X₀ ⊗ A₁ + X₀` with `A = [[1, 1], [1, 1]]`, `t = 2`, three steps.
    pub fn hermitian_example() -> Result<Self> {
        let a = Observable::hermitian_real(array![[1.0, 1.0], [1.0, 1.0]], [1u32])?;
        let h = Hamiltonian::new(
            vec![1.0, 1.0],
            vec![
                Observable::pauli_x(0).tensor(a)?,
                Tensor::from(Observable::pauli_x(0)),
            ],
        )?;
        Ok(Self::new(h, 2.0, 3, 2))
    }

    /// Decompose, evolve and measure.
    pub fn run(&self, config: &DemoConfig) -> Result<TimeEvolutionResult> {
        let decomposed = self.hamiltonian.decompose()?;
        info!(
            terms = decomposed.len(),
            time = self.time,
            steps = self.steps,
            "running time evolution"
        );
        let mut tape = ApproxTimeEvolution::new(decomposed.clone(), self.time, self.steps)
            .first_order()?;
        for w in Wires::range(self.n_wires).iter() {
            tape.expval(Observable::pauli_z(w));
        }
        let dev = config.build_device(Wires::range(self.n_wires))?;
        let expvals = dev.execute(&tape)?;
        Ok(TimeEvolutionResult {
            decomposed,
            expvals,
            drawing: tape.draw(),
        })
    }
}
