//! QAOA cost and mixer layers.
//!
//! A layer is a single Trotter step of the time evolution under its
//! Hamiltonian, with the layer parameter as the evolution time. Layers are
//! repeated `depth` times, alternating cost then mixer.

use qvar_ir::{Hamiltonian, QuantumTape, Wires};
use qvar_sim::{ApproxTimeEvolution, SimResult, layer};
use tracing::debug;

use crate::error::{QaoaError, QaoaResult};

/// One evolution `exp(-i · param · H)` applied as a single Trotter step.
#[derive(Debug, Clone)]
pub struct EvolutionLayer {
    hamiltonian: Hamiltonian,
    wires: Option<Wires>,
}

impl EvolutionLayer {
    fn new(hamiltonian: Hamiltonian) -> Self {
        Self {
            hamiltonian,
            wires: None,
        }
    }

    /// Read Hamiltonian wires as positions into `wires`.
    #[must_use]
    pub fn with_wires(mut self, wires: Wires) -> Self {
        self.wires = Some(wires);
        self
    }

    /// The generating Hamiltonian.
    pub fn hamiltonian(&self) -> &Hamiltonian {
        &self.hamiltonian
    }

    /// Append the layer with parameter `param` to `tape`.
    pub fn apply(&self, tape: &mut QuantumTape, param: f64) -> SimResult<()> {
        let mut evolution = ApproxTimeEvolution::new(self.hamiltonian.clone(), param, 1);
        if let Some(wires) = &self.wires {
            evolution = evolution.with_wires(wires.clone());
        }
        evolution.apply(tape)
    }
}

/// Cost layer `U_C(γ) = exp(-i γ H_C)`.
///
/// `H_C` must be diagonal in the computational basis, i.e. every factor of
/// every term is PauliZ or Identity.
pub fn cost_layer(hamiltonian: &Hamiltonian) -> QaoaResult<EvolutionLayer> {
    if !hamiltonian.ops().iter().all(|op| op.is_z_word()) {
        return Err(QaoaError::NotDiagonal);
    }
    Ok(EvolutionLayer::new(hamiltonian.clone()))
}

/// Mixer layer `U_M(α) = exp(-i α H_M)`.
pub fn mixer_layer(hamiltonian: &Hamiltonian) -> EvolutionLayer {
    EvolutionLayer::new(hamiltonian.clone())
}

/// `depth` alternating cost and mixer layers.
#[derive(Debug, Clone)]
pub struct QaoaCircuit {
    cost: EvolutionLayer,
    mixer: EvolutionLayer,
    depth: usize,
}

impl QaoaCircuit {
    /// Combine prepared layers.
    pub fn new(cost: EvolutionLayer, mixer: EvolutionLayer, depth: usize) -> Self {
        Self { cost, mixer, depth }
    }

    /// Build the layers from a cost and a mixer Hamiltonian.
    pub fn from_hamiltonians(
        cost: &Hamiltonian,
        mixer: &Hamiltonian,
        depth: usize,
    ) -> QaoaResult<Self> {
        Ok(Self::new(cost_layer(cost)?, mixer_layer(mixer), depth))
    }

    /// Number of layer repetitions.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Total number of parameters, `2 · depth`.
    pub fn num_params(&self) -> usize {
        2 * self.depth
    }

    /// Append the layers, using `gammas[i]` and `alphas[i]` in repetition `i`.
    pub fn apply(&self, tape: &mut QuantumTape, gammas: &[f64], alphas: &[f64]) -> QaoaResult<()> {
        for (name, params) in [("gamma", gammas), ("alpha", alphas)] {
            if params.len() != self.depth {
                return Err(QaoaError::ParameterShape {
                    name,
                    expected: self.depth,
                    got: params.len(),
                });
            }
        }
        debug!(depth = self.depth, "applying QAOA layers");
        layer(tape, self.depth, |tape, i| {
            self.cost.apply(tape, gammas[i])?;
            self.mixer.apply(tape, alphas[i])
        })?;
        Ok(())
    }

    /// Append the layers from a flat `[gammas.., alphas..]` vector.
    pub fn apply_flat(&self, tape: &mut QuantumTape, params: &[f64]) -> QaoaResult<()> {
        if params.len() != self.num_params() {
            return Err(QaoaError::ParameterShape {
                name: "flat",
                expected: self.num_params(),
                got: params.len(),
            });
        }
        let (gammas, alphas) = params.split_at(self.depth);
        self.apply(tape, gammas, alphas)
    }
}
