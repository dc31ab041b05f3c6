//! QAOA MaxCut runner.
//!
//! Prepares the even superposition, applies `depth` cost/mixer layers and
//! minimises the MaxCut cost Hamiltonian with the configured optimizer.

use anyhow::{Context, Result};
use qvar_adapter_sim::{DefaultQubit, Device};
use qvar_ir::{Hamiltonian, QuantumTape};
use qvar_qaoa::{Graph, QaoaCircuit, maxcut};
use qvar_vqe::{
    AdamOptimizer, AnsatzError, Cobyla, ExpvalCost, GradientDescentOptimizer, Optimizer,
    StepOptimizer,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

use crate::config::{DemoConfig, OptimizerKind};

/// Result of a QAOA run.
#[derive(Debug, Clone, Serialize)]
pub struct QaoaRunResult {
    /// Optimised `[gammas.., alphas..]`.
    pub params: Vec<f64>,
    /// Cost at the optimised parameters.
    pub cost: f64,
    /// Cost before each optimizer step.
    pub history: Vec<f64>,
    /// Output distribution over all basis states.
    pub probs: Vec<f64>,
    /// Most likely basis state.
    pub best_bitstring: usize,
    /// Edges cut by the most likely basis state.
    pub best_cut: usize,
    /// Tapes executed on the device.
    pub circuit_evaluations: usize,
}

/// QAOA runner configuration.
pub struct QaoaRunner {
    graph: Graph,
    cost: Hamiltonian,
    circuit: QaoaCircuit,
    config: DemoConfig,
    initial_params: Option<Vec<f64>>,
}

impl QaoaRunner {
    /// Create a runner for MaxCut on `graph`.
    pub fn new(graph: Graph, config: DemoConfig) -> Result<Self> {
        let (cost, mixer) = maxcut(&graph)?;
        let circuit = QaoaCircuit::from_hamiltonians(&cost, &mixer, config.qaoa.depth)?;
        Ok(Self {
            graph,
            cost,
            circuit,
            config,
            initial_params: None,
        })
    }

    /// Start from fixed parameters instead of random ones.
    pub fn with_initial_params(mut self, params: Vec<f64>) -> Self {
        self.initial_params = Some(params);
        self
    }

    /// The MaxCut cost Hamiltonian.
    pub fn cost_hamiltonian(&self) -> &Hamiltonian {
        &self.cost
    }

    fn ansatz(&self) -> impl Fn(&[f64], &mut QuantumTape) -> Result<(), AnsatzError> + '_ {
        move |params, tape| {
            for w in self.graph.wires() {
                tape.h(w)?;
            }
            self.circuit.apply_flat(tape, params)?;
            Ok(())
        }
    }

    fn device(&self) -> Result<DefaultQubit> {
        self.config
            .build_device(self.graph.wires().clone())
            .context("failed to create simulator")
    }

    /// Cost at `params` without optimising.
    pub fn evaluate(&self, params: &[f64]) -> Result<f64> {
        let dev = self.device()?;
        let cost = ExpvalCost::new(self.ansatz(), self.cost.clone(), &dev);
        Ok(cost.evaluate(params)?)
    }

    /// Uniform random parameters in `[0, 1)`, seeded from the config when set.
    pub fn random_params(&self) -> Vec<f64> {
        let mut rng = match self.config.device.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        (0..self.circuit.num_params()).map(|_| rng.r#gen()).collect()
    }

    /// Optimise the parameters. `on_step` is called after every step with the
    /// step index and the cost before that step.
    pub fn run<F>(&self, mut on_step: F) -> Result<QaoaRunResult>
    where
        F: FnMut(usize, f64),
    {
        let dev = self.device()?;
        let cost = ExpvalCost::new(self.ansatz(), self.cost.clone(), &dev);
        let mut params = self
            .initial_params
            .clone()
            .unwrap_or_else(|| self.random_params());
        let opt = &self.config.optimizer;
        info!(kind = %opt.kind, steps = opt.steps, depth = self.circuit.depth(), "starting QAOA optimisation");

        let mut history = Vec::with_capacity(opt.steps);
        match opt.kind {
            OptimizerKind::Adam => {
                let mut adam = AdamOptimizer::new(opt.stepsize);
                for i in 0..opt.steps {
                    let (next, value) = adam.step_and_cost(|p| cost.evaluate(p), &params)?;
                    params = next;
                    history.push(value);
                    on_step(i, value);
                }
            }
            OptimizerKind::GradientDescent => {
                let mut gd = GradientDescentOptimizer::new(opt.stepsize);
                for i in 0..opt.steps {
                    let (next, value) = gd.step_and_cost(|p| cost.evaluate(p), &params)?;
                    params = next;
                    history.push(value);
                    on_step(i, value);
                }
            }
            OptimizerKind::Cobyla => {
                let result = Cobyla::new()
                    .with_maxiter(opt.steps)
                    .minimize(|p| cost.evaluate(p), params)?;
                for (i, value) in result.history.iter().enumerate() {
                    on_step(i, *value);
                }
                history = result.history;
                params = result.optimal_params;
            }
        }

        let final_cost = cost.evaluate(&params)?;
        let probs = cost.probs(&params, self.graph.wires())?;
        let best_bitstring = probs
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let n = self.graph.num_nodes();
        let bits: Vec<u8> = (0..n)
            .map(|q| ((best_bitstring >> (n - 1 - q)) & 1) as u8)
            .collect();

        info!(cost = final_cost, best_bitstring, "QAOA optimisation finished");
        Ok(QaoaRunResult {
            params,
            cost: final_cost,
            history,
            probs,
            best_bitstring,
            best_cut: self.graph.cut_size(&bits),
            circuit_evaluations: dev.num_executions(),
        })
    }
}
