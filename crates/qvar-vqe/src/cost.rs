//! Hamiltonian expectation-value cost functions.

use ndarray::Array2;
use qvar_adapter_sim::Device;
use qvar_ir::{Hamiltonian, Measurement, QuantumTape, Wires, hamiltonian_expand};
use tracing::debug;

use crate::error::{AnsatzError, VqeError, VqeResult};
use crate::gradient::{DEFAULT_STEP, finite_difference};
use crate::metric::{block_diag_metric_tensor, gate_params};

/// A cost function `C(θ) = ⟨ψ(θ)|H|ψ(θ)⟩`.
///
/// The ansatz records the state preparation for parameters `θ` onto an
/// empty tape. By default each Hamiltonian term is measured on its own copy
/// of the ansatz tape and the results are combined with the term
/// coefficients. [`ExpvalCost::with_grouping`] measures qubit-wise commuting
/// terms together instead, which needs fewer device executions.
///
/// ```rust
/// use qvar_adapter_sim::DefaultQubit;
/// use qvar_ir::{Hamiltonian, Observable, QuantumTape};
/// use qvar_vqe::ExpvalCost;
///
/// let dev = DefaultQubit::with_num_wires(1).unwrap();
/// let h = Hamiltonian::term(1.0, Observable::pauli_z(0));
/// let cost = ExpvalCost::new(
///     |params: &[f64], tape: &mut QuantumTape| {
///         tape.rx(params[0], 0)?;
///         Ok(())
///     },
///     h,
///     &dev,
/// );
/// let value = cost.evaluate(&[std::f64::consts::PI]).unwrap();
/// assert!((value + 1.0).abs() < 1e-12);
/// ```
pub struct ExpvalCost<'d, F> {
    ansatz: F,
    hamiltonian: Hamiltonian,
    device: &'d dyn Device,
    grouping: bool,
}

impl<'d, F> ExpvalCost<'d, F>
where
    F: Fn(&[f64], &mut QuantumTape) -> Result<(), AnsatzError>,
{
    /// Create a cost function for `hamiltonian` on `device`.
    pub fn new(ansatz: F, hamiltonian: Hamiltonian, device: &'d dyn Device) -> Self {
        Self {
            ansatz,
            hamiltonian,
            device,
            grouping: false,
        }
    }

    /// Measure qubit-wise commuting terms on a shared tape.
    #[must_use]
    pub fn with_grouping(mut self, grouping: bool) -> Self {
        self.grouping = grouping;
        self
    }

    /// The Hamiltonian being minimised.
    pub fn hamiltonian(&self) -> &Hamiltonian {
        &self.hamiltonian
    }

    /// The device executing the tapes.
    pub fn device(&self) -> &dyn Device {
        self.device
    }

    /// Record the ansatz for `params` onto a fresh tape.
    pub fn ansatz_tape(&self, params: &[f64]) -> VqeResult<QuantumTape> {
        let mut tape = QuantumTape::new();
        (self.ansatz)(params, &mut tape).map_err(VqeError::Ansatz)?;
        Ok(tape)
    }

    /// Tapes executed by [`Self::evaluate`], together with the coefficient of
    /// each of their measurements.
    pub fn tapes(&self, params: &[f64]) -> VqeResult<(Vec<QuantumTape>, Vec<Vec<f64>>)> {
        let mut tape = self.ansatz_tape(params)?;
        if self.grouping {
            tape.expval_hamiltonian(self.hamiltonian.clone());
            let expansion = hamiltonian_expand(&tape, true)?;
            let coeffs = expansion.coeffs().to_vec();
            return Ok((expansion.into_tapes(), coeffs));
        }
        Ok(self
            .hamiltonian
            .terms()
            .map(|(c, op)| (tape.with_measurements(vec![Measurement::Expval(op.clone())]), vec![c]))
            .unzip())
    }

    /// Evaluate `C(θ)`.
    pub fn evaluate(&self, params: &[f64]) -> VqeResult<f64> {
        let (tapes, coeffs) = self.tapes(params)?;
        let results = self.device.batch_execute(&tapes)?;
        let value = results
            .iter()
            .zip(&coeffs)
            .map(|(res, cs)| res.iter().zip(cs).map(|(r, c)| r * c).sum::<f64>())
            .sum();
        debug!(
            n_tapes = tapes.len(),
            grouped = self.grouping,
            value,
            "evaluated cost"
        );
        Ok(value)
    }

    /// Central finite-difference gradient of `C` at `params`.
    pub fn gradient(&self, params: &[f64], step: f64) -> VqeResult<Vec<f64>> {
        finite_difference(|p| self.evaluate(p), params, step)
    }

    /// Computational-basis probabilities of the ansatz state on `wires`
    /// (all device wires when empty).
    pub fn probs(&self, params: &[f64], wires: &Wires) -> VqeResult<Vec<f64>> {
        let tape = self.ansatz_tape(params)?;
        let tape = tape.with_measurements(vec![Measurement::Probs(wires.clone())]);
        Ok(self.device.execute(&tape)?)
    }

    /// Block-diagonal metric tensor of the ansatz state at `params`.
    ///
    /// The tensor is computed over the gate angles of the ansatz tape and
    /// pulled back to `params` through a finite-difference Jacobian of those
    /// angles, so the result is `params.len() × params.len()` even when
    /// parameters are shared between gates or rescaled. With `diag_approx`
    /// only the diagonal of each block is evaluated.
    pub fn metric_tensor(&self, params: &[f64], diag_approx: bool) -> VqeResult<Array2<f64>> {
        let tape = self.ansatz_tape(params)?;
        let gate_metric = block_diag_metric_tensor(&tape, self.device, diag_approx)?;
        let n_gate = gate_params(&tape).len();

        let mut jac = Array2::zeros((n_gate, params.len()));
        let mut shifted = params.to_vec();
        for i in 0..params.len() {
            shifted[i] = params[i] + DEFAULT_STEP;
            let plus = gate_params(&self.ansatz_tape(&shifted)?);
            shifted[i] = params[i] - DEFAULT_STEP;
            let minus = gate_params(&self.ansatz_tape(&shifted)?);
            shifted[i] = params[i];

            for got in [plus.len(), minus.len()] {
                if got != n_gate {
                    return Err(VqeError::InconsistentAnsatz {
                        expected: n_gate,
                        got,
                    });
                }
            }
            for (k, (p, m)) in plus.iter().zip(&minus).enumerate() {
                jac[[k, i]] = (p - m) / (2.0 * DEFAULT_STEP);
            }
        }

        Ok(jac.t().dot(&gate_metric).dot(&jac))
    }
}

impl<F> std::fmt::Debug for ExpvalCost<'_, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpvalCost")
            .field("hamiltonian", &self.hamiltonian)
            .field("device", &self.device.name())
            .field("grouping", &self.grouping)
            .finish_non_exhaustive()
    }
}
