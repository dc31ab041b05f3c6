//! Tape transforms.
//!
//! [`hamiltonian_expand`] splits a tape measuring `⟨H⟩` into tapes that only
//! measure the individual terms of `H`, so that devices without native
//! Hamiltonian support can evaluate it. The caller executes the tapes and
//! hands the results back to [`HamiltonianExpansion::postprocess`].

use crate::error::{IrError, IrResult};
use crate::grouping::group_observables;
use crate::tape::{Measurement, QuantumTape};

/// Tapes produced by [`hamiltonian_expand`] and the coefficients needed to
/// recombine their results.
#[derive(Debug, Clone)]
pub struct HamiltonianExpansion {
    tapes: Vec<QuantumTape>,
    coeffs: Vec<Vec<f64>>,
}

impl HamiltonianExpansion {
    /// Tapes to execute, one per group.
    pub fn tapes(&self) -> &[QuantumTape] {
        &self.tapes
    }

    /// Consume the expansion, returning the tapes.
    pub fn into_tapes(self) -> Vec<QuantumTape> {
        self.tapes
    }

    /// Coefficients, grouped like the tapes' measurements.
    pub fn coeffs(&self) -> &[Vec<f64>] {
        &self.coeffs
    }

    /// Combine per-tape results into `⟨H⟩ = Σ c_k ⟨O_k⟩`.
    pub fn postprocess(&self, results: &[Vec<f64>]) -> IrResult<f64> {
        if results.len() != self.coeffs.len() {
            return Err(IrError::ResultShapeMismatch {
                expected: self.coeffs.len(),
                got: results.len(),
            });
        }
        let mut total = 0.0;
        for (res, coeffs) in results.iter().zip(&self.coeffs) {
            if res.len() != coeffs.len() {
                return Err(IrError::ResultShapeMismatch {
                    expected: coeffs.len(),
                    got: res.len(),
                });
            }
            total += res.iter().zip(coeffs).map(|(r, c)| r * c).sum::<f64>();
        }
        Ok(total)
    }
}

/// Split a tape ending in `expval(H)` into one tape per term of `H`, or one
/// tape per qubit-wise commuting group of terms when `group` is set.
///
/// The Hamiltonian is simplified first, so like terms are measured once.
pub fn hamiltonian_expand(tape: &QuantumTape, group: bool) -> IrResult<HamiltonianExpansion> {
    let hamiltonian = match tape.measurements() {
        [Measurement::ExpvalHamiltonian(h)] => h.simplify(),
        _ => return Err(IrError::InvalidHamiltonianTape),
    };

    let (groups, coeffs) = if group {
        group_observables(hamiltonian.ops(), hamiltonian.coeffs())
    } else {
        hamiltonian
            .terms()
            .map(|(c, op)| (vec![op.clone()], vec![c]))
            .unzip()
    };

    let tapes: Vec<QuantumTape> = groups
        .into_iter()
        .map(|ops| tape.with_measurements(ops.into_iter().map(Measurement::Expval).collect()))
        .collect();

    tracing::debug!(
        terms = hamiltonian.len(),
        tapes = tapes.len(),
        grouped = group,
        "expanded Hamiltonian tape"
    );
    Ok(HamiltonianExpansion { tapes, coeffs })
}
