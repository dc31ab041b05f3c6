//! Numerical gradients.

use crate::error::{VqeError, VqeResult};

/// Default step for central differences.
pub const DEFAULT_STEP: f64 = 1e-6;

/// Central finite-difference gradient `∂f/∂θ_i ≈ (f(θ + h e_i) - f(θ - h e_i)) / 2h`.
///
/// Costs `2 · params.len()` evaluations of `f`.
pub fn finite_difference<F>(mut f: F, params: &[f64], step: f64) -> VqeResult<Vec<f64>>
where
    F: FnMut(&[f64]) -> VqeResult<f64>,
{
    if !(step.is_finite() && step > 0.0) {
        return Err(VqeError::InvalidStep(step));
    }
    let mut shifted = params.to_vec();
    let mut grad = Vec::with_capacity(params.len());
    for i in 0..params.len() {
        shifted[i] = params[i] + step;
        let forward = f(&shifted)?;
        shifted[i] = params[i] - step;
        let backward = f(&shifted)?;
        shifted[i] = params[i];
        grad.push((forward - backward) / (2.0 * step));
    }
    Ok(grad)
}
