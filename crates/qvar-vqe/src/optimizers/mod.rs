//! Classical optimizers for the variational loop.
//!
//! Two styles are provided:
//! - minimize-style optimizers implement [`Optimizer`] and run a complete
//!   optimisation, returning an [`OptimizationResult`];
//! - step-style optimizers ([`GradientDescentOptimizer`], [`AdamOptimizer`])
//!   implement [`StepOptimizer`] and advance the parameters one update at a
//!   time, leaving the loop to the caller.

mod cobyla;
mod descent;

pub use cobyla::Cobyla;
pub use descent::{AdamOptimizer, GradientDescentOptimizer};

use serde::{Deserialize, Serialize};

use crate::error::VqeResult;
use crate::gradient::{DEFAULT_STEP, finite_difference};

/// Result of an optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Optimal parameter values.
    pub optimal_params: Vec<f64>,
    /// Optimal objective value.
    pub optimal_value: f64,
    /// Number of function evaluations.
    pub num_evaluations: usize,
    /// Number of iterations.
    pub num_iterations: usize,
    /// Best objective value after each improvement.
    pub history: Vec<f64>,
    /// Whether the optimization converged.
    pub converged: bool,
}

/// An optimizer that minimises an objective from a starting point.
pub trait Optimizer {
    /// Minimise `objective` starting at `initial_params`.
    fn minimize<F>(&self, objective: F, initial_params: Vec<f64>) -> VqeResult<OptimizationResult>
    where
        F: FnMut(&[f64]) -> VqeResult<f64>;
}

/// A gradient-based optimizer that updates parameters one step at a time.
///
/// Gradients are estimated with central finite differences of step
/// [`StepOptimizer::diff_step`].
pub trait StepOptimizer {
    /// Compute the updated parameters from a gradient.
    fn apply_grad(&mut self, grad: &[f64], params: &[f64]) -> Vec<f64>;

    /// Finite-difference step used for gradients.
    fn diff_step(&self) -> f64 {
        DEFAULT_STEP
    }

    /// Take one step, returning the new parameters.
    fn step<F>(&mut self, objective: F, params: &[f64]) -> VqeResult<Vec<f64>>
    where
        F: FnMut(&[f64]) -> VqeResult<f64>,
    {
        let grad = finite_difference(objective, params, self.diff_step())?;
        Ok(self.apply_grad(&grad, params))
    }

    /// Take one step, returning the new parameters and the objective value
    /// at the parameters before the step.
    fn step_and_cost<F>(&mut self, mut objective: F, params: &[f64]) -> VqeResult<(Vec<f64>, f64)>
    where
        F: FnMut(&[f64]) -> VqeResult<f64>,
    {
        let cost = objective(params)?;
        let grad = finite_difference(&mut objective, params, self.diff_step())?;
        Ok((self.apply_grad(&grad, params), cost))
    }
}
